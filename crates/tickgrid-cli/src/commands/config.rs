use std::path::Path;

use tickgrid_core::SimConfig;

pub fn print_default(output: Option<&Path>) -> anyhow::Result<()> {
    let rendered = SimConfig::default().to_toml_string()?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            println!("✓ Wrote default config to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
