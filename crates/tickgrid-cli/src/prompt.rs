//! Interactive prompts for run parameters missing from flags and config.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::bail;

/// Ask `question` until the answer is an integer of at least 1 that fits
/// in `T`.
///
/// Invalid answers print `retry` and ask again. End of input is an error.
pub fn positive_integer<T, R, W>(
    input: &mut R,
    output: &mut W,
    question: &str,
    retry: &str,
) -> anyhow::Result<T>
where
    T: FromStr + PartialOrd + From<u8>,
    R: BufRead,
    W: Write,
{
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a value was entered");
        }
        match line.trim().parse::<T>() {
            Ok(value) if value >= T::from(1) => return Ok(value),
            _ => {
                write!(output, "{retry}")?;
                output.flush()?;
            }
        }
    }
}
