//! Interactive prompts on stdin

use anyhow::{bail, Context};
use std::io::{self, BufRead, Write};

fn read_line(prompt: &str) -> anyhow::Result<String> {
    eprint!("{prompt}");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(line.trim().to_string())
}

/// Ask a yes/no question; anything but "y"/"yes" is a no
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let answer = read_line(&format!("{prompt} [y/N] "))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn read_token() -> anyhow::Result<String> {
    let token = read_line("Admin token: ")?;
    if token.is_empty() {
        bail!("no token entered");
    }
    Ok(token)
}
