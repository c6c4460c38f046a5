use anyhow::{Context, Result};
use std::io::{self, BufRead};

/// Reads one line from stdin. `None` at end of input.
pub fn read_stdin_line() -> Result<Option<String>> {
    read_line(&mut io::stdin().lock())
}

pub fn read_line(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).context("reading answer")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Accepts English and Hinglish yes; anything else is a no.
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "ha" | "haan" | "han" | "हाँ" | "हां"
    )
}

/// `q` (or `quit`/`exit`) ends the interactive loop.
pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "q" | "quit" | "exit")
}
