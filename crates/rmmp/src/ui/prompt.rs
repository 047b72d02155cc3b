use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use console::style;

/// Ask a yes/no question defaulting to yes.
///
/// End of input counts as a refusal.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} {question} {} ", style("?").magenta().bold(), style("[Y/n]").dim());
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(read > 0 && accepts(&answer))
}

/// Empty, `y` and `yes` (any case) accept.
pub fn accepts(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "" | "y" | "yes")
}
