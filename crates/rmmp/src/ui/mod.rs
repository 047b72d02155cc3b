//! Human-facing terminal output. Diagnostics go through `tracing` instead.

pub mod prompt;
pub mod report;
pub mod table;
pub mod tracker;

use std::fmt::Display;

use console::style;

pub fn info(msg: impl Display) {
    println!("{} {msg}", style("::").cyan().bold());
}

pub fn success(msg: impl Display) {
    println!("{} {msg}", style("✓").green().bold());
}

pub fn warn(msg: impl Display) {
    println!("{} {msg}", style("!").yellow().bold());
}

/// Print an error and its causes on one line, skipping causes whose text
/// is already part of the message.
pub fn error(err: &anyhow::Error) {
    eprintln!("{} {}", style("error:").red().bold(), render_chain(err));
}

pub fn render_chain(err: &anyhow::Error) -> String {
    let mut rendered = err.to_string();
    for cause in err.chain().skip(1) {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn chain_skips_repeated_causes() {
        let err = anyhow!("connection refused")
            .context("request to https://github.com failed: connection refused")
            .context("failed to fetch release manifest");
        assert_eq!(
            render_chain(&err),
            "failed to fetch release manifest: request to https://github.com failed: connection refused"
        );
    }
}
