use colored::Colorize;
use gomi::error::{GomiError, Result};
use gomi::notify::Notifier;
use std::io::{self, BufRead, Write};

/// Alerts and questions on the terminal.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) -> Result<()> {
        println!();
        println!("{}", message.yellow());
        // Only block when someone is there to press Enter.
        if console::user_attended() {
            print!("{}", "Press Enter to continue".dimmed());
            io::stdout().flush().map_err(GomiError::Io)?;
            read_answer()?;
        }
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        print!("{} [y/N] ", question);
        io::stdout().flush().map_err(GomiError::Io)?;
        Ok(is_yes(&read_answer()?))
    }
}

fn read_answer() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(GomiError::Io)?;
    Ok(line)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_y_and_yes_confirm() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }
}
