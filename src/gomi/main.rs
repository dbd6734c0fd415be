//! # Gomi CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/gomi/cli/`, while this file only
//! invokes `cli::run()` and handles process termination. Everything from the API inward is
//! in the `gomi` library and never touches the terminal.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
