//! Interactive command loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::commands::run::apply_line;
use crate::schema::CommandRegistry;
use crate::storage::RecordBook;

/// Options for the repl command
#[derive(Debug, Clone)]
pub struct ReplOptions {
    /// Record file
    pub data: PathBuf,
    /// Prompt label
    pub prompt: String,
    /// Save after every mutating command
    pub autosave: bool,
}

/// Execute the repl command: read lines until `exit` or end of input.
pub fn execute_repl(options: ReplOptions, registry: &CommandRegistry) -> Result<()> {
    let mut book = RecordBook::load(&options.data)?;
    println!(
        "{} jobdex — {} contacts, {} applications. Type 'help' for commands.",
        style("→").cyan(),
        book.contacts.len(),
        book.applications.len()
    );

    let stdin = io::stdin();
    let mut dirty = false;
    loop {
        print!("{} ", style(format!("{}>", options.prompt)).cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match apply_line(&mut book, registry, line, false) {
            Ok(outcome) => {
                if !outcome.message.is_empty() {
                    println!("{} {}", style("✓").green(), outcome.message);
                }
                if outcome.mutated {
                    if options.autosave {
                        book.save(&options.data)?;
                    } else {
                        dirty = true;
                    }
                }
                if outcome.quit {
                    break;
                }
            }
            Err(e) => {
                eprintln!("{} {}", style("✗").red(), e);
            }
        }
    }

    if dirty {
        book.save(&options.data)?;
        tracing::debug!(path = %options.data.display(), "saved on exit");
    }
    Ok(())
}
