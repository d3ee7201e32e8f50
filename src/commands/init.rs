//! Create a fresh record file.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::storage::RecordBook;

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Record file to create
    pub data: PathBuf,
    /// Overwrite an existing file
    pub force: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.data.exists() {
        if !options.force {
            eprintln!(
                "{} {} already exists (use --force to overwrite)",
                style("✗").red(),
                options.data.display()
            );
            return Ok(());
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Overwrite {} and lose its records?",
                options.data.display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{} aborted", style("•").dim());
            return Ok(());
        }
    }

    RecordBook::default().save(&options.data)?;
    println!(
        "{} created {}",
        style("✓").green(),
        options.data.display()
    );
    Ok(())
}
