//! The autocomplete surface: print legal continuations for a buffer.

use anyhow::Result;
use console::style;

use crate::schema::CommandRegistry;
use crate::suggest::Suggester;

/// Options for the suggest command
#[derive(Debug, Clone)]
pub struct SuggestOptions {
    /// Partial input line, exactly as typed so far
    pub buffer: String,
    /// Emit JSON for shell-completion integrations
    pub json: bool,
}

/// Execute the suggest command
pub fn execute_suggest(options: SuggestOptions, registry: &CommandRegistry) -> Result<()> {
    let suggester = Suggester::new(registry);
    let suggestions = suggester.suggest(&options.buffer);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("{} nothing to suggest here", style("•").dim());
        return Ok(());
    }
    for suggestion in &suggestions {
        println!(
            "{:12} {}",
            style(&suggestion.text).green(),
            style(&suggestion.label).dim()
        );
    }
    Ok(())
}
