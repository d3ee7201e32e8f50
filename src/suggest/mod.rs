//! Autocomplete suggestions for partial command lines.
//!
//! The suggester is the consumer of the constraint engine: for every slot
//! of the active command it asks the command's rules whether the slot may
//! still be offered given the arguments already typed, then narrows the
//! survivors by whatever the user has started typing. Before a command
//! word exists it completes command words instead.

use serde::Serialize;

use crate::parse::{self, InputLine};
use crate::schema::CommandRegistry;

/// What a suggestion completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionKind {
    Command,
    Argument,
}

/// One completion the front-end may show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// The text to insert: a command word or an argument prefix.
    pub text: String,
    /// Short description shown next to the text.
    pub label: String,
    pub kind: SuggestionKind,
}

/// Stateless suggestion generator over a command registry.
#[derive(Debug, Clone, Copy)]
pub struct Suggester<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> Suggester<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    /// Suggestions for the current buffer, in declaration order.
    pub fn suggest(&self, buffer: &str) -> Vec<Suggestion> {
        let line = parse::tokenize(buffer);
        match &line.word {
            None => self.complete_word(line.word_fragment.as_deref()),
            Some(word) => self.complete_args(word, &line),
        }
    }

    fn complete_word(&self, fragment: Option<&str>) -> Vec<Suggestion> {
        self.registry
            .iter()
            .filter(|spec| fragment.map(|f| spec.word().starts_with(f)).unwrap_or(true))
            .map(|spec| Suggestion {
                text: spec.word().to_string(),
                label: spec.description().to_string(),
                kind: SuggestionKind::Command,
            })
            .collect()
    }

    fn complete_args(&self, word: &str, line: &InputLine) -> Vec<Suggestion> {
        let Some(spec) = self.registry.get(word) else {
            tracing::debug!(word, "unknown command word, nothing to suggest");
            return Vec::new();
        };
        let resolved = parse::resolve(line, spec);
        for arg in &resolved.unknown {
            tracing::warn!(
                command = word,
                prefix = arg.prefix.as_str(),
                "ignoring unknown prefix while suggesting"
            );
        }

        spec.slots()
            .iter()
            .filter(|slot| spec.allows(slot.id, &resolved.present))
            .filter(|slot| {
                line.fragment
                    .as_deref()
                    .map(|f| slot.prefix.starts_with(f))
                    .unwrap_or(true)
            })
            .map(|slot| Suggestion {
                text: slot.prefix.clone(),
                label: slot.label.clone(),
                kind: SuggestionKind::Argument,
            })
            .collect()
    }
}
