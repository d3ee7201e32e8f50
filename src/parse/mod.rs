//! Tokenizing of prefixed command lines.
//!
//! Input follows the `word p/value …` grammar: a leading command word,
//! then prefix arguments such as `n/Alice Fox` whose values run until the
//! next prefix token. Tokenizing is schema-free; [`resolve`] then maps the
//! typed prefixes onto a [`CommandSpec`]'s slots, which is where the
//! present-set for the constraint engine comes from.
//!
//! Values may contain spaces, so a bare trailing token is read as a
//! continuation of the open argument when there is one. Only a trailing
//! token typed directly after the command word is treated as the start of
//! a new prefix (the `fragment`) and used to narrow suggestions.

use std::collections::BTreeMap;

use crate::schema::{ArgId, ArgSet, CommandSpec};

/// One `prefix/value` pair as typed, before any schema is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixArg {
    /// Prefix including the slash, e.g. `n/`.
    pub prefix: String,
    pub value: String,
}

/// A tokenized input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    /// Completed command word, once one has been typed.
    pub word: Option<String>,
    /// Prefix arguments in typing order.
    pub args: Vec<PrefixArg>,
    /// The command word still being typed (no whitespace after it yet).
    pub word_fragment: Option<String>,
    /// A token the user has started right after the command word which is
    /// not yet a prefix, e.g. the `p` in `add p`.
    pub fragment: Option<String>,
    /// Non-prefix tokens that belong to no argument; execution rejects
    /// them, suggestion ignores them.
    pub stray: Vec<String>,
}

/// Whether a token opens a prefix argument: one or two ASCII letters
/// followed by a slash.
fn split_prefix(token: &str) -> Option<(&str, &str)> {
    let slash = token.find('/')?;
    if slash == 0 || slash > 2 {
        return None;
    }
    if !token[..slash].chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((&token[..=slash], &token[slash + 1..]))
}

/// Tokenize a (possibly partial) input line.
pub fn tokenize(buffer: &str) -> InputLine {
    let open_ended = buffer
        .chars()
        .last()
        .map(|c| !c.is_whitespace())
        .unwrap_or(false);
    let tokens: Vec<&str> = buffer.split_whitespace().collect();

    let mut line = InputLine::default();
    if tokens.is_empty() {
        return line;
    }
    if tokens.len() == 1 && open_ended {
        line.word_fragment = Some(tokens[0].to_string());
        return line;
    }

    line.word = Some(tokens[0].to_string());
    let rest = &tokens[1..];
    for (i, token) in rest.iter().enumerate() {
        let last = i == rest.len() - 1;
        if let Some((prefix, value)) = split_prefix(token) {
            line.args.push(PrefixArg {
                prefix: prefix.to_string(),
                value: value.to_string(),
            });
        } else if let Some(open) = line.args.last_mut() {
            // Continuation of a value with spaces in it.
            if open.value.is_empty() {
                open.value.push_str(token);
            } else {
                open.value.push(' ');
                open.value.push_str(token);
            }
        } else if last && open_ended {
            line.fragment = Some(token.to_string());
        } else {
            line.stray.push(token.to_string());
        }
    }
    line
}

/// A line's arguments mapped onto a command's slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedArgs {
    /// Values per slot, in typing order.
    pub values: BTreeMap<ArgId, Vec<String>>,
    /// The slots present in the line; this is the constraint engine's input.
    pub present: ArgSet,
    /// Prefixes the command does not declare, with their values.
    pub unknown: Vec<PrefixArg>,
}

impl ResolvedArgs {
    /// Last typed value for a slot, if any. Repeated prefixes follow
    /// last-occurrence-wins at execution time.
    pub fn single(&self, id: ArgId) -> Option<&str> {
        self.values
            .get(&id)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    /// Every typed value for a slot (tags and other repeatables).
    pub fn all(&self, id: ArgId) -> &[String] {
        self.values.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, id: ArgId) -> bool {
        self.present.contains(id)
    }
}

/// Map a tokenized line's prefixes onto `spec`'s slots.
pub fn resolve(line: &InputLine, spec: &CommandSpec) -> ResolvedArgs {
    let mut resolved = ResolvedArgs::default();
    for arg in &line.args {
        match spec.slot_by_prefix(&arg.prefix) {
            Some(slot) => {
                resolved.present.insert(slot.id);
                resolved
                    .values
                    .entry(slot.id)
                    .or_default()
                    .push(arg.value.trim().to_string());
            }
            None => {
                tracing::debug!(
                    command = spec.word(),
                    prefix = arg.prefix.as_str(),
                    "prefix not declared by command"
                );
                resolved.unknown.push(arg.clone());
            }
        }
    }
    resolved
}
