//! Command schemas and the suggestion constraint engine.
//!
//! A command is described declaratively: its word, its argument slots, and
//! the [`Constraint`] rules that decide which slots may still be suggested
//! while the user is mid-command. The engine itself is deliberately blind
//! to prefixes and argument names; it only ever sees opaque [`ArgId`]
//! tokens and the [`ArgSet`] of slots already present in the input line.

mod command;
mod constraint;
mod id;
mod registry;

pub use command::{ArgSlot, CommandSpec};
pub use constraint::{Constraint, PrerequisiteBuilder};
pub use id::{ArgId, ArgSet};
pub use registry::{slots, CommandRegistry};

use thiserror::Error;

/// Construction-time schema misuse. Suggestion queries themselves are
/// total and never fail; everything that can go wrong is rejected here,
/// while the command set is being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A cardinality rule was given no slots to govern.
    #[error("cardinality rule needs at least one governed slot")]
    EmptyOnceSet,

    /// An exclusive group needs two members to exclude anything.
    #[error("exclusive group needs at least two slots, got {0}")]
    ExclusiveGroupTooSmall(usize),

    /// A prerequisite rule without dependents governs nothing.
    #[error("prerequisite rule for {prerequisite} has no dependents")]
    NoDependents { prerequisite: ArgId },

    /// Two slots of one command share an id.
    #[error("duplicate slot id {id} in command '{command}'")]
    DuplicateSlot { command: String, id: ArgId },

    /// Two slots of one command share a prefix.
    #[error("duplicate prefix '{prefix}' in command '{command}'")]
    DuplicatePrefix { command: String, prefix: String },

    /// A constraint names a slot id the command does not declare.
    #[error("constraint in command '{command}' governs undeclared slot {id}")]
    UnboundConstraintSlot { command: String, id: ArgId },

    /// A command word was registered twice.
    #[error("command word '{0}' registered twice")]
    DuplicateCommand(String),
}
