#![forbid(unsafe_code)]

//! # jobdex
//!
//! Terminal record-keeper for contacts and job applications, driven by
//! prefixed text commands (`add n/Alice Fox p/555123 e/alice@ex.com`).
//!
//! The interesting part lives in [`schema`]: a small constraint engine
//! that decides, while a command is being typed, which argument slots may
//! still legally be suggested. [`suggest`] turns those verdicts into
//! completions, [`parse`] feeds both, and the rest is the record keeper
//! around them.
//!
//! ## Example
//!
//! ```rust
//! use jobdex::schema::CommandRegistry;
//! use jobdex::suggest::Suggester;
//!
//! # fn main() -> Result<(), jobdex::schema::SchemaError> {
//! let registry = CommandRegistry::builtin()?;
//! let suggester = Suggester::new(&registry);
//!
//! // i/ unlocks the field prefixes of `edit`.
//! let before = suggester.suggest("edit ");
//! assert_eq!(before.len(), 1);
//! let after = suggester.suggest("edit i/2 ");
//! assert!(after.len() > 1);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod schema;
pub mod storage;
pub mod suggest;

// Re-exports
pub use config::Config;
pub use error::{JobdexError, Result};
pub use model::{ApplicationStatus, Contact, JobApplication};
pub use schema::{
    ArgId, ArgSet, ArgSlot, CommandRegistry, CommandSpec, Constraint, PrerequisiteBuilder,
    SchemaError,
};
pub use storage::RecordBook;
pub use suggest::{Suggester, Suggestion, SuggestionKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
