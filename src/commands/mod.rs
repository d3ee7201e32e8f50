//! CLI command implementations.
//!
//! One submodule per subcommand, each exposing an `execute_*` entry point
//! and an options struct the binary fills from clap.

pub mod init;
pub mod repl;
pub mod run;
pub mod suggest;

pub use init::{execute_init, InitOptions};
pub use repl::{execute_repl, ReplOptions};
pub use run::{apply_line, execute_run, LineOutcome, RunOptions};
pub use suggest::{execute_suggest, SuggestOptions};
