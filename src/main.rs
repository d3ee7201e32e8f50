#![forbid(unsafe_code)]
//! jobdex Command Line Interface

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jobdex::commands::{
    execute_init, execute_repl, execute_run, execute_suggest, InitOptions, ReplOptions,
    RunOptions, SuggestOptions,
};
use jobdex::{CommandRegistry, Config, RecordBook};

#[derive(Parser)]
#[command(name = "jobdex")]
#[command(about = "Contacts and job applications with constraint-aware autocomplete")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Record file path
    #[arg(long, global = true, env = "JOBDEX_DATA")]
    data: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true, env = "JOBDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive prompt (the default)
    Repl,

    /// Execute one command line and exit
    Run {
        /// The command line, e.g. "add n/Alice p/555123 e/a@b.c"
        line: String,

        /// Skip confirmation prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print completions for a partial command line
    Suggest {
        /// The buffer typed so far, e.g. "edit i/2 "
        buffer: String,

        /// Emit JSON for shell integrations
        #[arg(long)]
        json: bool,
    },

    /// Create a fresh record file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "jobdex=debug" } else { "jobdex=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(config_path)?;
    let data = cli
        .data
        .clone()
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(RecordBook::default_path);

    let registry = CommandRegistry::builtin()?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let options = ReplOptions {
                data,
                prompt: config.prompt.clone(),
                autosave: config.autosave,
            };
            execute_repl(options, &registry)?;
        }

        Commands::Run { line, yes } => {
            let options = RunOptions {
                line,
                data,
                assume_yes: yes,
            };
            execute_run(options, &registry)?;
        }

        Commands::Suggest { buffer, json } => {
            let options = SuggestOptions { buffer, json };
            execute_suggest(options, &registry)?;
        }

        Commands::Init { force } => {
            let options = InitOptions { data, force };
            execute_init(options)?;
        }
    }

    Ok(())
}
