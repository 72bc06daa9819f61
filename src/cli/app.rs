//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};

use super::mode;
use super::output::{Output, OutputFormat};
use crate::storage::{Config, ModeStore, StoreError};

/// Exit code when entries failed to launch, or for any other error
pub(crate) const EXIT_FAILURE: u8 = 1;
/// Exit code for invalid names or entries
const EXIT_INVALID: u8 = 2;
/// Exit code for unknown modes
const EXIT_NOT_FOUND: u8 = 3;

#[derive(Parser)]
#[command(name = "cue")]
#[command(author, version, about = "Launch named sets of commands and URLs")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to `default_format` from the config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Mode store file
    #[arg(long, global = true, env = "CUE_STORE")]
    pub store: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "CUE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all modes with their entries
    #[command(visible_alias = "ls")]
    List,

    /// Show a single mode
    Show {
        /// Mode name
        name: String,
    },

    /// Create a mode, replacing any mode with the same name
    ///
    /// Examples:
    ///   cue add work "https://mail.example.com" "code ~/work"
    ///   cue add work --file work.txt     # one entry per line
    ///   cue add work --file -            # read entries from stdin
    ///   cue add work -- "-fullscreen"    # entries starting with '-' go after --
    Add {
        /// Mode name (case-insensitive)
        name: String,

        /// Commands or URLs, in launch order
        #[arg(conflicts_with = "file")]
        entries: Vec<String>,

        /// Read entries from a file, one per line ("-" for stdin)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Replace a mode's entries and/or rename it
    ///
    /// Entries that start with '-' must follow `--`, as with `add`.
    #[command(group(
        ArgGroup::new("change")
            .required(true)
            .multiple(true)
            .args(["entries", "file", "rename"])
    ))]
    Update {
        /// Existing mode name
        name: String,

        /// New name for the mode
        #[arg(long)]
        rename: Option<String>,

        /// New entries (keeps the current ones if omitted)
        #[arg(conflicts_with = "file")]
        entries: Vec<String>,

        /// Read new entries from a file, one per line ("-" for stdin)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Launch every command and URL of a mode
    #[command(visible_alias = "run")]
    Activate {
        /// Mode name
        name: String,
    },

    /// Delete a mode (no error if it does not exist)
    #[command(visible_alias = "rm")]
    Delete {
        /// Mode name
        name: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing();
    }

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.or(config.default_format).unwrap_or_default();
    let output = Output::new(format, cli.verbose);

    let store_path = match cli.store {
        Some(path) => path,
        None => config.resolve_store_path()?,
    };
    output.verbose_ctx("store", &format!("Using mode store: {}", store_path.display()));
    let mut store = ModeStore::open(store_path)?;

    let code = match cli.command {
        Commands::List => {
            mode::list(&output, &store);
            ExitCode::SUCCESS
        }
        Commands::Show { name } => {
            mode::show(&output, &store, &name)?;
            ExitCode::SUCCESS
        }
        Commands::Add {
            name,
            entries,
            file,
        } => {
            output.verbose_ctx("add", &format!("Saving mode '{}'", name));
            mode::add(&output, &mut store, &name, entries, file.as_deref())?;
            ExitCode::SUCCESS
        }
        Commands::Update {
            name,
            rename,
            entries,
            file,
        } => {
            output.verbose_ctx("update", &format!("Updating mode '{}', rename: {:?}", name, rename));
            mode::update(&output, &mut store, &name, rename.as_deref(), entries, file.as_deref())?;
            ExitCode::SUCCESS
        }
        Commands::Activate { name } => {
            output.verbose_ctx("activate", &format!("Activating mode '{}'", name));
            mode::activate(&output, &store, &config, &name)?
        }
        Commands::Delete { name } => {
            mode::delete(&output, &mut store, &name)?;
            ExitCode::SUCCESS
        }
    };

    output.verbose("Command completed");
    Ok(code)
}

/// Maps a failed command to its process exit code
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Validation(_)) | Some(StoreError::DuplicateName(_)) => EXIT_INVALID,
        Some(StoreError::NotFound(_)) => EXIT_NOT_FOUND,
        _ => EXIT_FAILURE,
    }
}

/// Sends library tracing events to stderr
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
