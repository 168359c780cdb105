//! DBLite CLI
//!
//! Command-line tools for DBLite databases.
//!
//! # Commands
//!
//! - `create` - Create a database, optionally seeded with fields
//! - `inspect` - Display database metadata and fields
//! - `fields`, `add-field`, `remove-field` - Manage fields
//! - `get`, `put`, `remove` - Manage entries
//! - `copy` - Copy a database with fresh field identities

mod commands;
mod convert;
mod report;

use clap::{Parser, Subcommand};
use commands::Target;
use dblite_core::{Pin, DEFAULT_COPY_PATH, DEFAULT_PATH};
use report::CliResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// DBLite command-line database tools.
#[derive(Parser)]
#[command(name = "dblite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the database file
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Database pin
    #[arg(global = true, long, allow_negative_numbers = true)]
    pin: Option<i64>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new database, overwriting any existing file
    Create {
        /// Empty fields to create
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },

    /// Display database metadata and fields
    Inspect {
        /// Show every entry
        #[arg(short, long)]
        entries: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List fields
    Fields,

    /// Add an empty field
    AddField {
        /// Field name
        name: String,
    },

    /// Remove the first field with this name
    RemoveField {
        /// Field name
        name: String,
    },

    /// Print an entry as JSON
    Get {
        /// Field name
        field: String,
        /// Entry identifier
        identifier: String,
        /// Treat the identifier as text even if it is numeric
        #[arg(long)]
        text_id: bool,
    },

    /// Store a JSON value under an identifier
    Put {
        /// Field name
        field: String,
        /// Entry identifier
        identifier: String,
        /// Value as JSON
        json: String,
        /// Treat the identifier as text even if it is numeric
        #[arg(long)]
        text_id: bool,
    },

    /// Remove an entry
    Remove {
        /// Field name
        field: String,
        /// Entry identifier
        identifier: String,
        /// Treat the identifier as text even if it is numeric
        #[arg(long)]
        text_id: bool,
    },

    /// Copy the database with fresh field identities
    Copy {
        /// Destination path
        new_path: Option<PathBuf>,
        /// Pin for the copy
        #[arg(long, allow_negative_numbers = true)]
        new_pin: Option<i64>,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", report::render(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let target = Target {
        path: cli.path.unwrap_or_else(|| PathBuf::from(DEFAULT_PATH)),
        pin: cli.pin.map(Pin::new),
    };

    match cli.command {
        Commands::Create { fields } => commands::create::run(&target, &fields)?,
        Commands::Inspect { entries, format } => commands::inspect::run(&target, entries, &format)?,
        Commands::Fields => commands::fields::list(&target)?,
        Commands::AddField { name } => commands::fields::add(&target, &name)?,
        Commands::RemoveField { name } => commands::fields::remove(&target, &name)?,
        Commands::Get {
            field,
            identifier,
            text_id,
        } => {
            let identifier = convert::parse_identifier(&identifier, text_id);
            commands::entries::get(&target, &field, identifier)?;
        }
        Commands::Put {
            field,
            identifier,
            json,
            text_id,
        } => {
            let identifier = convert::parse_identifier(&identifier, text_id);
            commands::entries::put(&target, &field, identifier, &json)?;
        }
        Commands::Remove {
            field,
            identifier,
            text_id,
        } => {
            let identifier = convert::parse_identifier(&identifier, text_id);
            commands::entries::remove(&target, &field, identifier)?;
        }
        Commands::Copy { new_path, new_pin } => {
            let new_path = new_path.unwrap_or_else(|| PathBuf::from(DEFAULT_COPY_PATH));
            commands::copy::run(&target, &new_path, new_pin.map(Pin::new))?;
        }
        Commands::Version => {
            println!("DBLite CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("DBLite Core v{}", dblite_core::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_put_with_global_options() {
        let cli = Cli::parse_from([
            "dblite", "put", "users", "1", r#"{"name":"Alice"}"#, "--path", "t.db", "--pin", "1234",
        ]);
        assert_eq!(cli.path, Some(PathBuf::from("t.db")));
        assert_eq!(cli.pin, Some(1234));
        assert!(matches!(cli.command, Commands::Put { ref field, .. } if field == "users"));
    }
}
