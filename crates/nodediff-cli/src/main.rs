//! nodediff CLI
//!
//! Command-line interface for auditing proxy node conversions

use clap::{Parser, Subcommand, ValueEnum};
use nodediff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "nodediff")]
#[command(about = "nodediff - Audit proxy node conversions against mihomo semantics", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare a node set before and after conversion
    Compare(commands::compare::CompareArgs),
    /// Print the canonical form of every node in a set
    Normalize(commands::normalize::NormalizeArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_format.into());

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Normalize(args) => {
            commands::normalize::execute(args).map(|()| commands::Outcome::Clean)
        }
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
