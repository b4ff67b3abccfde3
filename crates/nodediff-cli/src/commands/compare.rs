//! Compare command
//!
//! Usage: nodediff compare --before <FILE> --after <FILE> [--report <FILE>]

use super::Outcome;
use clap::Args;
use nodediff_core::compare::compare;
use nodediff_core::report::{render_human_summary, SummaryOptions};
use nodediff_store::loader::load_node_set;
use nodediff_store::report::write_report;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Node set before conversion (YAML)
    #[arg(long)]
    pub before: PathBuf,

    /// Node set after conversion (YAML)
    #[arg(long)]
    pub after: PathBuf,

    /// Where to write the JSON report
    #[arg(long, default_value = "comparison_report.json")]
    pub report: PathBuf,

    /// Skip writing the JSON report
    #[arg(long, conflicts_with = "report")]
    pub no_report: bool,

    /// Example issues shown per protocol type
    #[arg(long, default_value_t = 3)]
    pub max_examples: usize,

    /// Example diffs shown per protocol type in the all-differences listing
    #[arg(long, default_value_t = 5)]
    pub max_type_examples: usize,

    /// Hide credential values in the printed summary
    #[arg(long)]
    pub redact: bool,

    /// Exit with status 2 when differences needing attention exist
    #[arg(long)]
    pub fail_on_issues: bool,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let before = load_node_set(&args.before)?;
    let after = load_node_set(&args.after)?;

    let result = compare(&before, &after);

    let options = SummaryOptions {
        max_examples: args.max_examples,
        max_type_examples: args.max_type_examples,
        redact_secrets: args.redact,
    };
    print!("{}", render_human_summary(&result, &options));

    if !args.no_report {
        write_report(&args.report, &result)?;
        println!("\nDetailed report saved to: {}", args.report.display());
    }

    if args.fail_on_issues && result.has_actual_issues() {
        Ok(Outcome::IssuesFound)
    } else {
        Ok(Outcome::Clean)
    }
}
