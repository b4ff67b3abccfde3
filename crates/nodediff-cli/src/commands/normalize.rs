//! Normalize command
//!
//! Usage: nodediff normalize --input <FILE> [--name <NAME>]

use clap::Args;
use nodediff_core::normalize::normalize;
use nodediff_store::loader::load_node_set;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Node set to normalize (YAML)
    #[arg(long)]
    pub input: PathBuf,

    /// Only print nodes with this name
    #[arg(long)]
    pub name: Option<String>,
}

/// Execute normalize command
///
/// Prints one JSON object per node: the canonical field map.
pub fn execute(args: NormalizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let set = load_node_set(&args.input)?;

    for node in set.iter() {
        if args.name.as_deref().is_some_and(|name| name != node.name()) {
            continue;
        }
        let fields = normalize(node).to_field_map();
        println!("{}", serde_json::to_string(&fields)?);
    }

    Ok(())
}
