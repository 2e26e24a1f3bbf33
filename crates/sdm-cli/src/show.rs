//! # Show Subcommand
//!
//! Prints one type's flattened property table in declaration order.

use std::path::PathBuf;

use clap::Args;

use crate::load;

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// The entity type to show.
    pub type_name: String,

    /// Vocabulary directory to load.
    #[arg(long, value_name = "DIR")]
    pub vocab: PathBuf,
}

/// Print a type's ancestry and flattened property table.
pub fn run(args: &ShowArgs) -> anyhow::Result<()> {
    let registry = load::registry(&args.vocab)?;
    let definition = registry.resolve(&args.type_name)?;
    let table = registry.composed_properties(&args.type_name)?;

    println!("{}  <{}>", definition.name(), definition.external_iri());
    if !definition.description().is_empty() {
        println!("  {}", definition.description());
    }
    let ancestors = registry.ancestors(&args.type_name)?;
    if !ancestors.is_empty() {
        let chain: Vec<&str> = ancestors.iter().map(|t| t.as_str()).collect();
        println!("  ancestors: {}", chain.join(" -> "));
    }
    println!();
    for contract in table.iter() {
        println!("  {}: {}", contract.name(), contract.expected_summary());
        if !contract.description().is_empty() {
            println!("      {}", contract.description());
        }
    }
    Ok(())
}
