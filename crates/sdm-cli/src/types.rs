//! # Types Subcommand
//!
//! Lists every registered entity type with its parent and flattened
//! property count.

use std::path::PathBuf;

use clap::Args;

use crate::load;

/// Arguments for the types subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Vocabulary directory to load.
    #[arg(long, value_name = "DIR")]
    pub vocab: PathBuf,
}

/// List registered types in name order.
pub fn run(args: &TypesArgs) -> anyhow::Result<()> {
    let registry = load::registry(&args.vocab)?;
    for name in registry.type_names() {
        let definition = registry.resolve(name.as_str())?;
        let table = registry.composed_properties(name.as_str())?;
        match definition.parent() {
            Some(parent) => {
                println!("{name}  (parent: {parent}, {} properties)", table.len());
            }
            None => println!("{name}  (root, {} properties)", table.len()),
        }
    }
    Ok(())
}
