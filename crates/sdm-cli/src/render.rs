//! # Render Subcommand
//!
//! Renders an instance document as a JSON-LD document.

use std::path::PathBuf;

use clap::Args;

use sdm_serialize::to_json_ld;

use crate::{input, load, validate};

/// Arguments for the render subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Instance document to render.
    pub instance: PathBuf,

    /// Vocabulary directory to load.
    #[arg(long, value_name = "DIR")]
    pub vocab: PathBuf,
}

/// Render the document to stdout.
pub fn run(args: &RenderArgs) -> anyhow::Result<()> {
    let registry = load::registry(&args.vocab)?;
    let json = validate::read_document(&args.instance)?;
    let handle = input::parse_document(&registry, &json)?;
    let document = to_json_ld(&registry, &handle)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
