//! # Validate Subcommand
//!
//! Validates an instance document against the vocabulary, optionally under
//! an audience scope, and prints the resulting report.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use sdm_core::Scope;
use sdm_validate::Validator;

use crate::{input, load};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Instance document to validate.
    pub instance: PathBuf,

    /// Vocabulary directory to load.
    #[arg(long, value_name = "DIR")]
    pub vocab: PathBuf,

    /// Audience scope to apply required/recommended rules for.
    #[arg(long)]
    pub scope: Option<String>,
}

/// Validate the document; returns whether any errors were reported.
pub fn run(args: &ValidateArgs) -> anyhow::Result<bool> {
    let registry = load::registry(&args.vocab)?;
    let json = read_document(&args.instance)?;
    let handle = input::parse_document(&registry, &json)?;

    let scope = args
        .scope
        .as_deref()
        .map(Scope::new)
        .transpose()
        .context("invalid scope")?;
    let report = Validator::new(&registry).validate(&handle.borrow(), scope.as_ref())?;

    println!("{report}");
    Ok(report.error_count() > 0)
}

pub(crate) fn read_document(path: &PathBuf) -> anyhow::Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
