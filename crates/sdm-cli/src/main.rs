//! # sdm CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// SDM CLI — structured data modeling toolchain.
///
/// Loads a declarative vocabulary, inspects its composed types, validates
/// instance documents under audience scopes, and renders JSON-LD.
#[derive(Parser, Debug)]
#[command(name = "sdm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List registered entity types.
    Types(sdm_cli::types::TypesArgs),
    /// Show a type's flattened property table.
    Show(sdm_cli::show::ShowArgs),
    /// Validate an instance document.
    Validate(sdm_cli::validate::ValidateArgs),
    /// Render an instance document as JSON-LD.
    Render(sdm_cli::render::RenderArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Types(args) => sdm_cli::types::run(&args)?,
        Commands::Show(args) => sdm_cli::show::run(&args)?,
        Commands::Validate(args) => {
            if sdm_cli::validate::run(&args)? {
                std::process::exit(1);
            }
        }
        Commands::Render(args) => sdm_cli::render::run(&args)?,
    }

    Ok(())
}
