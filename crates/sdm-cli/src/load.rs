//! Vocabulary loading shared by every subcommand.

use std::path::Path;

use anyhow::Context;

use sdm_vocab::{VocabularyLoader, VocabularyRegistry};

/// Load and build a registry from a vocabulary directory.
pub fn registry(dir: &Path) -> anyhow::Result<VocabularyRegistry> {
    let mut loader = VocabularyLoader::new();
    loader
        .load_dir(dir)
        .with_context(|| format!("loading vocabulary from {}", dir.display()))?;
    let registry = loader.build().context("building the vocabulary registry")?;
    tracing::debug!(types = registry.len(), "vocabulary registry built");
    Ok(registry)
}
