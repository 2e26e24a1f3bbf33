//! # Vocabulary Data Loader
//!
//! Loads declarative vocabulary files into a [`RegistryBuilder`]. Each
//! `*.vocab.json` file carries capability modules and/or type definitions;
//! a vocabulary may be split across any number of files, and cross-file
//! references (parents, composed modules) resolve at build time.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "modules": [
//!     {
//!       "id": "thing",
//!       "properties": [
//!         { "name": "name", "types": ["Text", "Text[]"],
//!           "description": "The name of the item." }
//!       ]
//!     }
//!   ],
//!   "types": [
//!     {
//!       "name": "Thing",
//!       "iri": "https://schema.org/Thing",
//!       "description": "The most generic type of item.",
//!       "modules": ["thing"],
//!       "rules": {
//!         "google": { "required": ["name"], "recommended": ["url"] }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Property `types` use the vocabulary notation of
//! [`TypeAlternative::parse`]; `"overrides": true` on a property marks an
//! intentional narrowing of an inherited declaration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use sdm_core::{ModuleId, PropertyName, Scope, TypeName};

use crate::contract::{PropertyContract, TypeAlternative};
use crate::definition::{EntityTypeDefinition, RuleSet};
use crate::error::RegistryError;
use crate::module::CapabilityModule;
use crate::registry::{RegistryBuilder, VocabularyRegistry};

/// Errors while loading vocabulary data files.
#[derive(Error, Debug)]
pub enum VocabLoadError {
    /// The vocabulary directory could not be read.
    #[error("cannot read vocabulary directory '{dir}': {reason}")]
    DirectoryRead {
        /// The directory that failed.
        dir: String,
        /// Why it failed.
        reason: String,
    },

    /// A vocabulary file could not be read or parsed as JSON.
    #[error("vocabulary file '{path}': {reason}")]
    InvalidFile {
        /// The file that failed.
        path: String,
        /// Why it failed.
        reason: String,
    },

    /// The parsed data contained an invalid identifier or notation.
    #[error("vocabulary file '{path}': {reason}")]
    InvalidData {
        /// The file with bad data.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The assembled vocabulary failed registry construction.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Raw File Shapes ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawVocabFile {
    #[serde(default)]
    modules: Vec<RawModule>,
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawModule {
    id: String,
    properties: Vec<RawProperty>,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    types: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    overrides: bool,
}

#[derive(Debug, Deserialize)]
struct RawType {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    iri: String,
    #[serde(default)]
    description: String,
    modules: Vec<String>,
    #[serde(default)]
    rules: BTreeMap<String, RawRuleSet>,
}

#[derive(Debug, Deserialize, Default)]
struct RawRuleSet {
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    recommended: Vec<String>,
}

// ─── Loader ──────────────────────────────────────────────────────────

/// Accumulates vocabulary data files and builds the registry.
#[derive(Debug, Default)]
pub struct VocabularyLoader {
    builder: RegistryBuilder,
    files: Vec<PathBuf>,
}

impl VocabularyLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.vocab.json` file in a directory, in filename order
    /// (so load results are deterministic across platforms).
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<&mut Self, VocabLoadError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| VocabLoadError::DirectoryRead {
            dir: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.ends_with(".vocab.json") {
                    paths.push(path);
                }
            }
        }
        paths.sort();

        for path in paths {
            self.load_file(&path)?;
        }
        Ok(self)
    }

    /// Load a single vocabulary file.
    pub fn load_file(&mut self, path: &Path) -> Result<&mut Self, VocabLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| VocabLoadError::InvalidFile {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        self.load_str(&path.display().to_string(), &content)?;
        self.files.push(path.to_path_buf());
        Ok(self)
    }

    /// Load vocabulary data from a JSON string. `source` names the origin
    /// for error messages.
    pub fn load_str(&mut self, source: &str, content: &str) -> Result<&mut Self, VocabLoadError> {
        let raw: RawVocabFile =
            serde_json::from_str(content).map_err(|e| VocabLoadError::InvalidFile {
                path: source.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;

        for raw_module in raw.modules {
            let module = convert_module(source, raw_module)?;
            self.builder.register_module(module)?;
        }
        for raw_type in raw.types {
            let definition = convert_type(source, raw_type)?;
            self.builder.register_type(definition)?;
        }
        tracing::debug!(source, "vocabulary data loaded");
        Ok(self)
    }

    /// Build the registry from everything loaded so far.
    pub fn build(self) -> Result<VocabularyRegistry, VocabLoadError> {
        Ok(self.builder.build()?)
    }
}

fn invalid(source: &str, reason: impl std::fmt::Display) -> VocabLoadError {
    VocabLoadError::InvalidData {
        path: source.to_string(),
        reason: reason.to_string(),
    }
}

fn convert_module(source: &str, raw: RawModule) -> Result<CapabilityModule, VocabLoadError> {
    let id = ModuleId::new(raw.id).map_err(|e| invalid(source, e))?;
    let mut properties = Vec::with_capacity(raw.properties.len());
    for raw_prop in raw.properties {
        let name = PropertyName::new(raw_prop.name).map_err(|e| invalid(source, e))?;
        let mut alternatives = Vec::with_capacity(raw_prop.types.len());
        for notation in &raw_prop.types {
            alternatives.push(TypeAlternative::parse(notation).map_err(|e| invalid(source, e))?);
        }
        let mut contract = PropertyContract::new(name, alternatives, raw_prop.description)?;
        if raw_prop.overrides {
            contract = contract.with_override();
        }
        properties.push(contract);
    }
    Ok(CapabilityModule::new(id, properties))
}

fn convert_type(source: &str, raw: RawType) -> Result<EntityTypeDefinition, VocabLoadError> {
    let name = TypeName::new(raw.name).map_err(|e| invalid(source, e))?;
    let parent = match raw.parent {
        Some(p) => Some(TypeName::new(p).map_err(|e| invalid(source, e))?),
        None => None,
    };
    let mut modules = Vec::with_capacity(raw.modules.len());
    for id in raw.modules {
        modules.push(ModuleId::new(id).map_err(|e| invalid(source, e))?);
    }
    let mut definition =
        EntityTypeDefinition::new(name, parent, raw.iri, raw.description, modules);
    for (scope, raw_rules) in raw.rules {
        let scope = Scope::new(scope).map_err(|e| invalid(source, e))?;
        let required = raw_rules
            .required
            .into_iter()
            .map(|p| PropertyName::new(p).map_err(|e| invalid(source, e)))
            .collect::<Result<Vec<_>, _>>()?;
        let recommended = raw_rules
            .recommended
            .into_iter()
            .map(|p| PropertyName::new(p).map_err(|e| invalid(source, e)))
            .collect::<Result<Vec<_>, _>>()?;
        definition = definition.with_rule_set(RuleSet::new(scope, required, recommended));
    }
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "modules": [
            {
                "id": "thing",
                "properties": [
                    { "name": "name", "types": ["Text", "Text[]"],
                      "description": "The name of the item." },
                    { "name": "url", "types": ["URL", "URL[]"] }
                ]
            }
        ],
        "types": [
            {
                "name": "Thing",
                "iri": "https://schema.org/Thing",
                "description": "The most generic type of item.",
                "modules": ["thing"],
                "rules": {
                    "google": { "required": ["name"], "recommended": ["url"] }
                }
            }
        ]
    }"#;

    #[test]
    fn test_load_str_builds_registry() {
        let mut loader = VocabularyLoader::new();
        loader.load_str("inline", SAMPLE).unwrap();
        let registry = loader.build().unwrap();
        assert_eq!(registry.len(), 1);

        let table = registry.composed_properties("Thing").unwrap();
        assert!(table.contains("name"));
        assert_eq!(table.get("url").unwrap().expected_summary(), "URL, URL[]");

        let def = registry.resolve("Thing").unwrap();
        let google = Scope::new("google").unwrap();
        let rules = def.rule_set(&google).unwrap();
        assert_eq!(rules.required().count(), 1);
    }

    #[test]
    fn test_invalid_json_reports_source() {
        let mut loader = VocabularyLoader::new();
        let err = loader.load_str("broken.vocab.json", "{ not json").unwrap_err();
        match err {
            VocabLoadError::InvalidFile { path, .. } => {
                assert_eq!(path, "broken.vocab.json");
            }
            other => panic!("expected InvalidFile, got: {other}"),
        }
    }

    #[test]
    fn test_empty_type_list_rejected_via_contract() {
        let content = r#"{
            "modules": [
                { "id": "bad", "properties": [ { "name": "x", "types": [] } ] }
            ]
        }"#;
        let mut loader = VocabularyLoader::new();
        let err = loader.load_str("inline", content).unwrap_err();
        assert!(matches!(err, VocabLoadError::Registry(RegistryError::EmptyAlternatives { .. })));
    }

    #[test]
    fn test_duplicate_module_across_files_rejected() {
        let module_only = r#"{
            "modules": [
                { "id": "thing", "properties": [ { "name": "name", "types": ["Text"] } ] }
            ]
        }"#;
        let mut loader = VocabularyLoader::new();
        loader.load_str("a", module_only).unwrap();
        let err = loader.load_str("b", module_only).unwrap_err();
        assert!(matches!(err, VocabLoadError::Registry(RegistryError::DuplicateModule { .. })));
    }
}
