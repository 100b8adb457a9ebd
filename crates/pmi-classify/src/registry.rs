//! Model-to-schema registry.
//!
//! Built once at startup from the compiled-in catalog, optionally extended
//! with JSON schema files, then never mutated. Lookup is exact by model
//! string; there is no partial or fuzzy matching.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use pmi_model::{ClassifyError, Schema, SchemaError, SchemaSpec};

use crate::builtin;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Immutable mapping from exact model name to compiled [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The compiled-in model catalog.
    pub fn builtin() -> Result<Self, SchemaError> {
        let mut registry = Self::empty();
        for spec in builtin::specs() {
            registry.insert(Schema::compile(spec)?)?;
        }
        Ok(registry)
    }

    /// Register a compiled schema. Duplicate model names are rejected.
    pub fn insert(&mut self, schema: Schema) -> Result<(), SchemaError> {
        if self.schemas.contains_key(&schema.model) {
            return Err(SchemaError::DuplicateModel {
                model: schema.model,
            });
        }
        self.schemas.insert(schema.model.clone(), schema);
        Ok(())
    }

    /// Compile and register every spec in a JSON schema file.
    ///
    /// The file holds an array of schema specs. Returns the number of
    /// schemas added.
    pub fn load_schema_file(&mut self, path: &Path) -> Result<usize, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let specs: Vec<SchemaSpec> =
            serde_json::from_str(&contents).map_err(|source| RegistryError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let added = specs.len();
        for spec in specs {
            self.insert(Schema::compile(spec)?)?;
        }
        debug!(path = %path.display(), added, "loaded schema file");
        Ok(added)
    }

    pub fn get(&self, model: &str) -> Option<&Schema> {
        self.schemas.get(model)
    }

    /// Exact lookup, failing with [`ClassifyError::UnknownModel`] naming the
    /// offending string.
    pub fn lookup(&self, model: &str) -> Result<&Schema, ClassifyError> {
        self.get(model).ok_or_else(|| ClassifyError::UnknownModel {
            model: model.to_string(),
        })
    }

    /// Registered schemas in model-name order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
