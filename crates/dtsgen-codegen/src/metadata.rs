//! Metadata documents produced by a reflector over compiled modules.
//!
//! Each document describes one module (assembly) and the types it defines:
//!
//! ```json
//! {
//!   "module": "Shop.Backend",
//!   "types": [
//!     {
//!       "fullName": "Shop.Pages.HomePage",
//!       "interfaces": ["Shop.Contracts.IPage"],
//!       "properties": [
//!         { "name": "Title", "type": { "fullName": "System.String", "module": "System.Private.CoreLib" } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Type definitions that omit `module` belong to the document's module. Every
//! loaded module counts as a project module during generation.

use crate::error::MetadataError;
use crate::types::{TypeDefinition, TypeKey};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Lookup of reflected type definitions.
///
/// The generator only needs member lists for project-owned types; how they are
/// obtained is up to the implementation.
pub trait MetadataSource {
    fn definition(&self, key: &TypeKey) -> Option<&TypeDefinition>;
}

/// One serialized module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub module: String,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

/// Catalog of type definitions loaded from one or more modules.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    modules: IndexSet<String>,
    types: IndexMap<TypeKey, TypeDefinition>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every type of a document.
    pub fn add_document(&mut self, document: MetadataDocument) -> Result<&mut Self, MetadataError> {
        self.modules.insert(document.module.clone());
        for mut definition in document.types {
            if definition.descriptor.module.is_empty() {
                definition.descriptor.module = document.module.clone();
            }
            self.add_type(definition)?;
        }
        Ok(self)
    }

    /// Add a single type definition. Its module becomes a project module.
    pub fn add_type(&mut self, mut definition: TypeDefinition) -> Result<&mut Self, MetadataError> {
        definition.descriptor.fill_names();
        let key = definition.key();
        if self.types.contains_key(&key) {
            return Err(MetadataError::DuplicateType {
                module: key.module,
                full_name: key.full_name,
            });
        }
        self.modules.insert(key.module.clone());
        self.types.insert(key, definition);
        Ok(self)
    }

    /// Parse a document from a JSON string.
    pub fn add_str(&mut self, json: &str) -> Result<&mut Self, MetadataError> {
        let document: MetadataDocument = serde_json::from_str(json)?;
        self.add_document(document)
    }

    /// Load a single JSON document.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, MetadataError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: MetadataDocument =
            serde_json::from_str(&source).map_err(|source| MetadataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            module = %document.module,
            types = document.types.len(),
            "loaded metadata document"
        );
        self.add_document(document)
    }

    /// Recursively scan a directory for `.json` documents, in file name order.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, MetadataError> {
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "json") {
                self.add_file(path)?;
            }
        }
        Ok(self)
    }

    /// Load a file or a directory of files.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, MetadataError> {
        let path = path.as_ref();
        if path.is_dir() {
            self.add_dir(path)
        } else {
            self.add_file(path)
        }
    }

    /// Modules of all loaded documents, in load order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    /// All definitions, in load order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Definitions implementing an interface with the given simple name.
    pub fn types_implementing<'s, 'm>(
        &'s self,
        marker: &'m str,
    ) -> impl Iterator<Item = &'s TypeDefinition> + use<'s, 'm> {
        self.types
            .values()
            .filter(move |t| t.descriptor.implements_named(marker))
    }

    /// Root types for generation: all types implementing the first marker, then
    /// all implementing the second, and so on.
    pub fn roots<'s, M: AsRef<str>>(&'s self, markers: &[M]) -> Vec<&'s TypeDefinition> {
        markers
            .iter()
            .flat_map(|marker| self.types_implementing(marker.as_ref()))
            .collect()
    }
}

impl MetadataSource for Metadata {
    fn definition(&self, key: &TypeKey) -> Option<&TypeDefinition> {
        self.types.get(key)
    }
}
