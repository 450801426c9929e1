//! Schema registry for loading, managing, and accessing SCIM schemas.
//!
//! A [`SchemaRegistry`] maps schema ids to shape-checked [`Schema`]s. It is
//! built once, from the bundled RFC 7643 schemas, a directory of schema
//! documents, explicitly supplied schemas, or any mix of these, and is only
//! read afterwards.

use super::embedded;
use super::model::Schema;
use crate::error::{ScimError, ScimResult};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Registry of SCIM schemas keyed by schema id.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create a registry holding the bundled User, Group and Enterprise User schemas.
    pub fn new() -> ScimResult<Self> {
        Self::builder().build()
    }

    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start configuring a registry.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// The bundled core resource schemas (User and Group).
    pub fn core_schemas() -> ScimResult<Self> {
        Ok(Self::from_schemas(embedded::core_schemas()?))
    }

    /// The bundled extension schemas (Enterprise User).
    pub fn extension_schemas() -> ScimResult<Self> {
        Ok(Self::from_schemas(embedded::extension_schemas()?))
    }

    /// Create a registry by loading every `*.json` schema document in a directory.
    ///
    /// Schemas are keyed by their `id`, not by file name. A document that
    /// fails to parse or to pass its shape check fails the whole load.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> ScimResult<Self> {
        let mut registry = Self::empty();
        registry.load_schema_dir(schema_dir.as_ref())?;
        Ok(registry)
    }

    fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> Self {
        let mut registry = Self::empty();
        for schema in schemas {
            registry.add_schema(schema);
        }
        registry
    }

    fn load_schema_dir(&mut self, schema_dir: &Path) -> ScimResult<()> {
        let mut paths: Vec<PathBuf> = fs::read_dir(schema_dir)
            .map_err(|e| ScimError::while_loading(schema_dir.display().to_string(), e.into()))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .collect();
        paths.sort();

        for path in paths {
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                warn!("Skipping non-JSON file in schema directory: {}", path.display());
                continue;
            }
            let schema = Self::load_schema_from_file(&path).inspect_err(|e| {
                warn!("Rejected schema document {}: {}", path.display(), e);
            })?;
            self.add_schema(schema);
        }
        Ok(())
    }

    /// Load a schema from a JSON file.
    fn load_schema_from_file(path: &Path) -> ScimResult<Schema> {
        File::open(path)
            .map_err(ScimError::from)
            .and_then(|file| Schema::load(BufReader::new(file)))
            .map_err(|e| ScimError::while_loading(path.display().to_string(), e))
    }

    /// Get all registered schemas, ordered by id.
    pub fn get_schemas(&self) -> Vec<&Schema> {
        let mut schemas: Vec<&Schema> = self.schemas.values().collect();
        schemas.sort_by(|a, b| a.id().cmp(b.id()));
        schemas
    }

    /// Get a specific schema by ID.
    pub fn get_schema(&self, id: &str) -> Option<&Schema> {
        self.schemas.get(id)
    }

    /// Get a schema by ID, failing with [`ScimError::SchemaNotFound`].
    pub fn require_schema(&self, id: &str) -> ScimResult<&Schema> {
        self.get_schema(id).ok_or_else(|| ScimError::schema_not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.schemas.contains_key(id)
    }

    /// Add a schema, returning the one it replaced if the id was already registered.
    pub fn add_schema(&mut self, schema: Schema) -> Option<Schema> {
        let id = schema.id().to_string();
        debug!("Registering schema {}", id);
        let replaced = self.schemas.insert(id, schema);
        if let Some(previous) = &replaced {
            warn!("Schema {} registered twice, keeping the latest", previous.id());
        }
        replaced
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Builder for schema registries.
pub struct SchemaRegistryBuilder {
    embedded_schemas: bool,
    schema_dirs: Vec<PathBuf>,
    schemas: Vec<Schema>,
}

impl SchemaRegistryBuilder {
    /// Create a new registry builder that includes the bundled schemas.
    pub fn new() -> Self {
        Self {
            embedded_schemas: true,
            schema_dirs: Vec::new(),
            schemas: Vec::new(),
        }
    }

    /// Include (or leave out) the bundled User, Group and Enterprise User schemas.
    pub fn with_embedded_schemas(mut self, enabled: bool) -> Self {
        self.embedded_schemas = enabled;
        self
    }

    /// Load every `*.json` schema document in a directory.
    pub fn with_schema_dir(mut self, schema_dir: impl Into<PathBuf>) -> Self {
        self.schema_dirs.push(schema_dir.into());
        self
    }

    /// Register an already constructed schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Build the registry. Later sources replace earlier ones with the same id.
    pub fn build(self) -> ScimResult<SchemaRegistry> {
        let mut registry = SchemaRegistry::empty();
        if self.embedded_schemas {
            for schema in embedded::core_schemas()?
                .into_iter()
                .chain(embedded::extension_schemas()?)
            {
                registry.add_schema(schema);
            }
        }
        for schema_dir in &self.schema_dirs {
            registry.load_schema_dir(schema_dir)?;
        }
        for schema in self.schemas {
            registry.add_schema(schema);
        }
        debug!("Built schema registry with {} schemas", registry.len());
        Ok(registry)
    }
}

impl Default for SchemaRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
