//! Attribute registry - descriptor tables keyed by capability tag
//!
//! Descriptor tables are loaded from an `entities.json` file deployed with
//! the plugin, so attribute mappings can be updated without recompiling.
//!
//! # File Format
//!
//! ```json
//! {
//!     "entity": {
//!         "properties": {
//!             "health": { "prop": "CBaseEntity.m_iHealth", "type": "Int" },
//!             "isdead": { "prop": "CBasePlayer.pl.deadflag", "type": "Int", "true": 1, "false": 0 }
//!         },
//!         "keyvalues": { "targetname": "String" },
//!         "offsets": {
//!             "movetype": { "type": "UChar", "offset": { "linux": 350, "windows": 346 } }
//!         },
//!         "functions": {
//!             "ignite": { "symbol": "CBaseAnimating::Ignite", "args": ["Pointer", "Float"], "pointer_index": 0 }
//!         }
//!     },
//!     "player": { "properties": { ... } }
//! }
//! ```
//!
//! # Resolution
//!
//! An entity never queries the per-tag tables directly. Its capability set
//! is resolved once into a merged [`DescriptorTable`] which is cached and
//! shared by every entity with the same capability set.

pub mod descriptor;
pub mod table;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use serde::Deserialize;
use sprust_engine::Value;
use thiserror::Error;
use tracing::debug;

pub use descriptor::{
    BooleanValues, Descriptor, FunctionDescriptor, KeyValueDescriptor, OffsetDescriptor,
    OffsetValue, PropertyDescriptor, SemanticType, NO_POINTER,
};
pub use table::{CapabilitySet, DescriptorTable, BASE_CAPABILITY};

/// Errors that can occur when loading the attribute registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read registry file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse registry JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A boolean property declared only one of its sentinels
    #[error("Property {tag}.{name} must declare both \"true\" and \"false\" values")]
    IncompleteBoolean { tag: String, name: String },

    #[error("Attribute registry already initialized")]
    AlreadyInitialized,

    #[error("Attribute registry not initialized")]
    NotInitialized,
}

/// Property row as written in the registry file
#[derive(Debug, Deserialize)]
struct RawProperty {
    prop: String,
    #[serde(rename = "type")]
    semantic_type: SemanticType,
    #[serde(rename = "true")]
    on: Option<Value>,
    #[serde(rename = "false")]
    off: Option<Value>,
}

/// Per-tag tables as written in the registry file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTable {
    properties: HashMap<String, RawProperty>,
    keyvalues: HashMap<String, KeyValueDescriptor>,
    offsets: HashMap<String, OffsetDescriptor>,
    functions: HashMap<String, FunctionDescriptor>,
}

impl RawTable {
    fn into_table(self, tag: &str) -> Result<DescriptorTable, RegistryError> {
        let mut table = DescriptorTable::new();

        for (name, raw) in self.properties {
            let mut desc = PropertyDescriptor::new(raw.prop, raw.semantic_type);
            match (raw.on, raw.off) {
                (Some(on), Some(off)) => desc = desc.with_boolean(BooleanValues { on, off }),
                (None, None) => {}
                _ => {
                    return Err(RegistryError::IncompleteBoolean {
                        tag: tag.to_string(),
                        name,
                    })
                }
            }
            table = table.with_property(name, desc);
        }
        for (name, desc) in self.keyvalues {
            table = table.with_keyvalue(name, desc);
        }
        for (name, desc) in self.offsets {
            table = table.with_offset(name, desc);
        }
        for (name, desc) in self.functions {
            table = table.with_function(name, desc);
        }

        Ok(table)
    }
}

/// Descriptor tables for every capability tag
#[derive(Debug, Default)]
pub struct AttributeRegistry {
    tables: HashMap<String, DescriptorTable>,
    /// Merged tables keyed by capability set
    resolved: DashMap<CapabilitySet, Arc<DescriptorTable>>,
}

/// Global registry instance
static REGISTRY: OnceLock<AttributeRegistry> = OnceLock::new();

impl AttributeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load a registry from a JSON string
    pub fn load_from_str(json: &str) -> Result<Self, RegistryError> {
        let raw: HashMap<String, RawTable> = serde_json::from_str(json)?;

        let mut registry = AttributeRegistry::default();
        for (tag, table) in raw {
            let table = table.into_table(&tag)?;
            registry.tables.insert(tag, table);
        }

        tracing::info!(
            "Loaded attribute registry: {} tags, {} descriptors",
            registry.tables.len(),
            registry.tables.values().map(DescriptorTable::len).sum::<usize>()
        );

        Ok(registry)
    }

    /// Add (or replace) the table for a tag
    pub fn with_table(mut self, tag: impl Into<String>, table: DescriptorTable) -> Self {
        self.tables.insert(tag.into(), table);
        self.resolved.clear();
        self
    }

    /// Get the unmerged table for a single tag
    pub fn table(&self, tag: &str) -> Option<&DescriptorTable> {
        self.tables.get(tag)
    }

    /// Iterate known tags
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Resolve the merged descriptor table for a capability set
    ///
    /// Tables are merged in capability order, so a later tag's row shadows
    /// an earlier tag's row of the same name and kind. The result is
    /// computed once per capability set.
    pub fn resolve(&self, capabilities: &CapabilitySet) -> Arc<DescriptorTable> {
        if let Some(entry) = self.resolved.get(capabilities) {
            return Arc::clone(entry.value());
        }

        let mut merged = DescriptorTable::new();
        for tag in capabilities.iter() {
            if let Some(table) = self.tables.get(tag) {
                merged.merge(table);
            }
        }

        debug!(
            "Resolved descriptor table for {:?}: {} descriptors",
            capabilities.as_slice(),
            merged.len()
        );

        let merged = Arc::new(merged);
        self.resolved
            .entry(capabilities.clone())
            .or_insert(merged)
            .value()
            .clone()
    }

    /// Number of cached capability sets
    pub fn cached_sets(&self) -> usize {
        self.resolved.len()
    }
}

/// Initialize the global registry
pub fn init_registry(registry: AttributeRegistry) -> Result<(), RegistryError> {
    REGISTRY
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInitialized)
}

/// Initialize the global registry from a file
pub fn init_registry_from_file<P: AsRef<Path>>(path: P) -> Result<(), RegistryError> {
    init_registry(AttributeRegistry::load_from_file(path)?)
}

/// Get the global registry instance
pub fn registry() -> Result<&'static AttributeRegistry, RegistryError> {
    REGISTRY.get().ok_or(RegistryError::NotInitialized)
}

/// Try to get the global registry instance
pub fn try_registry() -> Option<&'static AttributeRegistry> {
    REGISTRY.get()
}
