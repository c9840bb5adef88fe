//! sprust Core - Entity Attribute Resolution
//!
//! This crate contains the entity facade of the sprust framework and its
//! initialization and shutdown logic.
//!
//! # Overview
//!
//! - [`registry`] - Descriptor tables keyed by capability tag
//! - [`entities`] - Entity handles, attribute resolution, native functions, color
//! - [`config`] - Core configuration file
//! - [`logging`] - Tracing subscriber setup
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Native type definitions and raw addresses
//! - [`engine`] - Engine collaborators and global storage

use tracing::info;

// Re-export SDK and engine crates
pub use sprust_engine as engine;
pub use sprust_sdk as sdk;

pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use config::{ConfigError, ConfigResult, CoreConfig};
pub use entities::{BoundFunction, Color, EntityHandle, EntityKind, Resolved, BASE, PLAYER};
pub use error::{EntityError, EntityResult, InitError};
pub use registry::{init_registry, registry, try_registry, AttributeRegistry, RegistryError};

/// Initialize the core
///
/// Called once from the plugin bridge after it has built the engine
/// collaborators: loads `core.toml`, installs logging, stores the engine
/// globals and loads the descriptor registry.
pub fn init(globals: engine::EngineGlobals) -> Result<(), InitError> {
    let config = CoreConfig::load()?;
    logging::init(&config);

    info!("sprust loading (config version {})", config.version);

    engine::init_engine(globals)?;

    let path = config.registry_path()?;
    registry::init_registry_from_file(&path)?;
    info!("Descriptor registry loaded from {:?}", path);

    Ok(())
}

/// Shutdown the core
///
/// Called from the plugin bridge when the plugin is unloaded.
pub fn shutdown() {
    info!("sprust shutting down...");
}
