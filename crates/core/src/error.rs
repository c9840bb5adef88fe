//! Error types for entity attribute access

use sprust_engine::EngineError;

use crate::config::ConfigError;
use crate::registry::RegistryError;

/// Error type for entity handle construction and attribute access
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// The entity slot is free or otherwise unusable
    #[error("Index \"{0}\" is not a proper entity index")]
    InvalidIndex(u32),

    /// No instance, computed attribute or descriptor matches the name
    #[error("Attribute \"{0}\" not found")]
    AttributeNotFound(String),

    /// The networked property has no `get_<Type>` / `set_<Type>` operation
    #[error("Invalid property type \"{0}\"")]
    UnsupportedPropertyType(String),

    /// The memory layer has no `GetLoc<Type>` / `SetLoc<Type>` accessor
    #[error("Invalid offset type \"{0}\"")]
    UnsupportedOffsetType(String),

    /// The edict has no `SetKeyValue<Type>` writer
    #[error("Invalid keyvalue type \"{0}\"")]
    UnsupportedKeyValueType(String),

    /// Wrong number of values for a color or a native function
    #[error("Expected {expected} arguments, {given} were given")]
    InvalidArgumentCount { expected: String, given: usize },

    /// The attribute is computed and has no setter
    #[error("Attribute \"{0}\" is read-only")]
    ReadOnlyAttribute(String),

    /// The value does not fit what the attribute stores
    #[error("Invalid value for \"{attribute}\": expected {expected}, found {found}")]
    InvalidValue {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A function was resolved where a value was required
    #[error("Attribute \"{0}\" is a function, not a value")]
    NotAValue(String),

    /// The offset has no value for the running platform, or overflows the base pointer
    #[error("Offset for \"{0}\" is not available on this platform")]
    OffsetUnavailable(String),

    /// A dynamically invoked native function failed
    #[error("Native call to {symbol} failed")]
    NativeCall {
        symbol: String,
        #[source]
        source: EngineError,
    },

    /// Any other failure reported by an engine collaborator
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The global attribute registry has not been installed
    #[error("Attribute registry not initialized")]
    RegistryNotInitialized,
}

/// Result type for entity operations
pub type EntityResult<T> = Result<T, EntityError>;

/// Error type for [`crate::init`]
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
