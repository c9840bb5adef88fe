//! Error types for native engine operations

/// Error type for operations performed by engine collaborators
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Engine globals were accessed before `init_engine`
    #[error("Engine not initialized")]
    NotInitialized,

    /// Engine already initialized
    #[error("Engine already initialized")]
    AlreadyInitialized,

    /// Networked property path does not exist on the edict
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// Attribute does not exist on a native instance
    #[error("Attribute not found on {instance}: {name}")]
    AttributeNotFound { instance: &'static str, name: String },

    /// The native object has no operation with this name
    #[error("Unsupported native operation: {0}")]
    UnsupportedOperation(String),

    /// The value passed to a native writer has the wrong shape
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: &'static str },

    /// A raw memory access was attempted through a null address
    #[error("Null pointer access")]
    NullPointer,

    /// A native function reported failure
    #[error("Native call failed: {0}")]
    CallFailed(String),
}
