//! Native collaborator traits
//!
//! The entity core never touches engine structures directly. Everything it
//! needs is expressed as one of these traits and supplied by the plugin
//! bridge at load time (or by in-memory fakes in tests).
//!
//! ```text
//! EdictSource ── edict(index) ──▶ Edict ── get_prop(path) ──▶ PropertyAccess
//!      │                            │
//!      └── player_info(edict) ──▶ NativeInstance
//!
//! MemoryAccess  GetLoc<Type> / SetLoc<Type> at base + offset
//! NativeCaller  BoundCall { symbol, args } ──▶ Value
//! ```

use std::sync::Arc;

use sprust_sdk::Address;

use crate::error::EngineError;
use crate::value::Value;

/// A native object whose attributes can be reached by name
///
/// This is the unit of the entity's instance set: the edict itself, and
/// secondary objects such as a player's `IPlayerInfo`.
pub trait NativeInstance: Send + Sync {
    /// Name of the native type, for diagnostics
    fn instance_name(&self) -> &'static str;

    /// Check if the object natively exposes the attribute
    fn has_attr(&self, name: &str) -> bool;

    /// Read an attribute the object exposes
    fn get_attr(&self, name: &str) -> Result<Value, EngineError>;

    /// Write an attribute the object exposes
    fn set_attr(&self, name: &str, value: Value) -> Result<(), EngineError>;
}

/// A networked property located on an edict
///
/// Typed operations are looked up by name (`get_Int`, `set_Float`, ...).
pub trait PropertyAccess: Send + Sync {
    /// Check if the property exposes the named operation
    fn has_operation(&self, operation: &str) -> bool;

    /// Invoke a reader operation
    fn read(&self, operation: &str) -> Result<Value, EngineError>;

    /// Invoke a writer operation
    fn write(&self, operation: &str, value: Value) -> Result<(), EngineError>;
}

/// An engine entity slot (`edict_t`)
pub trait Edict: NativeInstance {
    /// Entity index of this slot
    fn index(&self) -> u32;

    /// Check if the slot is on the free list
    fn is_free(&self) -> bool;

    /// Check if the slot holds a usable entity
    fn is_valid(&self) -> bool;

    /// Entity classname (e.g. "player", "prop_physics")
    fn class_name(&self) -> String;

    /// Base pointer of the server entity (`IServerUnknown::GetBaseEntity`)
    fn base_entity(&self) -> Address;

    /// Serial-qualified entity handle as its raw integer
    fn ref_ehandle(&self) -> u32;

    /// Locate a networked property by its path
    fn get_prop(&self, path: &str) -> Result<Arc<dyn PropertyAccess>, EngineError>;

    /// Read a key value by name
    fn get_key_value(&self, name: &str) -> Result<Value, EngineError>;

    /// Check if the edict exposes the named key value writer
    fn has_key_value_writer(&self, operation: &str) -> bool;

    /// Write a key value through the named writer (`SetKeyValueString`, ...)
    fn set_key_value(&self, operation: &str, name: &str, value: Value) -> Result<(), EngineError>;

    /// View the edict as a plain native instance
    fn as_instance(&self) -> &dyn NativeInstance;
}

/// Resolves entity indices to edicts
pub trait EdictSource: Send + Sync {
    /// Get the edict for an index (`None` when the index is out of range)
    fn edict(&self, index: u32) -> Option<Arc<dyn Edict>>;

    /// Get the `IPlayerInfo` instance for a player edict
    fn player_info(&self, edict: &dyn Edict) -> Option<Arc<dyn NativeInstance>>;

    /// Get the server assigned userid for a player edict
    fn userid(&self, edict: &dyn Edict) -> Option<i32>;
}

/// Typed raw memory access following the `GetLoc<Type>` / `SetLoc<Type>` convention
pub trait MemoryAccess: Send + Sync {
    /// Check if the named accessor exists
    fn has_accessor(&self, operation: &str) -> bool;

    /// Read a typed value at `address`
    fn read(&self, operation: &str, address: Address) -> Result<Value, EngineError>;

    /// Write a typed value at `address`
    fn write(&self, operation: &str, address: Address, value: Value) -> Result<(), EngineError>;
}

/// A single native function invocation
///
/// Built per call and carrying everything the call needs, including an
/// injected entity pointer, so two calls never share argument state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCall {
    symbol: String,
    args: Vec<Value>,
}

impl BoundCall {
    /// Create a call to `symbol` with the full native argument list
    pub fn new(symbol: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            symbol: symbol.into(),
            args,
        }
    }

    /// Native symbol to invoke
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Full argument list, injected pointer included
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Invokes native functions by symbol
pub trait NativeCaller: Send + Sync {
    /// Perform the call and return the native result unchanged
    fn call(&self, call: &BoundCall) -> Result<Value, EngineError>;
}
