//! Attribute descriptors
//!
//! A descriptor declares how one named attribute maps onto one of the four
//! native access mechanisms.

use std::fmt;

use serde::Deserialize;
use sprust_engine::Value;

/// Declared semantic type of an attribute (e.g. "Int", "Float", "String")
///
/// The type is only a name: it selects a native accessor by convention and
/// is never interpreted by the resolver itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct SemanticType(String);

impl SemanticType {
    /// Create a semantic type from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the type name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SemanticType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// On-wire values of a boolean property
///
/// Both values are declared so a property with more than two states is
/// never written with a guessed "false".
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanValues {
    /// Value stored for `true`
    pub on: Value,
    /// Value stored for `false`
    pub off: Value,
}

impl BooleanValues {
    /// Create a pair of boolean sentinels
    pub fn new(on: impl Into<Value>, off: impl Into<Value>) -> Self {
        Self {
            on: on.into(),
            off: off.into(),
        }
    }

    /// Sentinel to write for a boolean
    pub fn encode(&self, flag: bool) -> Value {
        if flag {
            self.on.clone()
        } else {
            self.off.clone()
        }
    }

    /// Interpret a raw property value
    pub fn decode(&self, raw: &Value) -> bool {
        *raw == self.on
    }
}

/// A networked property on the edict
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// Property path (e.g. "CBasePlayer.m_iHealth")
    pub path: String,
    /// Selects the `get_<Type>` / `set_<Type>` operations
    pub semantic_type: SemanticType,
    /// Present when the property is exposed as a boolean
    pub boolean: Option<BooleanValues>,
}

impl PropertyDescriptor {
    /// Create a plain property descriptor
    pub fn new(path: impl Into<String>, semantic_type: impl Into<SemanticType>) -> Self {
        Self {
            path: path.into(),
            semantic_type: semantic_type.into(),
            boolean: None,
        }
    }

    /// Expose the property as a boolean with explicit sentinels
    pub fn with_boolean(mut self, values: BooleanValues) -> Self {
        self.boolean = Some(values);
        self
    }
}

/// A key value on the edict, reached by attribute name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct KeyValueDescriptor {
    /// Selects the `SetKeyValue<Type>` writer
    pub semantic_type: SemanticType,
}

impl KeyValueDescriptor {
    /// Create a key value descriptor
    pub fn new(semantic_type: impl Into<SemanticType>) -> Self {
        Self {
            semantic_type: semantic_type.into(),
        }
    }
}

/// Byte offset, either shared or per platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OffsetValue {
    /// Same displacement on every platform
    Fixed(i64),
    /// Platform-specific displacement
    Platform {
        windows: Option<i64>,
        linux: Option<i64>,
    },
}

impl OffsetValue {
    /// Displacement for the running platform
    pub fn current(&self) -> Option<i64> {
        match *self {
            OffsetValue::Fixed(offset) => Some(offset),
            OffsetValue::Platform { windows, linux } => {
                if cfg!(target_os = "linux") {
                    linux
                } else if cfg!(target_os = "windows") {
                    windows
                } else {
                    None
                }
            }
        }
    }
}

/// A raw value at a fixed displacement from the entity base pointer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OffsetDescriptor {
    /// Selects the `GetLoc<Type>` / `SetLoc<Type>` accessors
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    /// Displacement from the base pointer
    pub offset: OffsetValue,
}

impl OffsetDescriptor {
    /// Create an offset descriptor with a platform-independent displacement
    pub fn new(semantic_type: impl Into<SemanticType>, offset: i64) -> Self {
        Self {
            semantic_type: semantic_type.into(),
            offset: OffsetValue::Fixed(offset),
        }
    }
}

/// Marker for "no implicit pointer argument"
pub const NO_POINTER: i32 = -1;

fn no_pointer() -> i32 {
    NO_POINTER
}

/// A dynamically invocable native function
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionDescriptor {
    /// Native symbol to call
    pub symbol: String,
    /// Full native parameter list, including the injected pointer slot
    #[serde(default)]
    pub args: Vec<SemanticType>,
    /// Return type, `None` for void
    #[serde(default, rename = "return")]
    pub returns: Option<SemanticType>,
    /// Position of the entity pointer argument, `-1` for none
    #[serde(default = "no_pointer")]
    pub pointer_index: i32,
}

impl FunctionDescriptor {
    /// Create a function descriptor without pointer injection
    pub fn new(symbol: impl Into<String>, args: Vec<SemanticType>) -> Self {
        Self {
            symbol: symbol.into(),
            args,
            returns: None,
            pointer_index: NO_POINTER,
        }
    }

    /// Inject the entity pointer at `index`
    pub fn with_pointer_index(mut self, index: i32) -> Self {
        self.pointer_index = index;
        self
    }

    /// Declare the return type
    pub fn with_return(mut self, returns: impl Into<SemanticType>) -> Self {
        self.returns = Some(returns.into());
        self
    }

    /// Argument position of the injected pointer, if any
    ///
    /// Any negative index disables injection.
    pub fn pointer_slot(&self) -> Option<usize> {
        usize::try_from(self.pointer_index).ok()
    }

    /// Number of arguments the caller supplies
    pub fn caller_arity(&self) -> usize {
        let injected = usize::from(self.pointer_slot().is_some());
        self.args.len().saturating_sub(injected)
    }
}

/// A borrowed descriptor of any kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Descriptor<'a> {
    Property(&'a PropertyDescriptor),
    KeyValue(&'a KeyValueDescriptor),
    Offset(&'a OffsetDescriptor),
    Function(&'a FunctionDescriptor),
}

impl Descriptor<'_> {
    /// Kind name, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Descriptor::Property(_) => "property",
            Descriptor::KeyValue(_) => "keyvalue",
            Descriptor::Offset(_) => "offset",
            Descriptor::Function(_) => "function",
        }
    }
}
