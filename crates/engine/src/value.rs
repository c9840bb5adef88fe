//! Dynamic values exchanged with the engine
//!
//! Networked properties, key values, raw offsets and native function
//! results all produce a [`Value`]. Descriptor files also use it to state
//! sentinel values, so it deserializes from plain JSON scalars.

use std::fmt;

use serde::Deserialize;
use sprust_sdk::Address;

/// A value read from or written to a native object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value (void return, unset key value)
    #[default]
    None,
    /// Boolean
    Bool(bool),
    /// Any integer width, sign-extended
    Int(i64),
    /// Any float width
    Float(f64),
    /// String
    String(String),
    /// Vector / QAngle
    Vector([f32; 3]),
    /// Native pointer
    #[serde(skip_deserializing)]
    Pointer(Address),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Vector(_) => "vector",
            Value::Pointer(_) => "pointer",
        }
    }

    /// Get as integer (booleans convert to 0/1)
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Get as float (integers are widened)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as boolean
    ///
    /// Only `Bool` and the integers 0 and 1 are accepted, so a multi-valued
    /// integer is never silently collapsed.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as vector
    pub fn as_vector(&self) -> Option<[f32; 3]> {
        match self {
            Value::Vector(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as address (non-negative integers are accepted)
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Pointer(addr) => Some(*addr),
            Value::Int(v) => usize::try_from(*v).ok().map(Address::new),
            _ => None,
        }
    }

    /// Check if this is `Value::None`
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => f.write_str(s),
            Value::Vector([x, y, z]) => write!(f, "({}, {}, {})", x, y, z),
            Value::Pointer(addr) => write!(f, "{}", addr),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<[f32; 3]> for Value {
    fn from(value: [f32; 3]) -> Self {
        Value::Vector(value)
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Value::Pointer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_coercion_is_strict() {
        assert_eq!(Value::Int(1).as_bool(), Some(true));
        assert_eq!(Value::Int(0).as_bool(), Some(false));
        assert_eq!(Value::Int(2).as_bool(), None);
        assert_eq!(Value::from("true").as_bool(), None);
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(Value::Bool(true).as_int(), Some(1));
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(3.5).as_int(), None);
        assert_eq!(Value::Int(-1).as_address(), None);
        assert_eq!(Value::Int(0x40).as_address(), Some(Address::new(0x40)));
    }

    #[test]
    fn test_deserialize_scalars() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[null, true, 7, 1.5, "abc", [1.0, 2.0, 3.0]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::None,
                Value::Bool(true),
                Value::Int(7),
                Value::Float(1.5),
                Value::from("abc"),
                Value::Vector([1.0, 2.0, 3.0]),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Vector([1.0, 0.5, 2.0]).to_string(), "(1, 0.5, 2)");
        assert_eq!(Value::Pointer(Address::new(0x10)).to_string(), "0x10");
    }
}
