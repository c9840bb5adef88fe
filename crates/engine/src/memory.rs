//! Raw typed memory access
//!
//! [`RawMemory`] implements the `GetLoc<Type>` / `SetLoc<Type>` accessor
//! convention directly on process memory. The type suffix selects a
//! [`MemoryType`] layout; unknown suffixes are reported as unsupported
//! operations so callers can fail closed.

use std::ffi::c_void;

use sprust_sdk::{Address, MemoryType};
use tracing::trace;

use crate::error::EngineError;
use crate::native::MemoryAccess;
use crate::value::Value;

/// Prefix of raw memory readers (`GetLocInt`)
pub const GET_LOC_PREFIX: &str = "GetLoc";

/// Prefix of raw memory writers (`SetLocInt`)
pub const SET_LOC_PREFIX: &str = "SetLoc";

/// Typed reads and writes on raw process memory
#[derive(Debug)]
pub struct RawMemory {
    _private: (),
}

impl RawMemory {
    /// Create a raw memory accessor
    ///
    /// # Safety
    /// Every address later passed to [`MemoryAccess::read`] or
    /// [`MemoryAccess::write`] must point to memory that is valid for
    /// reading (or writing) a value of the accessor's layout. Entity
    /// offsets come from configuration, so this contract is carried by
    /// whoever installs the offset tables.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }

    /// Parse an accessor name into its layout
    fn parse(operation: &str, prefix: &str) -> Option<MemoryType> {
        operation
            .strip_prefix(prefix)
            .and_then(MemoryType::from_name)
    }
}

impl MemoryAccess for RawMemory {
    fn has_accessor(&self, operation: &str) -> bool {
        Self::parse(operation, GET_LOC_PREFIX).is_some()
            || Self::parse(operation, SET_LOC_PREFIX).is_some()
    }

    fn read(&self, operation: &str, address: Address) -> Result<Value, EngineError> {
        let ty = Self::parse(operation, GET_LOC_PREFIX)
            .ok_or_else(|| EngineError::UnsupportedOperation(operation.to_string()))?;
        if address.is_null() {
            return Err(EngineError::NullPointer);
        }

        trace!("{} at {}", operation, address);

        // SAFETY: upheld by the contract of RawMemory::new
        Ok(unsafe { read_value(address.as_ptr(), ty) })
    }

    fn write(&self, operation: &str, address: Address, value: Value) -> Result<(), EngineError> {
        let ty = Self::parse(operation, SET_LOC_PREFIX)
            .ok_or_else(|| EngineError::UnsupportedOperation(operation.to_string()))?;
        if address.is_null() {
            return Err(EngineError::NullPointer);
        }

        trace!("{} at {} = {}", operation, address, value);

        // SAFETY: upheld by the contract of RawMemory::new
        unsafe { write_value(address.as_ptr(), ty, &value) }
    }
}

/// Read a value of the given layout
///
/// # Safety
/// `ptr` must be valid for reading `ty.size()` bytes.
unsafe fn read_value(ptr: *const c_void, ty: MemoryType) -> Value {
    match ty {
        MemoryType::Bool => Value::Bool((ptr as *const u8).read_unaligned() != 0),
        MemoryType::Char => Value::Int(i64::from((ptr as *const i8).read_unaligned())),
        MemoryType::UChar => Value::Int(i64::from((ptr as *const u8).read_unaligned())),
        MemoryType::Short => Value::Int(i64::from((ptr as *const i16).read_unaligned())),
        MemoryType::UShort => Value::Int(i64::from((ptr as *const u16).read_unaligned())),
        MemoryType::Int => Value::Int(i64::from((ptr as *const i32).read_unaligned())),
        MemoryType::UInt => Value::Int(i64::from((ptr as *const u32).read_unaligned())),
        MemoryType::Long => Value::Int((ptr as *const i64).read_unaligned()),
        // Stored bit pattern is kept; values above i64::MAX read back negative
        MemoryType::ULong => Value::Int((ptr as *const u64).read_unaligned() as i64),
        MemoryType::Float => Value::Float(f64::from((ptr as *const f32).read_unaligned())),
        MemoryType::Double => Value::Float((ptr as *const f64).read_unaligned()),
        MemoryType::Pointer => {
            Value::Pointer(Address::new((ptr as *const usize).read_unaligned()))
        }
        MemoryType::Vector => Value::Vector((ptr as *const [f32; 3]).read_unaligned()),
    }
}

/// Write a value with the given layout
///
/// Integers are truncated to the target width the same way a C cast would.
///
/// # Safety
/// `ptr` must be valid for writing `ty.size()` bytes.
unsafe fn write_value(ptr: *mut c_void, ty: MemoryType, value: &Value) -> Result<(), EngineError> {
    let mismatch = || EngineError::TypeMismatch {
        expected: ty.name().to_string(),
        found: value.type_name(),
    };

    match ty {
        MemoryType::Bool => {
            let v = value.as_bool().ok_or_else(mismatch)?;
            (ptr as *mut u8).write_unaligned(u8::from(v));
        }
        MemoryType::Char => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut i8).write_unaligned(v as i8);
        }
        MemoryType::UChar => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut u8).write_unaligned(v as u8);
        }
        MemoryType::Short => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut i16).write_unaligned(v as i16);
        }
        MemoryType::UShort => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut u16).write_unaligned(v as u16);
        }
        MemoryType::Int => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut i32).write_unaligned(v as i32);
        }
        MemoryType::UInt => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut u32).write_unaligned(v as u32);
        }
        MemoryType::Long => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut i64).write_unaligned(v);
        }
        MemoryType::ULong => {
            let v = value.as_int().ok_or_else(mismatch)?;
            (ptr as *mut u64).write_unaligned(v as u64);
        }
        MemoryType::Float => {
            let v = value.as_float().ok_or_else(mismatch)?;
            (ptr as *mut f32).write_unaligned(v as f32);
        }
        MemoryType::Double => {
            let v = value.as_float().ok_or_else(mismatch)?;
            (ptr as *mut f64).write_unaligned(v);
        }
        MemoryType::Pointer => {
            let v = value.as_address().ok_or_else(mismatch)?;
            (ptr as *mut usize).write_unaligned(v.raw());
        }
        MemoryType::Vector => {
            let v = value.as_vector().ok_or_else(mismatch)?;
            (ptr as *mut [f32; 3]).write_unaligned(v);
        }
    }

    Ok(())
}
