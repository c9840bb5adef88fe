//! Raw memory primitives
//!
//! Entity fields that are not networked are reached by adding a byte
//! displacement to the entity's base pointer and reading a value of a
//! known layout at the resulting address.
//!
//! ```text
//! base pointer ─────┐
//!                   ▼
//!   CBaseEntity  [ vtable | ... | m_MoveType | ... ]
//!                   └── +offset ──┘
//! ```

use std::ffi::c_void;
use std::fmt;

use crate::interfaces::CBaseEntity;

/// An address inside the game process
///
/// Wraps the integer value of a pointer so it can be stored, compared and
/// offset without holding a raw pointer type.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(usize);

impl Address {
    /// The null address
    pub const NULL: Address = Address(0);

    /// Create an address from its raw integer value
    #[inline]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Create an address from any pointer
    #[inline]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    /// Create an address from an entity base pointer
    #[inline]
    pub fn from_entity(ptr: *mut CBaseEntity) -> Self {
        Self::from_ptr(ptr as *const CBaseEntity)
    }

    /// Get the raw integer value
    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }

    /// Check if this is the null address
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Displace the address by a signed number of bytes
    ///
    /// Returns `None` if the result would wrap around the address space.
    #[inline]
    pub fn offset(self, bytes: i64) -> Option<Address> {
        let bytes = isize::try_from(bytes).ok()?;
        self.0.checked_add_signed(bytes).map(Address)
    }

    /// Get the address as a raw pointer
    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0 as *mut c_void
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:#x})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Layout of a raw value stored at an entity offset
///
/// The name of each variant is the suffix used by the `GetLoc<Type>` /
/// `SetLoc<Type>` accessor convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryType {
    /// 1-byte boolean
    Bool,
    /// Signed 8-bit integer
    Char,
    /// Unsigned 8-bit integer
    UChar,
    /// Signed 16-bit integer
    Short,
    /// Unsigned 16-bit integer
    UShort,
    /// Signed 32-bit integer
    Int,
    /// Unsigned 32-bit integer
    UInt,
    /// Signed 64-bit integer
    Long,
    /// Unsigned 64-bit integer
    ULong,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Native pointer
    Pointer,
    /// Three packed 32-bit floats (Vector / QAngle)
    Vector,
}

impl MemoryType {
    /// Every supported layout
    pub const ALL: [MemoryType; 13] = [
        MemoryType::Bool,
        MemoryType::Char,
        MemoryType::UChar,
        MemoryType::Short,
        MemoryType::UShort,
        MemoryType::Int,
        MemoryType::UInt,
        MemoryType::Long,
        MemoryType::ULong,
        MemoryType::Float,
        MemoryType::Double,
        MemoryType::Pointer,
        MemoryType::Vector,
    ];

    /// Accessor suffix for this layout
    pub const fn name(self) -> &'static str {
        match self {
            MemoryType::Bool => "Bool",
            MemoryType::Char => "Char",
            MemoryType::UChar => "UChar",
            MemoryType::Short => "Short",
            MemoryType::UShort => "UShort",
            MemoryType::Int => "Int",
            MemoryType::UInt => "UInt",
            MemoryType::Long => "Long",
            MemoryType::ULong => "ULong",
            MemoryType::Float => "Float",
            MemoryType::Double => "Double",
            MemoryType::Pointer => "Pointer",
            MemoryType::Vector => "Vector",
        }
    }

    /// Look up a layout by its accessor suffix (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Size of the value in bytes
    pub const fn size(self) -> usize {
        match self {
            MemoryType::Bool | MemoryType::Char | MemoryType::UChar => 1,
            MemoryType::Short | MemoryType::UShort => 2,
            MemoryType::Int | MemoryType::UInt | MemoryType::Float => 4,
            MemoryType::Long | MemoryType::ULong | MemoryType::Double => 8,
            MemoryType::Pointer => std::mem::size_of::<usize>(),
            MemoryType::Vector => 12,
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
