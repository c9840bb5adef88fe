//! Serial-qualified entity handles
//!
//! An entity handle packs an entity slot with a serial number. The serial
//! changes whenever the slot is reused, so a stale handle stops matching
//! once its entity is deleted.
//!
//! ```text
//! ┌────────────────────────────────┬───────────────────────┐
//! │    Serial Number (20 bits)     │ Entry Index (12 bits) │
//! │          bits 12-31            │      bits 0-11        │
//! └────────────────────────────────┴───────────────────────┘
//! ```

use std::fmt;

/// Bits used by edict indices
pub const MAX_EDICT_BITS: u32 = 11;

/// Bits used by the entry index of a handle
pub const NUM_ENT_ENTRY_BITS: u32 = MAX_EDICT_BITS + 1;

/// Bits used by the serial number of a handle
pub const NUM_SERIAL_NUM_BITS: u32 = 32 - NUM_ENT_ENTRY_BITS;

/// Invalid handle sentinel value
pub const INVALID_EHANDLE_INDEX: u32 = 0xFFFF_FFFF;

const ENT_ENTRY_MASK: u32 = (1 << NUM_ENT_ENTRY_BITS) - 1;

/// An entity handle as its raw integer
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseHandle(u32);

impl BaseHandle {
    /// Wrap a raw handle value
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Build a handle from an entry index and serial number
    #[inline]
    pub const fn new(index: u32, serial: u32) -> Self {
        Self((serial << NUM_ENT_ENTRY_BITS) | (index & ENT_ENTRY_MASK))
    }

    /// The invalid handle
    #[inline]
    pub const fn invalid() -> Self {
        Self(INVALID_EHANDLE_INDEX)
    }

    /// Raw handle value
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Entry index (lower bits)
    #[inline]
    pub const fn entry_index(&self) -> u32 {
        self.0 & ENT_ENTRY_MASK
    }

    /// Serial number (upper bits)
    #[inline]
    pub const fn serial(&self) -> u32 {
        self.0 >> NUM_ENT_ENTRY_BITS
    }

    /// Check if this is not the invalid sentinel
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != INVALID_EHANDLE_INDEX
    }
}

impl Default for BaseHandle {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Debug for BaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            f.debug_struct("BaseHandle")
                .field("index", &self.entry_index())
                .field("serial", &self.serial())
                .finish()
        } else {
            write!(f, "BaseHandle(INVALID)")
        }
    }
}

impl From<u32> for BaseHandle {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
