//! Source engine type definitions
//!
//! These are opaque types representing C++ engine objects.
//! We don't need their internal structure - just pointers.
//! Fields are reached through raw pointer arithmetic on the base pointer.

/// Opaque type for CBaseEntity
/// The server-side entity object an edict's `IServerUnknown` resolves to
#[repr(C)]
pub struct CBaseEntity {
    _opaque: [u8; 0],
}

