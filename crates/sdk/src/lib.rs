//! sprust SDK - Source Engine Type Definitions
//!
//! This crate contains opaque type definitions and raw memory primitives
//! shared by the engine boundary and the entity core. It has no
//! dependencies and compiles quickly, allowing parallel compilation of
//! dependent crates.
//!
//! # Modules
//!
//! - [`interfaces`] - Opaque C++ engine types
//! - [`memory`] - Raw addresses and typed memory layouts

pub mod interfaces;
pub mod memory;

pub use interfaces::*;
pub use memory::{Address, MemoryType};
