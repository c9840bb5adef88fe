//! sprust Engine - Native Collaborators and Global Storage
//!
//! This crate handles:
//! - The traits through which the entity core talks to the engine
//!   (edicts, networked properties, key values, raw memory, native calls)
//! - The dynamic [`Value`] type crossing that boundary
//! - Raw typed memory access via the `GetLoc<Type>` / `SetLoc<Type>` convention
//! - Storing the installed collaborators in a thread-safe global
//!
//! # Architecture
//!
//! Collaborators are bundled into [`globals::EngineGlobals`] once during
//! plugin load and installed with [`init_engine`]. Access is provided via
//! the [`engine()`] function.
//!
//! # Thread Safety
//!
//! All collaborators live for the plugin's lifetime. The main game
//! thread ID is stored for runtime checks via [`is_main_thread()`].

pub mod error;
pub mod globals;
pub mod memory;
pub mod native;
pub mod value;

pub use error::EngineError;
pub use globals::{engine, init_engine, is_engine_initialized, is_main_thread, try_engine, EngineGlobals};
pub use memory::{RawMemory, GET_LOC_PREFIX, SET_LOC_PREFIX};
pub use native::{BoundCall, Edict, EdictSource, MemoryAccess, NativeCaller, NativeInstance, PropertyAccess};
pub use value::Value;
