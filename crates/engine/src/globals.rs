//! Global engine collaborator storage
//!
//! Collaborators are installed once during plugin load and stored here.
//! Access is thread-safe via OnceLock.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::thread::ThreadId;

use crate::error::EngineError;
use crate::native::{EdictSource, MemoryAccess, NativeCaller};

/// Global engine state containing every native collaborator
pub struct EngineGlobals {
    /// Edict lookup and player information
    pub edicts: Arc<dyn EdictSource>,

    /// Raw typed memory access for entity offsets
    pub memory: Arc<dyn MemoryAccess>,

    /// Native function invocation
    pub caller: Arc<dyn NativeCaller>,

    /// Main game thread ID for thread safety checks
    pub main_thread_id: ThreadId,
}

impl fmt::Debug for EngineGlobals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineGlobals")
            .field("main_thread_id", &self.main_thread_id)
            .finish_non_exhaustive()
    }
}

/// Global engine state storage
static ENGINE: OnceLock<Arc<EngineGlobals>> = OnceLock::new();

/// Initialize engine globals
///
/// Called once during plugin load. Returns error if already initialized.
pub fn init_engine(globals: EngineGlobals) -> Result<(), EngineError> {
    ENGINE
        .set(Arc::new(globals))
        .map_err(|_| EngineError::AlreadyInitialized)?;
    tracing::info!("Engine collaborators installed");
    Ok(())
}

/// Get engine globals
///
/// Fails with [`EngineError::NotInitialized`] if called before `init_engine`.
pub fn engine() -> Result<&'static Arc<EngineGlobals>, EngineError> {
    ENGINE.get().ok_or(EngineError::NotInitialized)
}

/// Try to get engine globals
pub fn try_engine() -> Option<&'static Arc<EngineGlobals>> {
    ENGINE.get()
}

/// Check if engine is initialized
pub fn is_engine_initialized() -> bool {
    ENGINE.get().is_some()
}

/// Check if current thread is the main game thread
pub fn is_main_thread() -> bool {
    ENGINE
        .get()
        .map(|g| std::thread::current().id() == g.main_thread_id)
        .unwrap_or(false)
}

impl EngineGlobals {
    /// Create new EngineGlobals
    ///
    /// The calling thread is recorded as the main game thread.
    ///
    /// # Arguments
    /// * `edicts` - Edict lookup
    /// * `memory` - Raw memory accessor
    /// * `caller` - Native function caller
    pub fn new(
        edicts: Arc<dyn EdictSource>,
        memory: Arc<dyn MemoryAccess>,
        caller: Arc<dyn NativeCaller>,
    ) -> Self {
        Self {
            edicts,
            memory,
            caller,
            main_thread_id: std::thread::current().id(),
        }
    }
}
