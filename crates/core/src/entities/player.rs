//! Player attributes
//!
//! Players carry an `IPlayerInfo` instance next to their edict, and two
//! attributes derived from it and from the entity index.

use std::sync::Arc;

use sprust_engine::{Edict, EngineGlobals, NativeInstance};
use tracing::warn;

use super::handle::EntityHandle;

/// Userid reported for players the server has no userid for
pub const INVALID_USERID: i32 = -1;

/// Bind the player info instance of a player edict
pub(crate) fn bind_player_info(
    engine: &EngineGlobals,
    edict: &dyn Edict,
) -> Vec<Arc<dyn NativeInstance>> {
    match engine.edicts.player_info(edict) {
        Some(info) => vec![info],
        None => {
            warn!("No player info for index {}", edict.index());
            Vec::new()
        }
    }
}

/// Server assigned userid
pub fn userid(entity: &EntityHandle) -> i32 {
    entity
        .engine
        .edicts
        .userid(entity.edict())
        .unwrap_or(INVALID_USERID)
}

/// Player slot (index - 1)
pub fn slot(entity: &EntityHandle) -> i64 {
    i64::from(entity.index()) - 1
}
