//! Entity kinds
//!
//! A kind is what a subclass used to be: a set of capability tags that
//! select descriptor rows, a flat table of computed attributes, and an
//! optional binder for secondary native instances. Kinds are plain
//! statics, so override lookup is a table scan rather than a walk up a
//! class hierarchy.
//!
//! ```text
//! BASE    tags: []          computed: index classname pointer inthandle color
//! PLAYER  tags: ["player"]  computed: userid slot (+ BASE)
//!                           instances: IPlayerInfo
//! ```

use std::fmt;
use std::sync::Arc;

use sprust_engine::{Edict, EngineGlobals, NativeInstance, Value};

use super::color::Color;
use super::handle::EntityHandle;
use super::player;
use crate::error::{EntityError, EntityResult};

/// Reads a computed attribute
pub type Getter = fn(&EntityHandle) -> EntityResult<Value>;

/// Writes a computed attribute
pub type Setter = fn(&EntityHandle, Value) -> EntityResult<()>;

/// Binds secondary native instances for a new handle
pub type InstanceBinder = fn(&EngineGlobals, &dyn Edict) -> Vec<Arc<dyn NativeInstance>>;

/// An attribute implemented in Rust rather than looked up in the registry
pub struct Computed {
    /// Attribute name
    pub name: &'static str,
    /// Getter
    pub get: Getter,
    /// Setter, `None` for read-only attributes
    pub set: Option<Setter>,
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("name", &self.name)
            .field("writable", &self.set.is_some())
            .finish()
    }
}

/// The runtime kind of an entity handle
pub struct EntityKind {
    /// Kind name, for diagnostics
    pub name: &'static str,
    /// Capability tags this kind adds to the base tag
    pub tags: &'static [&'static str],
    /// Attributes declared by this kind
    pub computed: &'static [Computed],
    /// Secondary instance binder
    pub bind_instances: Option<InstanceBinder>,
}

impl fmt::Debug for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityKind")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("computed", &self.computed)
            .finish()
    }
}

impl EntityKind {
    /// Check if this is the base kind
    pub fn is_base(&self) -> bool {
        std::ptr::eq(self, &BASE)
    }

    /// Find a computed attribute declared by this kind or inherited from BASE
    pub fn computed(&self, name: &str) -> Option<&'static Computed> {
        let own: &'static [Computed] = self.computed;
        own.iter()
            .find(|c| c.name == name)
            .or_else(|| BASE.computed.iter().find(|c| c.name == name))
    }

    /// Check if the kind declares (or inherits) a computed attribute
    pub fn declares(&self, name: &str) -> bool {
        self.computed(name).is_some()
    }
}

/// Base entity kind
pub static BASE: EntityKind = EntityKind {
    name: "entity",
    tags: &[],
    computed: &[
        Computed {
            name: "index",
            get: |entity| Ok(Value::from(entity.index())),
            set: None,
        },
        Computed {
            name: "classname",
            get: |entity| Ok(Value::String(entity.classname())),
            set: None,
        },
        Computed {
            name: "pointer",
            get: |entity| Ok(Value::Pointer(entity.pointer())),
            set: None,
        },
        Computed {
            name: "inthandle",
            get: |entity| Ok(Value::from(entity.inthandle())),
            set: None,
        },
        Computed {
            name: "color",
            get: |entity| Ok(Value::from(entity.color()?.to_render())),
            set: Some(set_color_attr),
        },
    ],
    bind_instances: None,
};

/// Player entity kind
pub static PLAYER: EntityKind = EntityKind {
    name: "player",
    tags: &["player"],
    computed: &[
        Computed {
            name: "userid",
            get: |entity| Ok(Value::from(player::userid(entity))),
            set: None,
        },
        Computed {
            name: "slot",
            get: |entity| Ok(Value::from(player::slot(entity))),
            set: None,
        },
    ],
    bind_instances: Some(player::bind_player_info),
};

/// Setter for the packed `color` attribute
///
/// Accepts the packed value as either a signed or an unsigned 32-bit int.
fn set_color_attr(entity: &EntityHandle, value: Value) -> EntityResult<()> {
    let packed = value
        .as_int()
        .filter(|packed| (i64::from(i32::MIN)..=i64::from(u32::MAX)).contains(packed))
        .ok_or_else(|| EntityError::InvalidValue {
            attribute: "color".to_string(),
            expected: "32-bit int",
            found: value.type_name(),
        })?;
    let color = Color::from_render(packed as u32);
    entity.set_color(&color.to_array())
}
