//! Entity handles and attribute resolution
//!
//! An [`EntityHandle`] is the single facade over four native attribute
//! sources: networked properties, key values, raw offsets and native
//! functions. Which names map to which source is decided by the
//! [`crate::registry`] rows selected by the handle's capability set.
//!
//! # Reading and writing
//!
//! ```ignore
//! use sprust_core::entities::EntityHandle;
//!
//! let player = EntityHandle::create_player(5)?;
//!
//! let health = player.get_value("health")?;
//! player.set("health", 50)?;
//! ```
//!
//! # Native functions
//!
//! Function attributes resolve to a [`BoundFunction`] carrying the entity's
//! own pointer; calling it splices the pointer into the argument list.
//!
//! ```ignore
//! if let Some(ignite) = entity.get("ignite")?.into_function() {
//!     ignite.call([5.0f32])?;
//! }
//! ```
//!
//! # Color
//!
//! ```ignore
//! entity.set_color(&[255, 0, 0])?;      // keeps alpha
//! entity.set_color(&[255, 0, 0, 128])?;
//! let Color { r, g, b, a } = entity.color()?;
//! ```

pub mod basehandle;
pub mod color;
pub mod dispatch;
pub mod function;
pub mod handle;
pub mod kind;
pub mod player;
pub mod resolver;

pub use basehandle::BaseHandle;
pub use color::{Color, RenderFx, RenderMode};
pub use function::BoundFunction;
pub use handle::EntityHandle;
pub use kind::{Computed, EntityKind, BASE, PLAYER};
pub use resolver::Resolved;
