//! Entity render color
//!
//! The color lives in the networked `render` value, one byte per channel:
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │  A 31-24 │  B 23-16 │  G 15-8  │  R 7-0   │
//! └──────────┴──────────┴──────────┴──────────┘
//! ```
//!
//! The engine ignores `render` unless the entity's render mode and render
//! effects carry the color flags, so a write sets both flags first.

use bitflags::bitflags;
use sprust_engine::Value;

use super::handle::EntityHandle;
use crate::error::{EntityError, EntityResult};

const ALPHA_MASK: u32 = 0xFF00_0000;

bitflags! {
    /// Render mode bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RenderMode: u32 {
        /// Apply the render color
        const TRANS_COLOR = 1;
    }
}

bitflags! {
    /// Render effect bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RenderFx: u32 {
        /// Allow the render color to be networked
        const COLOR = 256;
    }
}

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Decode a packed render value
    pub const fn from_render(render: u32) -> Self {
        Self {
            r: (render & 0xFF) as u8,
            g: ((render >> 8) & 0xFF) as u8,
            b: ((render >> 16) & 0xFF) as u8,
            a: ((render >> 24) & 0xFF) as u8,
        }
    }

    /// Encode as a packed render value
    pub const fn to_render(&self) -> u32 {
        rgb(self.r, self.g, self.b) + ((self.a as u32) << 24)
    }

    /// Channels in `[r, g, b, a]` order
    pub const fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    r as u32 + ((g as u32) << 8) + ((b as u32) << 16)
}

/// Reinterpret a packed render value the way an `Int` property stores it
fn render_value(render: u32) -> Value {
    Value::Int(i64::from(render as i32))
}

impl EntityHandle {
    /// Current render color
    pub fn color(&self) -> EntityResult<Color> {
        Ok(Color::from_render(self.render()?))
    }

    /// Set the render color from `[r, g, b]` or `[r, g, b, a]`
    ///
    /// With three channels the stored alpha is kept.
    ///
    /// `render`, `rendermode` and `renderfx` are all read before anything is
    /// written, so a flag that cannot be read leaves the entity untouched.
    /// The three writes are not rolled back if a later one fails.
    ///
    /// # Errors
    /// Returns [`EntityError::InvalidArgumentCount`] for any other length, and
    /// [`EntityError::InvalidValue`] if a flag does not hold an int.
    pub fn set_color(&self, channels: &[u8]) -> EntityResult<()> {
        let render = match *channels {
            [r, g, b] => rgb(r, g, b) + (self.render()? & ALPHA_MASK),
            [r, g, b, a] => Color::new(r, g, b, a).to_render(),
            _ => {
                return Err(EntityError::InvalidArgumentCount {
                    expected: "3 or 4".to_string(),
                    given: channels.len(),
                })
            }
        };

        let mode = self.int_attribute("rendermode")? | i64::from(RenderMode::TRANS_COLOR.bits());
        let fx = self.int_attribute("renderfx")? | i64::from(RenderFx::COLOR.bits());

        self.set("rendermode", mode)?;
        self.set("renderfx", fx)?;
        self.set("render", render_value(render))
    }

    fn render(&self) -> EntityResult<u32> {
        Ok(self.int_attribute("render")? as u32)
    }

    fn int_attribute(&self, name: &str) -> EntityResult<i64> {
        let value = self.get_value(name)?;
        value.as_int().ok_or_else(|| EntityError::InvalidValue {
            attribute: name.to_string(),
            expected: "int",
            found: value.type_name(),
        })
    }
}
