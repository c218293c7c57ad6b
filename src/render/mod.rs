//! Render surface abstraction and the recording command list.
//!
//! The engine draws through [`RenderSurface`]. [`RenderList`] implements it by
//! recording backend-agnostic [`RenderCommand`]s, which render backends (such
//! as the GPUI backend) replay onto a real canvas.

mod axes;
mod curve;

use std::str::FromStr;

use thiserror::Error;

use crate::geom::ScreenPoint;

pub use axes::{draw_axes, draw_grid};
pub use curve::{CurveStats, MAX_SAMPLES, plot_curve};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let channel = |value: u8| f32::from(value) / 255.0;
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..=i], 16)
                .map(|v| v * 17)
                .map_err(|_| invalid())
        };
        match hex.len() {
            3 => Ok(Self::from_rgb8(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl LineStyle {
    /// Create a line style.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Horizontal anchoring of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Position is the left edge.
    #[default]
    Left,
    /// Position is the horizontal center.
    Center,
    /// Position is the right edge.
    Right,
}

/// Text styling.
///
/// The text position is on the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal alignment.
    pub align: TextAlign,
}

impl TextStyle {
    /// Return a copy with a different alignment.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 10.0,
            align: TextAlign::Left,
        }
    }
}

/// A 2D raster canvas the engine draws on.
///
/// Paths follow canvas semantics: `begin_path` discards any pending path,
/// `move_to` starts a subpath, `line_to` extends it (or starts one when none
/// is open), and `stroke` draws every subpath of the pending path.
pub trait RenderSurface {
    /// Surface width in pixels.
    fn width(&self) -> f32;
    /// Surface height in pixels.
    fn height(&self) -> f32;
    /// Change the surface size. Content is undefined until the next render.
    fn resize(&mut self, width: f32, height: f32);
    /// Erase all content.
    fn clear(&mut self);
    /// Start a new, empty path.
    fn begin_path(&mut self);
    /// Start a new subpath at `point`.
    fn move_to(&mut self, point: ScreenPoint);
    /// Extend the current subpath to `point`.
    fn line_to(&mut self, point: ScreenPoint);
    /// Stroke the pending path.
    fn stroke(&mut self, style: LineStyle);
    /// Draw a single line of text.
    fn draw_text(&mut self, text: &str, position: ScreenPoint, style: &TextStyle);
}

/// Recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Stroke a path made of disjoint polylines.
    Path {
        /// Polylines; consecutive points within one subpath are connected.
        subpaths: Vec<Vec<ScreenPoint>>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Draw text.
    Text {
        /// Baseline anchor position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// A [`RenderSurface`] that records commands instead of rasterizing.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    width: f32,
    height: f32,
    commands: Vec<RenderCommand>,
    pending: Vec<Vec<ScreenPoint>>,
}

impl RenderList {
    /// Create an empty render list of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Iterate recorded paths stroked with the given color.
    pub fn paths_with_color(
        &self,
        color: Color,
    ) -> impl Iterator<Item = &[Vec<ScreenPoint>]> + '_ {
        self.commands.iter().filter_map(move |command| match command {
            RenderCommand::Path { subpaths, style } if style.color == color => {
                Some(subpaths.as_slice())
            }
            _ => None,
        })
    }

    /// Iterate recorded text strings.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            RenderCommand::Path { .. } => None,
        })
    }
}

impl RenderSurface for RenderList {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.pending.clear();
    }

    fn begin_path(&mut self) {
        self.pending.clear();
    }

    fn move_to(&mut self, point: ScreenPoint) {
        self.pending.push(vec![point]);
    }

    fn line_to(&mut self, point: ScreenPoint) {
        match self.pending.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.pending.push(vec![point]),
        }
    }

    fn stroke(&mut self, style: LineStyle) {
        let subpaths: Vec<Vec<ScreenPoint>> = self
            .pending
            .iter()
            .filter(|subpath| !subpath.is_empty())
            .cloned()
            .collect();
        if subpaths.is_empty() {
            return;
        }
        self.commands.push(RenderCommand::Path { subpaths, style });
    }

    fn draw_text(&mut self, text: &str, position: ScreenPoint, style: &TextStyle) {
        self.commands.push(RenderCommand::Text {
            position,
            text: text.to_string(),
            style: *style,
        });
    }
}
