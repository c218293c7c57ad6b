//! Visual theme for graphs.

use crate::render::{Color, LineStyle, TextStyle};

/// Colors, stroke widths and label metrics used when rendering a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Surface background (painted by the backend, not by the engine).
    pub background: Color,
    /// Grid line style.
    pub grid: LineStyle,
    /// Axis line and tick mark style.
    pub axis: LineStyle,
    /// Tick label style.
    pub label: TextStyle,
    /// Half-length of an axis tick mark in pixels.
    pub tick_half_length: f32,
    /// Stroke width used for plotted curves.
    pub curve_width: f32,
}

impl Theme {
    /// Create the default (light) theme.
    pub fn new() -> Self {
        Self::light()
    }

    /// Light theme: light gray grid, black axes, white background.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: LineStyle::new(Color::from_rgb8(0xdd, 0xdd, 0xdd), 1.0),
            axis: LineStyle::new(Color::BLACK, 2.0),
            label: TextStyle {
                color: Color::BLACK,
                ..TextStyle::default()
            },
            tick_half_length: 5.0,
            curve_width: 2.0,
        }
    }

    /// Dark theme with the same metrics as [`Theme::light`].
    pub fn dark() -> Self {
        let foreground = Color::from_rgb8(0xe6, 0xe6, 0xe6);
        Self {
            background: Color::from_rgb8(0x12, 0x14, 0x18),
            grid: LineStyle::new(Color::from_rgb8(0x33, 0x36, 0x3d), 1.0),
            axis: LineStyle::new(foreground, 2.0),
            label: TextStyle {
                color: foreground,
                ..TextStyle::default()
            },
            ..Self::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
