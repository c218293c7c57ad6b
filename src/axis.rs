//! Tick interval selection, tick enumeration and label formatting.

use crate::expr::AngleMode;
use crate::view::Range;

/// Pick a "nice" spacing between grid lines for a span of `range` data units.
///
/// The base interval is the power of ten at or below `range` scaled by 1, 2
/// or 5 depending on the mantissa, then doubled if it would produce more than
/// ten divisions or halved if it would produce fewer than five. Returns `None`
/// for non-positive or non-finite spans.
pub fn tick_interval(range: f64) -> Option<f64> {
    if !range.is_finite() || range <= 0.0 {
        return None;
    }
    let log10 = range.log10();
    let exponent = log10.floor();
    let fraction = log10 - exponent;
    let magnitude = 10_f64.powf(exponent);
    let mut interval = if fraction < 2_f64.log10() {
        magnitude
    } else if fraction < 5_f64.log10() {
        magnitude * 2.0
    } else {
        magnitude * 5.0
    };
    if range / interval > 10.0 {
        interval *= 2.0;
    } else if range / interval < 5.0 {
        interval /= 2.0;
    }
    Some(interval)
}

/// A single tick position on an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Tick value in data units.
    pub value: f64,
    /// Whether this tick sits on the origin (the axis line itself).
    pub is_zero: bool,
}

/// Ticks along one axis at a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct AxisTicks {
    range: Range,
    interval: f64,
}

impl AxisTicks {
    /// Build ticks for a range using [`tick_interval`] on its span.
    pub fn for_range(range: Range) -> Option<Self> {
        let interval = tick_interval(range.span())?;
        Some(Self { range, interval })
    }

    /// Spacing between adjacent ticks.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Iterate every multiple of the interval within the inclusive range,
    /// starting at the first multiple at or above the lower bound.
    pub fn iter(&self) -> impl Iterator<Item = Tick> + '_ {
        let first = (self.range.min / self.interval).ceil() as i64;
        let limit = self.range.max + self.interval * 1e-9;
        (first..)
            .map(|k| (k, k as f64 * self.interval))
            .take_while(move |(_, value)| *value <= limit)
            .map(|(k, value)| Tick {
                value,
                is_zero: k == 0,
            })
    }

    /// Iterate every tick except the origin.
    pub fn non_zero(&self) -> impl Iterator<Item = Tick> + '_ {
        self.iter().filter(|tick| !tick.is_zero)
    }
}

/// Formatter for axis tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisFormatter {
    /// One fixed decimal place, e.g. `-2.5` or `4.0`.
    Fixed,
    /// Shortest decimal form followed by a degree sign, e.g. `90°`.
    Degrees,
}

impl AxisFormatter {
    /// Formatter for the X axis under the given angle mode.
    pub fn for_x_axis(mode: AngleMode) -> Self {
        match mode {
            AngleMode::Degree => Self::Degrees,
            AngleMode::Radian => Self::Fixed,
        }
    }

    /// Formatter for the Y axis; values are never angles.
    pub fn for_y_axis() -> Self {
        Self::Fixed
    }

    /// Format a tick value for display. `interval` is the tick spacing and
    /// sets how many decimals a degree label keeps.
    pub fn format(&self, value: f64, interval: f64) -> String {
        match self {
            Self::Fixed => format!("{value:.1}"),
            Self::Degrees => {
                // Strip float noise such as 0.30000000000000004.
                let scale = 10_f64.powi(label_decimals(interval));
                let rounded = (value * scale).round() / scale;
                let rounded = if rounded == 0.0 { 0.0 } else { rounded };
                format!("{rounded}°")
            }
        }
    }
}

/// One decimal beyond the leading digit of `interval`, so adjacent ticks
/// always format differently.
fn label_decimals(interval: f64) -> i32 {
    if !(interval.is_finite() && interval > 0.0) {
        return 9;
    }
    ((-interval.log10()).ceil() as i32 + 1).clamp(0, 15)
}
