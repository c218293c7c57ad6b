//! Viewport bounds and data ranges.

use thiserror::Error;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range. Bounds are kept as given; see [`Range::is_valid`].
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.min < self.max
    }

    /// Check whether a value lies inside the inclusive bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Reasons a [`Viewport`] cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    /// The X bounds are not finite or not strictly increasing.
    #[error("invalid x range [{min}, {max}]: bounds must be finite with min < max")]
    InvalidX {
        /// Requested minimum.
        min: f64,
        /// Requested maximum.
        max: f64,
    },
    /// The Y bounds are not finite or not strictly increasing.
    #[error("invalid y range [{min}, {max}]: bounds must be finite with min < max")]
    InvalidY {
        /// Requested minimum.
        min: f64,
        /// Requested maximum.
        max: f64,
    },
    /// The sampling step is not a finite positive number.
    #[error("invalid sampling step {0}: must be finite and > 0")]
    InvalidStep(f64),
}

/// Visible data bounds on both axes plus the curve sampling step.
///
/// A viewport is validated once on construction and replaced wholesale on
/// update, so every instance satisfies `x.min < x.max`, `y.min < y.max` and
/// `step > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x: Range,
    y: Range,
    step: f64,
}

impl Viewport {
    /// Create a viewport from X and Y ranges and a sampling step.
    pub fn new(x: Range, y: Range, step: f64) -> Result<Self, ViewportError> {
        if !x.is_valid() {
            return Err(ViewportError::InvalidX {
                min: x.min,
                max: x.max,
            });
        }
        if !y.is_valid() {
            return Err(ViewportError::InvalidY {
                min: y.min,
                max: y.max,
            });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ViewportError::InvalidStep(step));
        }
        Ok(Self { x, y, step })
    }

    /// Create a viewport from the five scalar bounds.
    pub fn from_bounds(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        step: f64,
    ) -> Result<Self, ViewportError> {
        Self::new(Range::new(x_min, x_max), Range::new(y_min, y_max), step)
    }

    /// X axis range.
    pub fn x(&self) -> Range {
        self.x
    }

    /// Y axis range.
    pub fn y(&self) -> Range {
        self.y
    }

    /// Sampling step along X.
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: Range::new(-10.0, 10.0),
            y: Range::new(-10.0, 10.0),
            step: 1.0,
        }
    }
}
