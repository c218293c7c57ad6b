//! Serializable graph configuration.
//!
//! ```json
//! {
//!   "viewport": { "x_min": -10, "x_max": 10, "y_min": -10, "y_max": 10, "step": 0.1 },
//!   "angle_mode": "degree",
//!   "functions": [ { "expression": "sin(x)", "color": "#0000ff" } ]
//! }
//! ```
//!
//! Every field is optional and falls back to the start-up state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{GraphEngine, GraphEngineBuilder};
use crate::expr::AngleMode;
use crate::render::{Color, ColorParseError, RenderSurface};
use crate::view::{Viewport, ViewportError};

/// Errors raised while loading a [`GraphConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    #[error("invalid graph config: {0}")]
    Json(#[from] serde_json::Error),
    /// The viewport bounds violate the viewport invariants.
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    /// A function color is not a hex color.
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// Scalar viewport bounds as supplied by a form or file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Left bound.
    pub x_min: f64,
    /// Right bound.
    pub x_max: f64,
    /// Bottom bound.
    pub y_min: f64,
    /// Top bound.
    pub y_max: f64,
    /// Sampling step.
    pub step: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::from(Viewport::default())
    }
}

impl From<Viewport> for ViewportConfig {
    fn from(viewport: Viewport) -> Self {
        Self {
            x_min: viewport.x().min,
            x_max: viewport.x().max,
            y_min: viewport.y().min,
            y_max: viewport.y().max,
            step: viewport.step(),
        }
    }
}

impl TryFrom<ViewportConfig> for Viewport {
    type Error = ViewportError;

    fn try_from(config: ViewportConfig) -> Result<Self, Self::Error> {
        Self::from_bounds(
            config.x_min,
            config.x_max,
            config.y_min,
            config.y_max,
            config.step,
        )
    }
}

/// A function to plot, with its color as hex text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// Expression text.
    pub expression: String,
    /// Hex color, e.g. `#ff0000`.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#000000".to_string()
}

/// Initial state of a [`GraphEngine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Visible bounds and sampling step.
    pub viewport: ViewportConfig,
    /// Angle unit for trigonometric functions.
    pub angle_mode: AngleMode,
    /// Functions in display order.
    pub functions: Vec<FunctionConfig>,
}

impl GraphConfig {
    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration into an engine builder.
    ///
    /// Expressions are not compiled here; bad expressions surface as
    /// failures in the first render report.
    pub fn builder(&self) -> Result<GraphEngineBuilder, ConfigError> {
        let viewport = Viewport::try_from(self.viewport)?;
        let mut builder = GraphEngine::builder()
            .viewport(viewport)
            .angle_mode(self.angle_mode);
        for function in &self.functions {
            let color: Color = function.color.parse()?;
            builder = builder.function(function.expression.clone(), color);
        }
        Ok(builder)
    }
}

impl<S: RenderSurface> GraphEngine<S> {
    /// Build an engine from a configuration and draw the first frame.
    pub fn from_config(config: &GraphConfig, surface: S) -> Result<Self, ConfigError> {
        Ok(config.builder()?.build(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderList;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GraphConfig::from_json("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
        let engine = GraphEngine::from_config(&config, RenderList::new(100.0, 100.0)).unwrap();
        assert_eq!(engine.viewport(), Viewport::default());
        assert_eq!(engine.angle_mode(), AngleMode::Radian);
    }

    #[test]
    fn loads_functions_and_mode() {
        let config = GraphConfig::from_json(
            r##"{
                "viewport": { "x_min": -360, "x_max": 360, "step": 5 },
                "angle_mode": "degree",
                "functions": [
                    { "expression": "sin(x)", "color": "#00f" },
                    { "expression": "cos(x)" }
                ]
            }"##,
        )
        .unwrap();
        let engine = GraphEngine::from_config(&config, RenderList::new(100.0, 100.0)).unwrap();
        assert_eq!(engine.angle_mode(), AngleMode::Degree);
        assert_eq!(engine.viewport().x().max, 360.0);
        assert_eq!(engine.viewport().y().max, 10.0);
        assert_eq!(engine.functions().len(), 2);
        assert_eq!(engine.functions()[0].color(), Color::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(engine.functions()[1].color(), Color::BLACK);
    }

    #[test]
    fn rejects_invalid_viewport_and_color() {
        let config = GraphConfig::from_json(r#"{ "viewport": { "step": 0 } }"#).unwrap();
        assert!(matches!(
            GraphEngine::from_config(&config, RenderList::new(10.0, 10.0)),
            Err(ConfigError::Viewport(ViewportError::InvalidStep(_)))
        ));

        let config =
            GraphConfig::from_json(r#"{ "functions": [{ "expression": "x", "color": "blue" }] }"#)
                .unwrap();
        assert!(matches!(config.builder(), Err(ConfigError::Color(_))));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            GraphConfig::from_json("{ viewport"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let config = GraphConfig {
            angle_mode: AngleMode::Degree,
            functions: vec![FunctionConfig {
                expression: "x^2".to_string(),
                color: "#ff0000".to_string(),
            }],
            ..GraphConfig::default()
        };
        let text = config.to_json().unwrap();
        assert_eq!(GraphConfig::from_json(&text).unwrap(), config);
    }
}
