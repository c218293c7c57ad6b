//! gpui_fnplot graphs user-entered functions of one variable.
//!
//! Expressions are compiled with a fixed grammar, sampled across a viewport
//! and drawn with adaptive grid lines and axes onto any [`RenderSurface`].
//! The optional GPUI backend paints the result inside a GPUI window.

#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod engine;
pub mod expr;
pub mod geom;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
pub mod registry;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;

pub use axis::{AxisFormatter, AxisTicks, Tick, tick_interval};
pub use config::{ConfigError, FunctionConfig, GraphConfig, ViewportConfig};
pub use engine::{CompileFailure, CurveReport, GraphEngine, GraphEngineBuilder, RenderReport};
pub use expr::{AngleMode, CompileError, CompiledFunction, Sample, compile};
pub use geom::{Point, ScreenPoint};
#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiGraphView, GraphHandle};
pub use registry::{EntryId, FunctionRegistry, PlotEntry, RegistryError};
pub use render::{
    Color, ColorParseError, CurveStats, LineStyle, RenderCommand, RenderList, RenderSurface,
    TextAlign, TextStyle,
};
pub use style::Theme;
pub use transform::Transform;
pub use view::{Range, Viewport, ViewportError};
