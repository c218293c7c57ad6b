//! GPUI integration for gpui_fnplot.
//!
//! [`GpuiGraphView`] owns a [`GraphEngine`](crate::engine::GraphEngine) that
//! records onto a [`RenderList`](crate::render::RenderList) and replays the
//! recorded commands with GPUI's path and text primitives.

mod paint;
mod view;

pub use view::{GpuiGraphView, GraphHandle};
