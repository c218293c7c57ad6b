use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{Window, canvas, div};

use crate::engine::{GraphEngine, RenderReport};
use crate::render::{RenderList, RenderSurface};

use super::paint::{paint_render_list, to_hsla};

/// A GPUI view that renders a [`GraphEngine`].
///
/// The view resizes the engine to its layout bounds before painting, so a
/// window resize triggers a full re-render.
#[derive(Clone)]
pub struct GpuiGraphView {
    engine: Arc<RwLock<GraphEngine<RenderList>>>,
}

impl GpuiGraphView {
    /// Create a view for the given engine.
    pub fn new(engine: GraphEngine<RenderList>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Get a handle for driving the engine from application code.
    ///
    /// Call `cx.notify()` on the view's entity after mutating so GPUI repaints.
    pub fn graph_handle(&self) -> GraphHandle {
        GraphHandle {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl Render for GpuiGraphView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let engine = Arc::clone(&self.engine);
        let background = engine.read().expect("graph lock").theme().background;

        div().size_full().bg(to_hsla(background)).child(
            canvas(
                move |bounds, _, _| {
                    let mut engine = engine.write().expect("graph lock");
                    let width = f32::from(bounds.size.width);
                    let height = f32::from(bounds.size.height);
                    let surface = engine.surface();
                    if surface.width() != width || surface.height() != height {
                        log_failures(&engine.resize(width, height));
                    }
                    engine.surface().clone()
                },
                move |bounds, list, window, cx| {
                    paint_render_list(&list, bounds, window, cx);
                },
            )
            .size_full(),
        )
    }
}

fn log_failures(report: &RenderReport) {
    for failure in &report.failures {
        tracing::debug!(
            index = failure.index,
            expression = failure.expression.as_str(),
            error = %failure.error,
            "function skipped in resized frame"
        );
    }
}

/// A handle for mutating a [`GraphEngine`] held inside a `GpuiGraphView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct GraphHandle {
    engine: Arc<RwLock<GraphEngine<RenderList>>>,
}

impl GraphHandle {
    /// Read the engine state.
    ///
    /// The engine is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&GraphEngine<RenderList>) -> R) -> R {
        let engine = self.engine.read().expect("graph lock");
        f(&engine)
    }

    /// Mutate the engine state.
    ///
    /// The engine is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut GraphEngine<RenderList>) -> R) -> R {
        let mut engine = self.engine.write().expect("graph lock");
        f(&mut engine)
    }
}
