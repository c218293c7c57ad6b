//! Graph engine state and the commands that drive re-rendering.

use std::collections::HashMap;

use crate::expr::{AngleMode, CompileError, CompiledFunction, compile};
use crate::registry::{EntryId, FunctionRegistry, PlotEntry, RegistryError};
use crate::render::{
    Color, CurveStats, LineStyle, RenderList, RenderSurface, draw_axes, draw_grid, plot_curve,
};
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::Viewport;

/// A plotted curve in a [`RenderReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct CurveReport {
    /// Position of the entry in the registry.
    pub index: usize,
    /// Entry identifier.
    pub id: EntryId,
    /// Sampling summary.
    pub stats: CurveStats,
}

/// An entry skipped because its expression does not compile.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileFailure {
    /// Position of the entry in the registry.
    pub index: usize,
    /// Entry identifier.
    pub id: EntryId,
    /// Expression as entered.
    pub expression: String,
    /// Why compilation failed.
    pub error: CompileError,
}

/// Outcome of one full render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Curves that were sampled, in registry order.
    pub curves: Vec<CurveReport>,
    /// Entries that were skipped, in registry order.
    pub failures: Vec<CompileFailure>,
}

impl RenderReport {
    /// Check whether every entry was plotted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owned graph state: viewport, function registry, angle mode, theme, compile
/// cache and the surface everything is drawn on.
///
/// Every mutating command performs a full redraw (clear, grid, axes, curves)
/// and returns the resulting [`RenderReport`].
#[derive(Debug)]
pub struct GraphEngine<S: RenderSurface = RenderList> {
    surface: S,
    viewport: Viewport,
    registry: FunctionRegistry,
    angle_mode: AngleMode,
    theme: Theme,
    compiled: HashMap<EntryId, Result<CompiledFunction, CompileError>>,
}

impl GraphEngine<RenderList> {
    /// Create an engine with default state that records onto a [`RenderList`].
    pub fn new(width: f32, height: f32) -> Self {
        Self::builder().build(RenderList::new(width, height))
    }

    /// Start building an engine with custom configuration.
    ///
    /// The builder accepts any [`RenderSurface`] in [`GraphEngineBuilder::build`].
    pub fn builder() -> GraphEngineBuilder {
        GraphEngineBuilder::default()
    }
}

impl<S: RenderSurface> GraphEngine<S> {
    /// Access the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consume the engine and return its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Access the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the plotted functions in display order.
    pub fn functions(&self) -> &[PlotEntry] {
        self.registry.entries()
    }

    /// Access the angle mode.
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) -> RenderReport {
        self.viewport = viewport;
        self.render()
    }

    /// Append a function to the registry.
    pub fn add_function(&mut self, expression: impl Into<String>, color: Color) -> RenderReport {
        self.registry.push(PlotEntry::new(expression, color));
        self.render()
    }

    /// Remove the function at `index`.
    pub fn remove_function(&mut self, index: usize) -> Result<RenderReport, RegistryError> {
        let removed = self.registry.remove(index)?;
        self.compiled.remove(&removed.id());
        Ok(self.render())
    }

    /// Switch between degree and radian evaluation.
    pub fn set_angle_mode(&mut self, mode: AngleMode) -> RenderReport {
        if self.angle_mode != mode {
            self.angle_mode = mode;
            self.compiled.clear();
        }
        self.render()
    }

    /// Replace the theme.
    pub fn set_theme(&mut self, theme: Theme) -> RenderReport {
        self.theme = theme;
        self.render()
    }

    /// Resize the surface.
    pub fn resize(&mut self, width: f32, height: f32) -> RenderReport {
        tracing::trace!(width, height, "resizing graph surface");
        self.surface.resize(width, height);
        self.render()
    }

    /// Redraw everything from the current state.
    pub fn render(&mut self) -> RenderReport {
        self.surface.clear();
        let mut report = RenderReport::default();
        let Some(transform) =
            Transform::new(&self.viewport, self.surface.width(), self.surface.height())
        else {
            tracing::trace!("graph surface has no area; nothing drawn");
            return report;
        };

        draw_grid(&mut self.surface, &transform, &self.viewport, &self.theme);
        draw_axes(
            &mut self.surface,
            &transform,
            &self.viewport,
            self.angle_mode,
            &self.theme,
        );

        let mode = self.angle_mode;
        for (index, entry) in self.registry.entries().iter().enumerate() {
            let compiled = self
                .compiled
                .entry(entry.id())
                .or_insert_with(|| compile_entry(index, entry, mode));
            match compiled {
                Ok(function) => {
                    let style = LineStyle::new(entry.color(), self.theme.curve_width);
                    let stats = plot_curve(
                        &mut self.surface,
                        &transform,
                        &self.viewport,
                        function,
                        style,
                    );
                    report.curves.push(CurveReport {
                        index,
                        id: entry.id(),
                        stats,
                    });
                }
                Err(error) => report.failures.push(CompileFailure {
                    index,
                    id: entry.id(),
                    expression: entry.expression().to_string(),
                    error: error.clone(),
                }),
            }
        }

        tracing::debug!(
            entries = self.registry.len(),
            curves = report.curves.len(),
            failures = report.failures.len(),
            "rendered graph"
        );
        report
    }
}

fn compile_entry(
    index: usize,
    entry: &PlotEntry,
    mode: AngleMode,
) -> Result<CompiledFunction, CompileError> {
    let compiled = compile(entry.expression(), mode);
    if let Err(error) = &compiled {
        tracing::warn!(
            index,
            expression = entry.expression(),
            %error,
            "failed to compile function; skipping it"
        );
    }
    compiled
}

/// Builder for configuring an engine before construction.
#[derive(Debug, Default)]
pub struct GraphEngineBuilder {
    viewport: Viewport,
    angle_mode: AngleMode,
    theme: Theme,
    registry: FunctionRegistry,
}

impl GraphEngineBuilder {
    /// Set the initial viewport.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the angle mode.
    pub fn angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Add a function to plot.
    pub fn function(mut self, expression: impl Into<String>, color: Color) -> Self {
        self.registry.push(PlotEntry::new(expression, color));
        self
    }

    /// Build the engine and draw the first frame onto `surface`.
    pub fn build<S: RenderSurface>(self, surface: S) -> GraphEngine<S> {
        let mut engine = GraphEngine {
            surface,
            viewport: self.viewport,
            registry: self.registry,
            angle_mode: self.angle_mode,
            theme: self.theme,
            compiled: HashMap::new(),
        };
        engine.render();
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, ScreenPoint};

    const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

    #[test]
    fn parabola_renders_as_one_continuous_curve() {
        let mut engine = GraphEngine::new(400.0, 300.0);
        let report = engine.add_function("x^2", BLUE);
        assert!(report.is_clean());
        assert_eq!(report.curves.len(), 1);
        assert_eq!(report.curves[0].stats.segments, 1);

        let transform = Transform::new(&engine.viewport(), 400.0, 300.0).unwrap();
        let origin = transform.data_to_screen(Point::new(0.0, 0.0));
        let paths: Vec<_> = engine.surface().paths_with_color(BLUE).collect();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
        let curve = &paths[0][0];
        assert!(curve.contains(&origin));
        // Pixel y decreases (curve rises) on both sides of the vertex.
        let vertex = curve.iter().position(|point| *point == origin).unwrap();
        assert!(curve[vertex + 1].y < origin.y);
        assert!(curve[vertex - 1].y < origin.y);
    }

    #[test]
    fn bad_expression_does_not_blank_others() {
        let mut engine = GraphEngine::new(200.0, 200.0);
        engine.add_function("sin(x", RED);
        let report = engine.add_function("x", BLUE);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 0);
        assert_eq!(report.failures[0].expression, "sin(x");
        assert_eq!(report.curves.len(), 1);
        assert_eq!(report.curves[0].index, 1);
        assert_eq!(engine.surface().paths_with_color(RED).count(), 0);
        assert_eq!(engine.surface().paths_with_color(BLUE).count(), 1);
    }

    #[test]
    fn remove_function_redraws_without_it() {
        let mut engine = GraphEngine::new(200.0, 200.0);
        engine.add_function("sin(x)", "#00f".parse().unwrap());
        let report = engine.remove_function(0).unwrap();
        assert!(engine.functions().is_empty());
        assert!(report.curves.is_empty());
        assert_eq!(engine.surface().paths_with_color(BLUE).count(), 0);
        assert!(engine.remove_function(0).is_err());
    }

    #[test]
    fn functions_keep_insertion_order() {
        let mut engine = GraphEngine::new(200.0, 200.0);
        engine.add_function("x", RED);
        let report = engine.add_function("-x", BLUE);
        let listed: Vec<_> = engine
            .functions()
            .iter()
            .map(|entry| (entry.expression().to_string(), entry.color()))
            .collect();
        assert_eq!(listed, vec![("x".to_string(), RED), ("-x".to_string(), BLUE)]);
        let indices: Vec<_> = report.curves.iter().map(|curve| curve.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn every_command_redraws_from_scratch() {
        let mut engine = GraphEngine::new(200.0, 200.0);
        engine.add_function("x", BLUE);
        let before = engine.surface().commands().len();
        engine.render();
        assert_eq!(engine.surface().commands().len(), before);
        engine.resize(300.0, 100.0);
        let first = engine.surface().paths_with_color(BLUE).next().unwrap()[0][0];
        assert_eq!(first, ScreenPoint::new(0.0, 100.0));
    }

    #[test]
    fn viewport_change_moves_curve() {
        let mut engine = GraphEngine::new(100.0, 100.0);
        engine.add_function("x", BLUE);
        let viewport = Viewport::from_bounds(0.0, 10.0, 0.0, 10.0, 0.5).unwrap();
        let report = engine.set_viewport(viewport);
        assert_eq!(report.curves[0].stats.valid_samples, 21);
        let curve = &engine.surface().paths_with_color(BLUE).next().unwrap()[0];
        assert_eq!(curve.first(), Some(&ScreenPoint::new(0.0, 100.0)));
        assert_eq!(curve.last(), Some(&ScreenPoint::new(100.0, 0.0)));
    }

    #[test]
    fn angle_mode_switch_recompiles() {
        let viewport = Viewport::from_bounds(0.0, 180.0, -1.5, 1.5, 90.0).unwrap();
        let mut engine = GraphEngine::builder()
            .viewport(viewport)
            .function("sin(x)", BLUE)
            .build(RenderList::new(200.0, 200.0));
        let transform = Transform::new(&viewport, 200.0, 200.0).unwrap();
        let row_at_90 = |engine: &GraphEngine| {
            engine.surface().paths_with_color(BLUE).next().unwrap()[0][1].y
        };
        let close = |a: f32, b: f32| (a - b).abs() < 1e-3;

        let radian_row = transform.y_to_pixel(90_f64.sin()) as f32;
        let degree_row = transform.y_to_pixel(1.0) as f32;
        assert!(close(row_at_90(&engine), radian_row));

        engine.set_angle_mode(AngleMode::Degree);
        assert_eq!(engine.angle_mode(), AngleMode::Degree);
        assert!(close(row_at_90(&engine), degree_row));
        assert!(engine.surface().texts().any(|label| label.ends_with('°')));

        engine.set_angle_mode(AngleMode::Radian);
        assert!(close(row_at_90(&engine), radian_row));
    }

    #[test]
    fn runaway_nesting_is_a_compile_failure() {
        let mut engine = GraphEngine::new(200.0, 200.0);
        engine.add_function(format!("{}x{}", "(".repeat(1000), ")".repeat(1000)), RED);
        let report = engine.add_function("x", BLUE);
        assert!(matches!(
            report.failures[0].error,
            CompileError::TooDeep { .. }
        ));
        assert_eq!(report.curves.len(), 1);
        assert_eq!(engine.surface().paths_with_color(BLUE).count(), 1);
    }

    #[test]
    fn zero_sized_surface_draws_nothing() {
        let mut engine = GraphEngine::new(0.0, 0.0);
        let report = engine.add_function("x", BLUE);
        assert!(report.curves.is_empty());
        assert!(engine.surface().commands().is_empty());
    }
}
