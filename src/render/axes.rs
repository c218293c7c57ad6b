//! Grid lines, axes, tick marks and tick labels.

use crate::axis::{AxisFormatter, AxisTicks};
use crate::expr::AngleMode;
use crate::geom::ScreenPoint;
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::Viewport;

use super::{RenderSurface, TextAlign};

const X_LABEL_OFFSET: f32 = 20.0;
const Y_LABEL_OFFSET: (f32, f32) = (10.0, 3.0);

/// Draw full-span grid lines at every non-zero tick of both axes.
pub fn draw_grid<S: RenderSurface + ?Sized>(
    surface: &mut S,
    transform: &Transform,
    viewport: &Viewport,
    theme: &Theme,
) {
    let width = transform.width();
    let height = transform.height();

    if let Some(ticks) = AxisTicks::for_range(viewport.x()) {
        for tick in ticks.non_zero() {
            let px = transform.x_to_pixel(tick.value) as f32;
            stroke_line(
                surface,
                ScreenPoint::new(px, 0.0),
                ScreenPoint::new(px, height),
                theme,
                false,
            );
        }
    }
    if let Some(ticks) = AxisTicks::for_range(viewport.y()) {
        for tick in ticks.non_zero() {
            let py = transform.y_to_pixel(tick.value) as f32;
            stroke_line(
                surface,
                ScreenPoint::new(0.0, py),
                ScreenPoint::new(width, py),
                theme,
                false,
            );
        }
    }
}

/// Draw the `y = 0` and `x = 0` axes when they are visible, with tick marks
/// and labels at the grid interval. The origin tick is never labelled.
pub fn draw_axes<S: RenderSurface + ?Sized>(
    surface: &mut S,
    transform: &Transform,
    viewport: &Viewport,
    mode: AngleMode,
    theme: &Theme,
) {
    let width = transform.width();
    let height = transform.height();
    let half = theme.tick_half_length;

    if viewport.y().contains(0.0) {
        let axis_y = transform.y_to_pixel(0.0) as f32;
        stroke_line(
            surface,
            ScreenPoint::new(0.0, axis_y),
            ScreenPoint::new(width, axis_y),
            theme,
            true,
        );
        let formatter = AxisFormatter::for_x_axis(mode);
        let label_style = theme.label.with_align(TextAlign::Center);
        if let Some(ticks) = AxisTicks::for_range(viewport.x()) {
            for tick in ticks.non_zero() {
                let px = transform.x_to_pixel(tick.value) as f32;
                stroke_line(
                    surface,
                    ScreenPoint::new(px, axis_y - half),
                    ScreenPoint::new(px, axis_y + half),
                    theme,
                    true,
                );
                surface.draw_text(
                    &formatter.format(tick.value, ticks.interval()),
                    ScreenPoint::new(px, axis_y + X_LABEL_OFFSET),
                    &label_style,
                );
            }
        }
    }

    if viewport.x().contains(0.0) {
        let axis_x = transform.x_to_pixel(0.0) as f32;
        stroke_line(
            surface,
            ScreenPoint::new(axis_x, 0.0),
            ScreenPoint::new(axis_x, height),
            theme,
            true,
        );
        let formatter = AxisFormatter::for_y_axis();
        let label_style = theme.label.with_align(TextAlign::Right);
        if let Some(ticks) = AxisTicks::for_range(viewport.y()) {
            for tick in ticks.non_zero() {
                let py = transform.y_to_pixel(tick.value) as f32;
                stroke_line(
                    surface,
                    ScreenPoint::new(axis_x - half, py),
                    ScreenPoint::new(axis_x + half, py),
                    theme,
                    true,
                );
                surface.draw_text(
                    &formatter.format(tick.value, ticks.interval()),
                    ScreenPoint::new(axis_x - Y_LABEL_OFFSET.0, py + Y_LABEL_OFFSET.1),
                    &label_style,
                );
            }
        }
    }
}

fn stroke_line<S: RenderSurface + ?Sized>(
    surface: &mut S,
    start: ScreenPoint,
    end: ScreenPoint,
    theme: &Theme,
    axis: bool,
) {
    surface.begin_path();
    surface.move_to(start);
    surface.line_to(end);
    surface.stroke(if axis { theme.axis } else { theme.grid });
}
