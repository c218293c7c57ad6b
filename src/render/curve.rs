//! Curve sampling with path breaks at invalid samples.

use crate::expr::{CompiledFunction, Sample};
use crate::geom::Point;
use crate::transform::Transform;
use crate::view::Viewport;

use super::{LineStyle, RenderSurface};

/// Upper bound on samples taken for one curve in one render.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Summary of one sampled curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurveStats {
    /// Number of disjoint path segments drawn.
    pub segments: usize,
    /// Samples that produced a finite value.
    pub valid_samples: usize,
    /// Samples that produced NaN or an infinity.
    pub invalid_samples: usize,
    /// Finite samples too far off the surface to map to a pixel.
    pub off_surface_samples: usize,
}

/// Number of samples for `[x.min, x.max]` at the viewport step, both ends
/// inclusive, before applying [`MAX_SAMPLES`].
pub(crate) fn sample_count(viewport: &Viewport) -> usize {
    let x = viewport.x();
    let steps = (x.span() / viewport.step() * (1.0 + 1e-9)).floor();
    if steps >= MAX_SAMPLES as f64 {
        MAX_SAMPLES + 1
    } else {
        steps as usize + 1
    }
}

/// Sample `function` across the viewport and stroke the result.
///
/// Samples are taken at `x.min + i * step`. An invalid sample, or a finite
/// one whose pixel position overflows `f32`, closes the open segment so no
/// line is drawn across it; the next drawable sample starts a new segment.
pub fn plot_curve<S: RenderSurface + ?Sized>(
    surface: &mut S,
    transform: &Transform,
    viewport: &Viewport,
    function: &CompiledFunction,
    style: LineStyle,
) -> CurveStats {
    let mut count = sample_count(viewport);
    if count > MAX_SAMPLES {
        tracing::warn!(
            step = viewport.step(),
            span = viewport.x().span(),
            max = MAX_SAMPLES,
            "sampling step too small; truncating curve"
        );
        count = MAX_SAMPLES;
    }

    let x_min = viewport.x().min;
    let step = viewport.step();
    let mut stats = CurveStats::default();
    let mut segment_open = false;

    surface.begin_path();
    for i in 0..count {
        let x = x_min + i as f64 * step;
        match function.evaluate(x) {
            Sample::Valid(y) => {
                stats.valid_samples += 1;
                let point = transform.data_to_screen(Point::new(x, y));
                if !(point.x.is_finite() && point.y.is_finite()) {
                    segment_open = false;
                    stats.off_surface_samples += 1;
                    continue;
                }
                if segment_open {
                    surface.line_to(point);
                } else {
                    surface.move_to(point);
                    segment_open = true;
                    stats.segments += 1;
                }
            }
            Sample::Invalid => {
                segment_open = false;
                stats.invalid_samples += 1;
            }
        }
    }
    surface.stroke(style);
    stats
}
