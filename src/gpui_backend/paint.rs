use gpui::{App, Bounds, ContentMask, PathBuilder, Pixels, TextRun, Window, font, point, px};

use crate::geom::ScreenPoint;
use crate::render::{Color, LineStyle, RenderCommand, RenderList, TextAlign, TextStyle};

/// Replay recorded commands with `bounds.origin` as the surface origin.
pub(crate) fn paint_render_list(
    list: &RenderList,
    bounds: Bounds<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let origin = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    window.with_content_mask(Some(ContentMask { bounds }), |window| {
        for command in list.commands() {
            match command {
                RenderCommand::Path { subpaths, style } => {
                    paint_path(window, origin, subpaths, *style);
                }
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => {
                    paint_text(window, cx, origin, *position, text, style);
                }
            }
        }
    });
}

fn paint_path(
    window: &mut Window,
    origin: ScreenPoint,
    subpaths: &[Vec<ScreenPoint>],
    style: LineStyle,
) {
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    let mut any = false;
    for subpath in subpaths {
        let mut points = subpath.iter();
        let Some(first) = points.next() else {
            continue;
        };
        builder.move_to(to_point(origin, *first));
        for next in points {
            builder.line_to(to_point(origin, *next));
            any = true;
        }
    }
    if !any {
        return;
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    origin: ScreenPoint,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let font_size = px(style.size);
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), font_size, &[run], None);
    let width = f32::from(shaped.width);
    let dx = match style.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -width * 0.5,
        TextAlign::Right => -width,
    };
    // Positions are baselines; GPUI paints from the top of the line box.
    let ascent = f32::from(shaped.ascent);
    let line_height = shaped.ascent + shaped.descent;
    let anchor = position.offset(dx, -ascent);
    let _ = shaped.paint(to_point(origin, anchor), line_height, window, cx);
}

fn to_point(origin: ScreenPoint, target: ScreenPoint) -> gpui::Point<Pixels> {
    point(px(origin.x + target.x), px(origin.y + target.y))
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
