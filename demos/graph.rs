use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use tracing_subscriber::EnvFilter;

use gpui_fnplot::{Color, GpuiGraphView, GraphEngine, RenderList, Theme, Viewport};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let viewport = Viewport::from_bounds(-10.0, 10.0, -6.0, 6.0, 0.05)
                .unwrap_or_default();
            let engine = GraphEngine::builder()
                .viewport(viewport)
                .theme(Theme::light())
                .function("sin(x)", Color::from_rgb8(0x1f, 0x77, 0xb4))
                .function("x^2 / 4", Color::from_rgb8(0xd6, 0x27, 0x28))
                .function("1/x", Color::from_rgb8(0x2c, 0xa0, 0x2c))
                .build(RenderList::new(720.0, 480.0));

            cx.new(|_| GpuiGraphView::new(engine))
        })
        .unwrap();
    });
}
