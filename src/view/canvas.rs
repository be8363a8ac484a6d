use web_sys::CanvasRenderingContext2d;

use super::surface::{Color, DrawSurface};

/// Browser 2D canvas as a [`DrawSurface`]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.rect(x, y, w, h);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        // only fails on a negative radius
        if let Err(e) = self.ctx.arc(cx, cy, radius, start, end) {
            tracing::error!(?e, radius, "canvas arc failed");
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_fill_style(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }
}
