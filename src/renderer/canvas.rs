//! Canvas 2D drawing

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Arrow, Scene, Shape, colors, css_color};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Arrow head size in world units
const ARROW_HEAD: f64 = 8.0;

/// Draws scenes onto a canvas, scaling world units to the canvas size
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn render(&self, scene: &Scene) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;

        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.set_fill_style_str(&css_color(colors::BACKGROUND));
        self.ctx.fill_rect(0.0, 0.0, w, h);
        let _ = self
            .ctx
            .scale(w / CANVAS_WIDTH, h / CANVAS_HEIGHT);

        for shape in &scene.shapes {
            self.draw_shape(shape);
        }
        for arrow in &scene.arrows {
            self.draw_arrow(arrow);
        }
    }

    fn draw_shape(&self, shape: &Shape) {
        let Some((first, rest)) = shape.outline.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();

        self.ctx.set_fill_style_str(&css_color(shape.fill));
        self.ctx.fill();
        self.ctx.set_stroke_style_str(&css_color(shape.stroke));
        self.ctx.set_line_width(1.5);
        self.ctx.stroke();
    }

    fn draw_arrow(&self, arrow: &Arrow) {
        let dir = (arrow.to - arrow.from).normalize_or_zero();
        if dir == DVec2::ZERO {
            return;
        }
        let side = dir.perp() * (ARROW_HEAD * 0.5);
        let base = arrow.to - dir * ARROW_HEAD;

        self.ctx.set_stroke_style_str(&css_color(arrow.color));
        self.ctx.set_fill_style_str(&css_color(arrow.color));
        self.ctx.set_line_width(2.0);

        self.ctx.begin_path();
        self.ctx.move_to(arrow.from.x, arrow.from.y);
        self.ctx.line_to(base.x, base.y);
        self.ctx.stroke();

        self.ctx.begin_path();
        self.ctx.move_to(arrow.to.x, arrow.to.y);
        self.ctx.line_to(base.x + side.x, base.y + side.y);
        self.ctx.line_to(base.x - side.x, base.y - side.y);
        self.ctx.close_path();
        self.ctx.fill();
    }
}
