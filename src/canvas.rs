use crate::painter::{Context2d, Painter, Viewport};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type CanvasSurface = Painter<web::CanvasRenderingContext2d>;

impl Context2d for web::CanvasRenderingContext2d {
    fn set_transform(&self, m: [f64; 6]) {
        _ = web::CanvasRenderingContext2d::set_transform(self, m[0], m[1], m[2], m[3], m[4], m[5]);
    }

    fn set_fill_style(&self, css: &str) {
        self.set_fill_style_str(css);
    }

    fn set_stroke_style(&self, css: &str) {
        self.set_stroke_style_str(css);
    }

    fn set_line_width(&self, width: f64) {
        web::CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_cap(&self, cap: &str) {
        web::CanvasRenderingContext2d::set_line_cap(self, cap);
    }

    fn set_line_join(&self, join: &str) {
        web::CanvasRenderingContext2d::set_line_join(self, join);
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        web::CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn begin_path(&self) {
        web::CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&self, x: f64, y: f64) {
        web::CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        web::CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn arc(&self, x: f64, y: f64, radius: f64) {
        _ = web::CanvasRenderingContext2d::arc(self, x, y, radius, 0.0, std::f64::consts::TAU);
    }

    fn stroke(&self) {
        web::CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&self) {
        web::CanvasRenderingContext2d::fill(self);
    }
}

pub fn canvas_surface(
    canvas: &web::HtmlCanvasElement,
    viewport: Rc<Cell<Viewport>>,
) -> anyhow::Result<CanvasSurface> {
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(Painter::new(ctx, viewport))
}
