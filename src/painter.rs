use glam::Vec2;
use scope_core::{Color, StrokeStyle, Surface};
use std::cell::Cell;
use std::rc::Rc;

/// Canvas layout in CSS pixels plus the device pixel ratio of the backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f32,
    pub css_height: f32,
    pub dpr: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            css_width: 0.0,
            css_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(css_width: f32, css_height: f32, dpr: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            css_width: sane(css_width),
            css_height: sane(css_height),
            dpr: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    /// Backing store size in device pixels, never below 1x1.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.css_width * self.dpr).round() as u32;
        let h = (self.css_height * self.dpr).round() as u32;
        (w.max(1), h.max(1))
    }

    /// Matrix for `setTransform` mapping CSS pixels onto the backing store.
    pub fn transform(&self) -> [f64; 6] {
        let s = self.dpr as f64;
        [s, 0.0, 0.0, s, 0.0, 0.0]
    }
}

/// The slice of `CanvasRenderingContext2d` the painter uses.
pub trait Context2d {
    fn set_transform(&self, m: [f64; 6]);
    fn set_fill_style(&self, css: &str);
    fn set_stroke_style(&self, css: &str);
    fn set_line_width(&self, width: f64);
    fn set_line_cap(&self, cap: &str);
    fn set_line_join(&self, join: &str);
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn arc(&self, x: f64, y: f64, radius: f64);
    fn stroke(&self);
    fn fill(&self);
}

/// `Surface` over a 2D context, drawing in CSS pixels.
///
/// Resizing a canvas resets its context state, so the transform is applied on
/// every clear and the round caps/joins on every stroke.
pub struct Painter<C> {
    ctx: C,
    viewport: Rc<Cell<Viewport>>,
}

impl<C: Context2d> Painter<C> {
    pub fn new(ctx: C, viewport: Rc<Cell<Viewport>>) -> Self {
        Self { ctx, viewport }
    }

    #[cfg(test)]
    pub fn context(&self) -> &C {
        &self.ctx
    }
}

impl<C: Context2d> Surface for Painter<C> {
    fn size(&self) -> (f32, f32) {
        let vp = self.viewport.get();
        (vp.css_width, vp.css_height)
    }

    fn clear(&mut self, color: Color) {
        let vp = self.viewport.get();
        self.ctx.set_transform(vp.transform());
        self.ctx.set_fill_style(&color.to_css());
        self.ctx
            .fill_rect(0.0, 0.0, vp.css_width as f64, vp.css_height as f64);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.set_line_width(style.width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.ctx.set_stroke_style(&style.color.to_css());
        self.ctx.move_to(first.x as f64, first.y as f64);
        if rest.is_empty() {
            // zero-length path still paints a round cap
            self.ctx.line_to(first.x as f64, first.y as f64);
        }
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        self.ctx.set_fill_style(&color.to_css());
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64);
        self.ctx.fill();
    }
}
