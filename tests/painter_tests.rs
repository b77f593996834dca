// Host-side tests for the Canvas 2D painter.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod painter {
    include!("../src/painter.rs");
}

use glam::Vec2;
use painter::{Context2d, Painter, Viewport};
use scope_core::{Color, StrokeStyle, Surface};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// Mimics the context state a canvas keeps, including the reset that
// assigning `canvas.width` triggers.
#[derive(Default)]
struct FakeContext {
    line_cap: RefCell<String>,
    line_join: RefCell<String>,
    transform: Cell<[f64; 6]>,
    strokes: RefCell<Vec<(String, String, f64)>>,
    rects: RefCell<Vec<[f64; 4]>>,
    line_width: Cell<f64>,
}

impl FakeContext {
    fn new() -> Self {
        let ctx = Self::default();
        ctx.reset();
        ctx
    }

    fn reset(&self) {
        *self.line_cap.borrow_mut() = "butt".into();
        *self.line_join.borrow_mut() = "miter".into();
        self.transform.set([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        self.line_width.set(1.0);
    }
}

impl Context2d for FakeContext {
    fn set_transform(&self, m: [f64; 6]) {
        self.transform.set(m);
    }
    fn set_fill_style(&self, _css: &str) {}
    fn set_stroke_style(&self, _css: &str) {}
    fn set_line_width(&self, width: f64) {
        self.line_width.set(width);
    }
    fn set_line_cap(&self, cap: &str) {
        *self.line_cap.borrow_mut() = cap.into();
    }
    fn set_line_join(&self, join: &str) {
        *self.line_join.borrow_mut() = join.into();
    }
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.rects.borrow_mut().push([x, y, w, h]);
    }
    fn begin_path(&self) {}
    fn move_to(&self, _x: f64, _y: f64) {}
    fn line_to(&self, _x: f64, _y: f64) {}
    fn arc(&self, _x: f64, _y: f64, _radius: f64) {}
    fn stroke(&self) {
        self.strokes.borrow_mut().push((
            self.line_cap.borrow().clone(),
            self.line_join.borrow().clone(),
            self.line_width.get(),
        ));
    }
    fn fill(&self) {}
}

fn line() -> (Vec<Vec2>, StrokeStyle) {
    (
        vec![Vec2::new(0.0, 10.0), Vec2::new(5.0, 0.0), Vec2::new(10.0, 10.0)],
        StrokeStyle {
            width: 2.0,
            color: Color::WHITE,
        },
    )
}

#[test]
fn strokes_stay_round_after_context_reset() {
    let viewport = Rc::new(Cell::new(Viewport::new(100.0, 50.0, 1.0)));
    let mut painter = Painter::new(FakeContext::new(), viewport);
    let (points, style) = line();

    painter.stroke_polyline(&points, &style);
    // a resize assigns canvas.width, which resets the context
    painter.context().reset();
    painter.clear(Color::BLACK);
    painter.stroke_polyline(&points, &style);

    let strokes = painter.context().strokes.borrow();
    assert_eq!(strokes.len(), 2);
    for (cap, join, width) in strokes.iter() {
        assert_eq!(cap, "round");
        assert_eq!(join, "round");
        assert_eq!(*width, 2.0);
    }
}

#[test]
fn draws_in_css_pixels_on_hidpi_backing_store() {
    let viewport = Rc::new(Cell::new(Viewport::new(400.0, 300.0, 2.0)));
    assert_eq!(viewport.get().backing_size(), (800, 600));
    let mut painter = Painter::new(FakeContext::new(), viewport.clone());

    assert_eq!(painter.size(), (400.0, 300.0));
    painter.context().reset();
    painter.clear(Color::BLACK);
    assert_eq!(
        painter.context().transform.get(),
        [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]
    );
    assert_eq!(
        painter.context().rects.borrow().last(),
        Some(&[0.0, 0.0, 400.0, 300.0])
    );

    // the resize listener swaps in a new viewport; the next frame follows it
    viewport.set(Viewport::new(500.0, 250.0, 3.0));
    assert_eq!(painter.size(), (500.0, 250.0));
    painter.context().reset();
    painter.clear(Color::BLACK);
    assert_eq!(
        painter.context().transform.get(),
        [3.0, 0.0, 0.0, 3.0, 0.0, 0.0]
    );
}

#[test]
fn viewport_sanitises_host_values() {
    let vp = Viewport::new(f32::NAN, -5.0, 0.0);
    assert_eq!(vp.css_width, 0.0);
    assert_eq!(vp.css_height, 0.0);
    assert_eq!(vp.dpr, 1.0);
    assert_eq!(vp.backing_size(), (1, 1));
    assert_eq!(Viewport::new(100.5, 20.0, 1.5).backing_size(), (151, 30));
}
