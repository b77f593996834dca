use crate::audio::AnalyserSource;
use crate::canvas::CanvasSurface;
use instant::Instant;
use scope_core::{Acquisition, FrameMeter, FrameOutcome, Visualizer, WINDOW_LEN};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub visualizer: Rc<RefCell<Visualizer>>,
    pub acquisition: Rc<RefCell<Acquisition<AnalyserSource>>>,
    pub surface: CanvasSurface,
    pub samples: Vec<f32>,
    pub last_instant: Instant,
    pub meter: FrameMeter,
}

impl FrameContext {
    pub fn new(
        visualizer: Rc<RefCell<Visualizer>>,
        acquisition: Rc<RefCell<Acquisition<AnalyserSource>>>,
        surface: CanvasSurface,
    ) -> Self {
        Self {
            visualizer,
            acquisition,
            surface,
            samples: Vec::with_capacity(WINDOW_LEN),
            last_instant: Instant::now(),
            meter: FrameMeter::new(Duration::from_secs(2)),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let mut acquisition = self.acquisition.borrow_mut();
        let window = acquisition.sample_window(&mut self.samples);
        let outcome = self.visualizer.borrow_mut().tick(window, &mut self.surface);

        if let (Some(fps), FrameOutcome::Drawn(stats)) = (self.meter.record(dt), outcome) {
            log::debug!(
                "[scope] fps={:.1} rms={:.3} chance={:.2} sparkles={}",
                fps,
                stats.rms,
                stats.spawn_chance,
                stats.live_sparkles
            );
        }
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running `requestAnimationFrame` loop.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let window = web::window()?;
    let slot = tick.borrow();
    let callback = slot.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        raf_id_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(&tick));
    FrameLoop { raf_id, tick }
}

impl FrameLoop {
    /// Cancel the pending frame and drop the callback. Idempotent.
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // breaks the closure -> slot cycle
        self.tick.borrow_mut().take();
    }
}
