use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use scope_core::{Acquisition, FrameMeter, FrameOutcome, RepeatingTimer, Visualizer, WINDOW_LEN};
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};

mod capture;
mod cli;
mod gpu;

use capture::MicCapture;
use gpu::{GpuState, SceneBatch};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let params = args.effect_parameters()?;
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!(
        "[scope] preset={} seed={} palette={} rotate={:?}",
        args.preset,
        seed,
        params.colors.len(),
        params.color_change_period()
    );
    let mut visualizer = Visualizer::new(params, seed)?;

    // Failure is logged inside `accept`; the scope then idles on a blank screen
    let mut acquisition: Acquisition<MicCapture> = Acquisition::Pending;
    acquisition.accept(MicCapture::open(WINDOW_LEN));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title("scope")
        .build(&event_loop)?;
    if !args.windowed {
        request_fullscreen(&window);
    }

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let mut batch = SceneBatch::default();
    let mut samples: Vec<f32> = Vec::with_capacity(WINDOW_LEN);
    let mut rotator = RepeatingTimer::new(visualizer.params().color_change_period());
    let mut meter = FrameMeter::new(Duration::from_secs(1));
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            acquisition.release();
            elwt.exit();
        }
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;

            let fired = rotator.advance(dt);
            if fired > 0 {
                let index = visualizer.rotate_palette_by(fired);
                log::debug!("[scope] palette -> {index}");
            }

            batch.begin(state.width as f32, state.height as f32);
            let outcome = visualizer.tick(acquisition.sample_window(&mut samples), &mut batch);
            if let (Some(fps), FrameOutcome::Drawn(stats)) = (meter.record(dt), outcome) {
                log::debug!(
                    "[scope] fps={:.1} rms={:.3} chance={:.2} sparkles={}",
                    fps,
                    stats.rms,
                    stats.spawn_chance,
                    stats.live_sparkles
                );
            }

            match state.render(&batch) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory; exiting");
                    acquisition.release();
                    elwt.exit();
                }
                Err(e) => log::warn!("[gpu] surface error: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}

// Best effort: a missing monitor leaves the window as-is
fn request_fullscreen(window: &Window) {
    match window.current_monitor() {
        Some(monitor) => window.set_fullscreen(Some(Fullscreen::Borderless(Some(monitor)))),
        None => log::warn!("[fullscreen] request failed: no current monitor"),
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
