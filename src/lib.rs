#![cfg(target_arch = "wasm32")]
use scope_core::{Acquisition, Visualizer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod canvas;
mod dom;
mod errors;
mod frame;
mod options;
mod painter;
mod timer;

pub use options::MountOptions;

/// Canvas picked up automatically when the module starts.
const AUTO_CANVAS_ID: &str = "scope-canvas";

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<ScopeHandle>> = const { RefCell::new(None) };
}

struct Mounted {
    acquisition: Rc<RefCell<Acquisition<audio::AnalyserSource>>>,
    frame_loop: frame::FrameLoop,
    palette_timer: Option<timer::PaletteTimer>,
    resize: dom::ResizeListener,
}

impl Mounted {
    fn teardown(self) {
        self.frame_loop.cancel();
        drop(self.palette_timer);
        drop(self.resize);
        self.acquisition.borrow_mut().release();
        log::info!("[scope] unmounted");
    }
}

/// A running scope. Dropping the handle also unmounts it.
#[wasm_bindgen]
pub struct ScopeHandle {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ScopeHandle {
    /// Stop drawing, stop palette rotation and release the microphone.
    pub fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.mounted.is_some()
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn options_from_js(options: JsValue) -> anyhow::Result<MountOptions> {
    if options.is_undefined() || options.is_null() {
        return Ok(MountOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| anyhow::anyhow!("invalid options: {e}"))
}

fn mount_with(canvas_id: &str, opts: MountOptions) -> anyhow::Result<ScopeHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let params = opts.effect_parameters()?;
    let period = params.color_change_period();
    let visualizer = Rc::new(RefCell::new(Visualizer::new(params, rand::random())?));

    if opts.fullscreen {
        dom::request_fullscreen(&document);
    }
    let viewport = Rc::new(Cell::new(painter::Viewport::default()));
    let resize = dom::ResizeListener::install(&canvas, viewport.clone());
    let surface = canvas::canvas_surface(&canvas, viewport)?;

    if opts.simulate_gesture {
        dom::simulate_user_gesture(&document);
    }
    // Frames idle until the microphone arrives; a late grant after unmount
    // is closed immediately by `accept`
    let acquisition = Rc::new(RefCell::new(Acquisition::Pending));
    let acquisition_async = acquisition.clone();
    spawn_local(async move {
        let result = audio::open_microphone().await;
        acquisition_async.borrow_mut().accept(result);
    });

    let palette_timer = period.and_then(|p| timer::PaletteTimer::start(visualizer.clone(), p));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        visualizer,
        acquisition.clone(),
        surface,
    )));
    let frame_loop = frame::start_loop(frame_ctx);
    log::info!(
        "[scope] mounted on #{} preset={} rotate={:?}",
        canvas_id,
        opts.preset.as_deref().unwrap_or("default"),
        period
    );

    Ok(ScopeHandle {
        mounted: Some(Mounted {
            acquisition,
            frame_loop,
            palette_timer,
            resize,
        }),
    })
}

/// Mount a scope on the canvas with the given id.
///
/// `options` may be `undefined` or an object with `preset`, `fullscreen`,
/// `simulateGesture` and any effect parameter in camelCase.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, options: JsValue) -> Result<ScopeHandle, JsValue> {
    let opts = options_from_js(options).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    mount_with(canvas_id, opts).map_err(|e| {
        log::error!("[scope] mount failed: {e:#}");
        JsValue::from_str(&format!("{e:#}"))
    })
}

/// Unmount the scope started from `#scope-canvas`, if any.
#[wasm_bindgen]
pub fn unmount_auto() {
    if let Some(mut handle) = AUTO_MOUNTED.with(|slot| slot.borrow_mut().take()) {
        handle.unmount();
    }
}

fn auto_mount(document: &web::Document) -> anyhow::Result<()> {
    let Some(el) = document.get_element_by_id(AUTO_CANVAS_ID) else {
        log::info!("[scope] no #{AUTO_CANVAS_ID}; waiting for mount()");
        return Ok(());
    };
    let mut opts = match el.get_attribute("data-options") {
        Some(json) => {
            let value = js_sys::JSON::parse(&json)
                .map_err(|e| anyhow::anyhow!("data-options is not JSON: {:?}", e))?;
            options_from_js(value)?
        }
        None => MountOptions::default(),
    };
    if let Some(name) = el.get_attribute("data-preset") {
        opts.preset.get_or_insert(name);
    }
    let handle = mount_with(AUTO_CANVAS_ID, opts)?;
    AUTO_MOUNTED.with(|slot| {
        if let Some(mut previous) = slot.borrow_mut().replace(handle) {
            previous.unmount();
        }
    });
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scope-web starting");

    if let Some(document) = dom::window_document() {
        if let Err(e) = auto_mount(&document) {
            log::error!("[scope] auto-mount failed: {e:#}");
        }
    }
    Ok(())
}
