use scope_core::Visualizer;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Palette rotation on `setInterval`; cleared on drop.
pub struct PaletteTimer {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl PaletteTimer {
    pub fn start(visualizer: Rc<RefCell<Visualizer>>, period: Duration) -> Option<Self> {
        let window = web::window()?;
        let callback = Closure::wrap(Box::new(move || {
            let index = visualizer.borrow_mut().rotate_palette();
            log::debug!("[scope] palette -> {index}");
        }) as Box<dyn FnMut()>);
        let ms = period.as_millis().min(i32::MAX as u128) as i32;
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            ms,
        ) {
            Ok(id) => Some(Self {
                id,
                _callback: callback,
            }),
            Err(e) => {
                log::warn!("[scope] setInterval failed: {:?}", e);
                None
            }
        }
    }
}

impl Drop for PaletteTimer {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
