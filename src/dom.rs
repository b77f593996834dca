use crate::painter::Viewport;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

/// Size the backing store to the CSS box times `devicePixelRatio` and return
/// the resulting viewport.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let viewport = Viewport::new(rect.width() as f32, rect.height() as f32, dpr as f32);
    let (w_px, h_px) = viewport.backing_size();
    // assigning width/height resets the 2d context state
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    viewport
}

/// Keeps the canvas backing store and shared viewport matched to the CSS
/// size; detaches on drop.
pub struct ResizeListener {
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn install(canvas: &web::HtmlCanvasElement, viewport: Rc<Cell<Viewport>>) -> Self {
        viewport.set(sync_canvas_backing_size(canvas));
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            viewport.set(sync_canvas_backing_size(&canvas_resize));
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        Self { closure }
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            _ = window.remove_event_listener_with_callback(
                "resize",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Ask for fullscreen on the document element. Failures (including the
/// asynchronous promise rejection) are logged and otherwise ignored.
pub fn request_fullscreen(document: &web::Document) {
    let Some(root) = document.document_element() else {
        log::warn!("[fullscreen] request failed: no document element");
        return;
    };
    let request = match js_sys::Reflect::get(&root, &"requestFullscreen".into())
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
    {
        Some(f) => f,
        None => {
            log::warn!("[fullscreen] request failed: requestFullscreen unsupported");
            return;
        }
    };
    match request.call0(&root) {
        Ok(ret) => {
            if let Ok(promise) = ret.dyn_into::<js_sys::Promise>() {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("[fullscreen] request failed: {:?}", e);
                    }
                });
            }
        }
        Err(e) => log::warn!("[fullscreen] request failed: {:?}", e),
    }
}

/// Dispatch a bubbling synthetic click on the document. Some hosts gate the
/// microphone prompt on a prior user gesture; whether this satisfies them is
/// up to the host.
pub fn simulate_user_gesture(document: &web::Document) {
    let init = web::MouseEventInit::new();
    init.set_bubbles(true);
    match web::MouseEvent::new_with_mouse_event_init_dict("click", &init) {
        Ok(ev) => {
            _ = document.dispatch_event(&ev);
        }
        Err(e) => log::warn!("[gesture] synthetic click failed: {:?}", e),
    }
}
