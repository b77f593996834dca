use scope_core::{AcquireError, SampleSource, ANALYSER_FFT_SIZE};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::errors::{acquire_error_from_dom, release_on_err};

/// Microphone stream routed into an `AnalyserNode`. Nothing is connected to
/// the context destination, so the input is never played back.
pub struct AnalyserSource {
    audio_ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    stream: web::MediaStream,
    _source: web::MediaStreamAudioSourceNode,
    window_len: usize,
}

fn classify(err: &JsValue) -> AcquireError {
    match err.dyn_ref::<web::DomException>() {
        Some(dom) => acquire_error_from_dom(&dom.name(), &dom.message()),
        None => AcquireError::DeviceUnavailable(format!("{:?}", err)),
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Ask for microphone access and wire the stream into an analyser.
pub async fn open_microphone() -> Result<AnalyserSource, AcquireError> {
    let window = web::window()
        .ok_or_else(|| AcquireError::DeviceUnavailable("no window".to_string()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| classify(&e))?;

    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::FALSE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| classify(&e))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| classify(&e))?
        .dyn_into()
        .map_err(|_| AcquireError::DeviceUnavailable("getUserMedia returned no stream".into()))?;

    release_on_err(AnalyserSource::connect(stream.clone()), || stop_tracks(&stream))
}

impl AnalyserSource {
    fn connect(stream: web::MediaStream) -> Result<Self, AcquireError> {
        let unavailable = |what: &str, e: JsValue| {
            AcquireError::DeviceUnavailable(format!("{what}: {:?}", e))
        };
        let audio_ctx = web::AudioContext::new().map_err(|e| unavailable("AudioContext", e))?;
        _ = audio_ctx.resume();
        let wire = || -> Result<_, AcquireError> {
            let source = audio_ctx
                .create_media_stream_source(&stream)
                .map_err(|e| unavailable("MediaStreamSource", e))?;
            let analyser =
                web::AnalyserNode::new(&audio_ctx).map_err(|e| unavailable("AnalyserNode", e))?;
            analyser.set_fft_size(ANALYSER_FFT_SIZE);
            source
                .connect_with_audio_node(&analyser)
                .map_err(|e| unavailable("connect", e))?;
            Ok((source, analyser))
        };
        let (source, analyser) = release_on_err(wire(), || {
            _ = audio_ctx.close();
        })?;
        let window_len = analyser.frequency_bin_count() as usize;
        log::info!(
            "[audio] microphone live: rate={}Hz window={}",
            audio_ctx.sample_rate(),
            window_len
        );
        Ok(Self {
            audio_ctx,
            analyser,
            stream,
            _source: source,
            window_len,
        })
    }
}

impl SampleSource for AnalyserSource {
    fn window_len(&self) -> usize {
        self.window_len
    }

    fn read_window(&mut self, out: &mut [f32]) {
        self.analyser.get_float_time_domain_data(out);
    }

    fn close(&mut self) {
        _ = self.analyser.disconnect();
        stop_tracks(&self.stream);
        _ = self.audio_ctx.close();
        log::info!("[audio] microphone released");
    }
}
