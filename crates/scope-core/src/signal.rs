//! Signal acquisition: the live time-domain sample window and its lifecycle.

use thiserror::Error;

/// A live monophonic audio input exposing its most recent time-domain window.
///
/// Samples are nominally in [-1, 1]. The window length is fixed when the
/// source is opened.
pub trait SampleSource {
    fn window_len(&self) -> usize;
    /// Copy the most recent `out.len()` samples into `out`, oldest first.
    fn read_window(&mut self, out: &mut [f32]);
    /// Release the underlying device/stream.
    fn close(&mut self);
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcquireError {
    #[error("microphone permission denied: {0}")]
    PermissionDenied(String),
    #[error("audio input device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Acquisition state of the audio source. Ticks are idle unless `Live`.
#[derive(Debug)]
pub enum Acquisition<S> {
    Pending,
    Live(S),
    Failed(AcquireError),
    Released,
}

impl<S> Default for Acquisition<S> {
    fn default() -> Self {
        Acquisition::Pending
    }
}

impl<S: SampleSource> Acquisition<S> {
    pub fn from_result(result: Result<S, AcquireError>) -> Self {
        match result {
            Ok(source) => Acquisition::Live(source),
            Err(e) => {
                log::error!("[audio] {e}");
                Acquisition::Failed(e)
            }
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, Acquisition::Live(_))
    }

    /// Refresh `buf` from the live source and return it, or `None` when idle.
    pub fn sample_window<'b>(&mut self, buf: &'b mut Vec<f32>) -> Option<&'b [f32]> {
        let Acquisition::Live(source) = self else {
            return None;
        };
        let n = source.window_len();
        if n == 0 {
            return None;
        }
        if buf.len() != n {
            buf.resize(n, 0.0);
        }
        source.read_window(buf);
        Some(buf.as_slice())
    }

    /// Install the outcome of an asynchronous open. A source that arrives
    /// after [`release`](Self::release) is closed immediately.
    pub fn accept(&mut self, result: Result<S, AcquireError>) {
        if self.is_released() {
            if let Ok(mut late) = result {
                late.close();
                log::info!("[audio] input opened after teardown; released");
            }
            return;
        }
        *self = Acquisition::from_result(result);
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        matches!(self, Acquisition::Released)
    }

    /// Close a live source and mark the acquisition released. Idempotent.
    pub fn release(&mut self) {
        if let Acquisition::Live(mut source) = std::mem::replace(self, Acquisition::Released) {
            source.close();
            log::info!("[audio] input released");
        }
    }
}

/// Root-mean-square loudness of a window; 0 for an empty window.
pub fn rms(window: &[f32]) -> f32 {
    if window.is_empty() {
        return 0.0;
    }
    let sum: f32 = window.iter().map(|s| s * s).sum();
    (sum / window.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        samples: Vec<f32>,
        closed: usize,
    }

    impl SampleSource for Fixed {
        fn window_len(&self) -> usize {
            self.samples.len()
        }
        fn read_window(&mut self, out: &mut [f32]) {
            out.copy_from_slice(&self.samples);
        }
        fn close(&mut self) {
            self.closed += 1;
        }
    }

    #[test]
    fn rms_of_known_windows() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(rms(&[0.0; 8]), 0.0);
        assert!((rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert!((rms(&[0.0, 1.0, 0.0, -1.0]) - 0.5_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn pending_and_failed_yield_no_window() {
        let mut buf = Vec::new();
        let mut pending: Acquisition<Fixed> = Acquisition::Pending;
        assert!(pending.sample_window(&mut buf).is_none());
        let mut failed: Acquisition<Fixed> =
            Acquisition::from_result(Err(AcquireError::PermissionDenied("denied".into())));
        assert!(failed.sample_window(&mut buf).is_none());
        assert!(matches!(failed, Acquisition::Failed(_)));
    }

    #[test]
    fn live_source_fills_buffer_and_releases_once() {
        let mut acq = Acquisition::Live(Fixed {
            samples: vec![0.25, -0.5, 1.0],
            closed: 0,
        });
        let mut buf = Vec::new();
        assert_eq!(acq.sample_window(&mut buf), Some(&[0.25, -0.5, 1.0][..]));
        acq.release();
        assert!(matches!(acq, Acquisition::Released));
        acq.release();
        assert!(acq.sample_window(&mut buf).is_none());
    }

    #[test]
    fn source_arriving_after_release_is_not_installed() {
        let mut acq: Acquisition<Fixed> = Acquisition::Pending;
        acq.release();
        assert!(acq.is_released());
        acq.accept(Ok(Fixed {
            samples: vec![0.0; 4],
            closed: 0,
        }));
        assert!(acq.is_released());
        assert!(!acq.is_live());
    }

    #[test]
    fn accept_installs_live_source() {
        let mut acq: Acquisition<Fixed> = Acquisition::default();
        acq.accept(Ok(Fixed {
            samples: vec![0.5; 2],
            closed: 0,
        }));
        assert!(acq.is_live());
    }
}
