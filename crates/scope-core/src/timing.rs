use std::time::Duration;

/// Interval timer driven by elapsed time rather than a host callback.
///
/// `advance` reports how many periods completed since the last call and
/// carries the remainder. A `None` period never fires.
#[derive(Clone, Debug)]
pub struct RepeatingTimer {
    period: Option<Duration>,
    elapsed: Duration,
}

impl RepeatingTimer {
    pub fn new(period: Option<Duration>) -> Self {
        let period = period.filter(|p| !p.is_zero());
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn advance(&mut self, dt: Duration) -> u64 {
        let Some(period) = self.period else {
            return 0;
        };
        self.elapsed += dt;
        let fired = self.elapsed.as_nanos() / period.as_nanos();
        if fired == 0 {
            return 0;
        }
        let consumed = period.as_nanos() * fired;
        self.elapsed = Duration::from_nanos((self.elapsed.as_nanos() - consumed) as u64);
        fired.min(u64::MAX as u128) as u64
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

/// Frame-rate meter that reports once per `report_every`.
#[derive(Clone, Debug)]
pub struct FrameMeter {
    report_every: Duration,
    accum: Duration,
    frames: u32,
}

impl FrameMeter {
    pub fn new(report_every: Duration) -> Self {
        Self {
            report_every,
            accum: Duration::ZERO,
            frames: 0,
        }
    }

    /// Record one frame; returns the average fps when a report is due.
    pub fn record(&mut self, dt: Duration) -> Option<f32> {
        self.accum += dt;
        self.frames += 1;
        if self.accum < self.report_every || self.accum.is_zero() {
            return None;
        }
        let fps = self.frames as f32 / self.accum.as_secs_f32();
        self.accum = Duration::ZERO;
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_on_period_boundaries() {
        let mut t = RepeatingTimer::new(Some(Duration::from_millis(1000)));
        assert_eq!(t.advance(Duration::from_millis(999)), 0);
        assert_eq!(t.advance(Duration::from_millis(1)), 1);
        assert_eq!(t.advance(Duration::from_millis(2500)), 2);
        assert_eq!(t.advance(Duration::from_millis(500)), 1);
    }

    #[test]
    fn disabled_timer_never_fires() {
        let mut t = RepeatingTimer::new(None);
        assert_eq!(t.advance(Duration::from_secs(3600)), 0);
        let mut z = RepeatingTimer::new(Some(Duration::ZERO));
        assert_eq!(z.period(), None);
        assert_eq!(z.advance(Duration::from_secs(1)), 0);
    }

    #[test]
    fn frame_meter_reports_average() {
        let mut m = FrameMeter::new(Duration::from_secs(1));
        let frame = Duration::from_millis(20);
        let mut report = None;
        for _ in 0..50 {
            report = report.or(m.record(frame));
        }
        let fps = report.expect("one report after a second of frames");
        assert!((fps - 50.0).abs() < 0.5);
    }
}
