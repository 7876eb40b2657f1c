use rodio::Sink;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Linear crossfade between two music sinks. `apply` is called from the
/// engine's fade tick with the ducker's current gain so a duck landing
/// mid-crossfade scales both sides consistently.
pub(super) struct Crossfade {
    from: Arc<Sink>,
    to: Arc<Sink>,
    start: Instant,
    duration: Duration,
}

impl Crossfade {
    pub(super) fn new(from: Arc<Sink>, to: Arc<Sink>, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start: Instant::now(),
            duration: Duration::from_millis(duration_ms.max(1)),
        }
    }

    /// Returns true when the fade completed; the outgoing sink is stopped.
    pub(super) fn apply(&mut self, base_volume: f32) -> bool {
        let t = (self.start.elapsed().as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.from.set_volume(base_volume * (1.0 - t));
        self.to.set_volume(base_volume * t);
        if t >= 1.0 {
            self.from.stop();
            return true;
        }
        false
    }

    pub(super) fn stop(self) {
        self.from.stop();
        self.to.stop();
    }

    /// Abandon the fade, keeping the incoming sink alive.
    pub(super) fn settle(self) {
        self.from.stop();
    }
}
