use tokio::time::Instant;

/// Monotonic sensor clock, in nanoseconds since the simulated device booted.
#[derive(Clone, Copy)]
pub(super) struct SensorClock {
    boot: Instant,
}

impl SensorClock {
    pub(super) fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }

    pub(super) fn now_ns(&self) -> i64 {
        i64::try_from(self.boot.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}
