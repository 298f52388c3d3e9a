/// "Has `period` elapsed since I last fired?" against a millisecond clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalTimer {
    last: u64,
    period: u64,
}

impl IntervalTimer {
    pub fn new(period: u64, now: u64) -> Self {
        Self { last: now, period }
    }

    /// Fires at most once per call; re-arms from `now`.
    pub fn poll(&mut self, now: u64) -> bool {
        if now.saturating_sub(self.last) >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, now: u64) {
        self.last = now;
    }
}
