/// Seconds a round lasts when nothing else is configured.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 10;

/// Per-round countdown driven by one-second ticks.
///
/// At most one countdown is armed per round. Ticks against a disarmed countdown do
/// nothing, so cancelling it is enough to guarantee it never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    armed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Not armed; the tick was ignored.
    Idle,
    Running(u32),
    Expired,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self {
            remaining: secs,
            armed: false,
        }
    }

    pub fn arm(&mut self, secs: u32) {
        self.remaining = secs;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self) -> TickResult {
        if !self.armed {
            return TickResult::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            TickResult::Expired
        } else {
            TickResult::Running(self.remaining)
        }
    }
}
