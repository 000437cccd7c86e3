use std::time::Duration;

/// Whole seconds since the unix epoch, as a 32 bit counter.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct EpochSeconds(pub u32);

impl EpochSeconds {
    /// Floors a clock reading to whole seconds. Readings past the 32 bit
    /// rollover wrap.
    pub fn from_duration(since_epoch: Duration) -> Self {
        Self(since_epoch.as_secs() as u32)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Wall clock and sleep primitive the display loop runs on.
pub trait Clock {
    /// Time elapsed since the unix epoch.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// The first whole second strictly after the clock's current reading.
pub fn next_boundary<C: Clock + ?Sized>(clock: &C) -> u64 {
    clock.now().as_secs() + 1
}

/// Blocks until the clock reaches `target` seconds since the epoch. Returns
/// straight away when the target has already passed.
pub fn wait_until<C: Clock + ?Sized>(clock: &mut C, target: u64) {
    if let Some(delay) = Duration::from_secs(target).checked_sub(clock.now()) {
        if !delay.is_zero() {
            clock.sleep(delay);
        }
    }
}
