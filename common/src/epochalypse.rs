use std::convert::Infallible;
use std::time::Duration;

use log::{debug, info, warn};

use crate::{
    animate, generate_frame, next_boundary, wait_until, Clock, DisplaySink, EpochSeconds, Frame,
    Transition,
};

/// The display loop. Owns the display and the clock, and remembers the last
/// frame it showed so the next second can fade from it.
pub struct Epochalypse<D, C> {
    display: D,
    clock: C,
    transition: Transition,
    previous: Option<Frame>,
    last_second: Option<EpochSeconds>,
}

impl<D: DisplaySink, C: Clock> Epochalypse<D, C> {
    pub fn new(display: D, clock: C) -> Self {
        Self::with_transition(display, clock, Transition::DEFAULT)
    }

    pub fn with_transition(display: D, clock: C, transition: Transition) -> Self {
        Self {
            display,
            clock,
            transition,
            previous: None,
            last_second: None,
        }
    }

    /// Frame shown at the end of the last tick.
    pub fn previous(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    /// Blocks until the next whole second so that every transition starts on
    /// a second boundary rather than at program start.
    pub fn align(&mut self) {
        let first = next_boundary(&self.clock);
        debug!("waiting for first boundary at {first}");
        wait_until(&mut self.clock, first);
    }

    /// Shows the current second: builds its frame, fades to it from the
    /// previous one, then waits for the following second.
    pub fn tick(&mut self) -> anyhow::Result<EpochSeconds> {
        let start = self.clock.now();
        let now = EpochSeconds::from_duration(start);
        let next_run = start.as_secs() + 1;
        self.check_sequence(now);

        debug!("showing {}", now.as_u32());
        let frame = generate_frame(now);
        animate(
            self.previous.as_ref(),
            &frame,
            &mut self.display,
            &mut self.clock,
            &self.transition,
        )?;
        self.previous = Some(frame);
        self.last_second = Some(now);

        let finished = self.clock.now();
        if finished >= Duration::from_secs(next_run) {
            warn!(
                "transition for {} finished {:?} past its second",
                now.as_u32(),
                finished - Duration::from_secs(next_run)
            );
        }
        wait_until(&mut self.clock, next_run);
        Ok(now)
    }

    /// Runs forever. Only returns if the display fails.
    pub fn run(&mut self) -> anyhow::Result<Infallible> {
        info!(
            "starting binary clock, {} step transitions over {:?}",
            self.transition.steps, self.transition.duration
        );
        self.align();
        loop {
            self.tick()?;
        }
    }

    fn check_sequence(&self, now: EpochSeconds) {
        let Some(last) = self.last_second else {
            return;
        };
        if now <= last {
            warn!(
                "clock went back from {} to {}",
                last.as_u32(),
                now.as_u32()
            );
        } else if now.as_u32() - last.as_u32() > 1 {
            warn!(
                "skipped {} seconds after {}",
                now.as_u32() - last.as_u32() - 1,
                last.as_u32()
            );
        }
    }
}
