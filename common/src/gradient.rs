use std::time::Duration;

use log::trace;
use smart_leds::RGB8;

use crate::{Clock, DisplaySink, Frame, GRADIENT_DURATION, GRADIENT_STEPS};

/// Timing of one cross-fade between two frames.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Transition {
    pub steps: u32,
    pub duration: Duration,
}

impl Transition {
    pub const DEFAULT: Self = Self {
        steps: GRADIENT_STEPS,
        duration: GRADIENT_DURATION,
    };

    /// Pause after each intermediate frame.
    pub fn step_pause(&self) -> Duration {
        self.duration / self.steps
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// floor(before * (steps - step) / steps) + ceil(after * step / steps)
// The two terms never add up past 255.
fn blend(before: u8, after: u8, step: u32, steps: u32) -> u8 {
    let fading = u32::from(before) * (steps - step) / steps;
    let rising = (u32::from(after) * step).div_ceil(steps);
    (fading + rising) as u8
}

/// Colour `step` of `steps` on the way from `before` to `after`. Each channel
/// is blended on its own, so intermediate colours can fall outside the palette.
/// Blending a colour with itself gives that colour back at every step.
pub fn gradient(before: RGB8, after: RGB8, step: u32, steps: u32) -> RGB8 {
    debug_assert!(step <= steps && steps > 0);
    RGB8 {
        r: blend(before.r, after.r, step, steps),
        g: blend(before.g, after.g, step, steps),
        b: blend(before.b, after.b, step, steps),
    }
}

/// Cross-fades the display from `before` to `after`.
///
/// Shows `transition.steps` intermediate frames starting at `before` itself,
/// pausing `transition.step_pause()` after each, then shows `after` exactly.
/// Without a `before` frame the fade runs from `after` to itself, which
/// keeps the timing but shows no movement.
pub fn animate<D, C>(
    before: Option<&Frame>,
    after: &Frame,
    display: &mut D,
    clock: &mut C,
    transition: &Transition,
) -> anyhow::Result<()>
where
    D: DisplaySink + ?Sized,
    C: Clock + ?Sized,
{
    let before = before.unwrap_or(after);
    let pause = transition.step_pause();
    let mut pixels = *before;
    for step in 0..transition.steps {
        for (pixel, (&b, &a)) in pixels.iter_mut().zip(before.iter().zip(after.iter())) {
            *pixel = gradient(b, a, step, transition.steps);
        }
        trace!("gradient step {step}: {pixels:?}");
        display.show(&pixels)?;
        clock.sleep(pause);
    }
    display.show(after)
}
