//! Binary epoch clock for an 8x8 RGB LED matrix.
//!
//! Every second the current unix timestamp and the seconds left until the
//! 32 bit counter rolls over are drawn as two 32 cell bit patterns, and the
//! display cross-fades from the previous second's frame to the new one.

use std::time::Duration;

pub mod clock;
pub mod display;
pub mod epochalypse;
pub mod frame;
pub mod gradient;

pub use clock::{next_boundary, wait_until, Clock, EpochSeconds};
pub use display::DisplaySink;
pub use epochalypse::Epochalypse;
pub use frame::{generate_frame, remaining, BitVector, Frame, BLACK, BLUE, RED};
pub use gradient::{animate, gradient, Transition};
pub use smart_leds::RGB8;

/// Width and height of the LED matrix.
pub const GRID_SIZE: usize = 8;
/// Cells in one frame.
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;
/// Bits drawn for each of the two counters.
pub const TS_BITS: usize = 32;
/// The last second a 32 bit unsigned epoch counter can represent.
pub const TS_MAX: u32 = u32::MAX;

/// Intermediate frames in one transition.
pub const GRADIENT_STEPS: u32 = 20;
/// Wall clock time one transition takes.
pub const GRADIENT_DURATION: Duration = Duration::from_millis(750);

// A transition has to finish before the next second starts or frames lag
// behind real time.
const _: () = assert!(GRADIENT_DURATION.as_millis() <= 1000);
const _: () = assert!(2 * TS_BITS == NUM_CELLS);
