use smart_leds::RGB8;

use crate::clock::EpochSeconds;
use crate::{NUM_CELLS, TS_BITS, TS_MAX};

pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
pub const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };

/// One complete image for the matrix, cell 0 first.
pub type Frame = [RGB8; NUM_CELLS];

/// Seconds left until the 32 bit counter rolls over.
pub fn remaining(now: EpochSeconds) -> u32 {
    TS_MAX - now.as_u32()
}

/// The 32 binary digits of a value, least significant bit first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BitVector([bool; TS_BITS]);

impl BitVector {
    pub fn from_value(value: u32) -> Self {
        let mut bits = [false; TS_BITS];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = (value >> i) & 1 == 1;
        }
        Self(bits)
    }

    /// Reassembles the value the bits were taken from.
    pub fn value(&self) -> u32 {
        self.0
            .iter()
            .rev()
            .fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
    }

    pub fn bits(&self) -> &[bool; TS_BITS] {
        &self.0
    }

    fn paint(&self, on: RGB8, cells: &mut [RGB8]) {
        for (cell, &bit) in cells.iter_mut().zip(self.0.iter()) {
            *cell = if bit { on } else { BLACK };
        }
    }
}

/// Builds the frame for a second: the remaining seconds in blue fill cells
/// 0..32, the elapsed seconds in red fill cells 32..64.
pub fn generate_frame(now: EpochSeconds) -> Frame {
    let mut frame = [BLACK; NUM_CELLS];
    let (top, bottom) = frame.split_at_mut(TS_BITS);
    BitVector::from_value(remaining(now)).paint(BLUE, top);
    BitVector::from_value(now.as_u32()).paint(RED, bottom);
    frame
}
