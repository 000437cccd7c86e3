use std::time::{Duration, SystemTime, UNIX_EPOCH};

use epochalypse_common::{Clock, GRID_SIZE, NUM_CELLS, RGB8};
use log::warn;

/// The host's wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since,
            Err(e) => {
                // Clock set before 1970, treat it as the epoch itself
                warn!("system clock is {:?} before the epoch", e.duration());
                Duration::ZERO
            }
        }
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How the matrix is turned relative to cell 0 being the top left LED,
/// clockwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Physical LED index, row major from the top left, that frame cell
    /// `cell` lands on.
    pub fn led_index(&self, cell: usize) -> usize {
        let last = GRID_SIZE - 1;
        let (row, col) = (cell / GRID_SIZE, cell % GRID_SIZE);
        let (row, col) = match self {
            Self::Deg0 => (row, col),
            Self::Deg90 => (col, last - row),
            Self::Deg180 => (last - row, last - col),
            Self::Deg270 => (last - col, row),
        };
        row * GRID_SIZE + col
    }
}

/// Packs a colour into 16 bits, 5 red, 6 green and 5 blue, dropping the low
/// bits of each channel.
pub fn rgb565(color: RGB8) -> u16 {
    let r = u16::from(color.r >> 3);
    let g = u16::from(color.g >> 2);
    let b = u16::from(color.b >> 3);
    (r << 11) | (g << 5) | b
}

/// Frame as the physical LEDs see it, in RGB565, after rotating.
pub fn to_rgb565(frame: &[RGB8; NUM_CELLS], rotation: Rotation) -> [u16; NUM_CELLS] {
    let mut leds = [0u16; NUM_CELLS];
    for (cell, &color) in frame.iter().enumerate() {
        leds[rotation.led_index(cell)] = rgb565(color);
    }
    leds
}

#[cfg(test)]
mod tests {
    use super::*;
    use epochalypse_common::{BLACK, BLUE, RED};

    #[test]
    fn test_rgb565() {
        assert_eq!(rgb565(BLACK), 0x0000);
        assert_eq!(rgb565(RED), 0xf800);
        assert_eq!(rgb565(BLUE), 0x001f);
        assert_eq!(rgb565(RGB8 { r: 0, g: 255, b: 0 }), 0x07e0);
        assert_eq!(rgb565(RGB8 { r: 255, g: 255, b: 255 }), 0xffff);
        // Low bits are dropped
        assert_eq!(rgb565(RGB8 { r: 7, g: 3, b: 7 }), 0x0000);
        assert_eq!(rgb565(RGB8 { r: 8, g: 4, b: 8 }), 0x0821);
    }

    #[test]
    fn test_rotation_corners() {
        // top left, top right, bottom right, bottom left
        let corners = [0, 7, 63, 56];
        for (rotation, expected) in [
            (Rotation::Deg0, [0, 7, 63, 56]),
            (Rotation::Deg90, [7, 63, 56, 0]),
            (Rotation::Deg180, [63, 56, 0, 7]),
            (Rotation::Deg270, [56, 0, 7, 63]),
        ] {
            let got: Vec<usize> = corners.iter().map(|&c| rotation.led_index(c)).collect();
            assert_eq!(got, expected, "{rotation:?}");
        }
    }

    #[test]
    fn test_rotation_is_permutation() {
        for rotation in [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ] {
            let mut seen = [false; NUM_CELLS];
            for cell in 0..NUM_CELLS {
                seen[rotation.led_index(cell)] = true;
            }
            assert!(seen.iter().all(|&s| s), "{rotation:?}");
        }
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn test_to_rgb565_rotated() {
        let mut frame = [BLACK; NUM_CELLS];
        frame[0] = RED;
        frame[1] = BLUE;
        let leds = to_rgb565(&frame, Rotation::Deg180);
        assert_eq!(leds[63], 0xf800);
        assert_eq!(leds[62], 0x001f);
        assert_eq!(leds.iter().filter(|&&p| p != 0).count(), 2);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        // 2020-01-01
        assert!(SystemClock.now() > Duration::from_secs(1_577_836_800));
    }
}
