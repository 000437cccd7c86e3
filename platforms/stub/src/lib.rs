use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use epochalypse_common::{DisplaySink, Frame, GRID_SIZE, NUM_CELLS, RGB8};
use epochalypse_platforms_common::Rotation;
use log::info;

const CURSOR_UP: &str = "\x1b[A";
const RESET: &str = "\x1b[0m";

/// Draws the matrix in a terminal with 24 bit colour escapes, two columns
/// per LED, redrawing over the previous frame.
pub struct TerminalDisplay<W: Write> {
    out: W,
    rotation: Rotation,
    drawn: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, rotation: Rotation) -> Self {
        Self {
            out,
            rotation,
            drawn: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, frame: &Frame) -> String {
        let mut leds = [RGB8::default(); NUM_CELLS];
        for (cell, &color) in frame.iter().enumerate() {
            leds[self.rotation.led_index(cell)] = color;
        }

        let mut text = String::new();
        if self.drawn {
            text.push('\r');
            text.push_str(&CURSOR_UP.repeat(GRID_SIZE));
        }
        for row in leds.chunks_exact(GRID_SIZE) {
            for led in row {
                text.push_str(&format!("\x1b[48;2;{};{};{}m  ", led.r, led.g, led.b));
            }
            text.push_str(RESET);
            text.push('\n');
        }
        text
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        let text = self.render(frame);
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .context("drawing frame to terminal")?;
        self.drawn = true;
        Ok(())
    }
}

pub fn platform_init(rotation: Rotation) -> Result<TerminalDisplay<Stdout>> {
    info!("No LED matrix on this platform, drawing to the terminal");
    Ok(TerminalDisplay::new(io::stdout(), rotation))
}
