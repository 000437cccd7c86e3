pub mod framebuffer;

use anyhow::Result;
use epochalypse_platforms_common::Rotation;
use log::info;

pub use framebuffer::{find_framebuffer, SenseHat, SENSE_HAT_FB_NAME};

pub fn platform_init(rotation: Rotation) -> Result<SenseHat> {
    let hat = SenseHat::open(rotation)?;
    info!("Sense HAT LED matrix at {}", hat.path().display());
    Ok(hat)
}
