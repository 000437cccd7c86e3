mod platform_libs;
use epochalypse_common::Epochalypse;
use epochalypse_platforms_common::{Rotation, SystemClock};
use log::info;

// Cell 0 at the top left of the matrix
const ROTATION: Rotation = Rotation::Deg0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Initializing epochalypse");
    let display = platform_libs::platform_init(ROTATION)?;
    let mut clock = Epochalypse::new(display, SystemClock);
    match clock.run()? {}
}
