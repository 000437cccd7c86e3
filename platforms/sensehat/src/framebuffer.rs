use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use epochalypse_common::{DisplaySink, Frame, NUM_CELLS};
use epochalypse_platforms_common::{to_rgb565, Rotation};
use log::{debug, trace};

/// Name the Sense HAT kernel driver gives its framebuffer.
pub const SENSE_HAT_FB_NAME: &str = "RPi-Sense FB";
const SYS_GRAPHICS: &str = "/sys/class/graphics";
const DEV: &str = "/dev";
const BYTES_PER_LED: usize = 2;

/// Looks through the framebuffers listed under `sys_graphics` for the Sense
/// HAT one and returns its device node under `dev`.
pub fn find_framebuffer(sys_graphics: &Path, dev: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(sys_graphics)
        .with_context(|| format!("listing framebuffers in {}", sys_graphics.display()))?;
    let mut names: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .filter(|name| name.to_string_lossy().starts_with("fb"))
        .collect();
    names.sort();

    for fb in names {
        let name_file = sys_graphics.join(&fb).join("name");
        // fb devices without a readable name are not ours
        let Ok(name) = fs::read_to_string(&name_file) else {
            continue;
        };
        debug!("{} is {:?}", name_file.display(), name.trim());
        if name.trim() == SENSE_HAT_FB_NAME {
            return Ok(dev.join(fb));
        }
    }
    bail!(
        "no {SENSE_HAT_FB_NAME:?} framebuffer in {}, is the Sense HAT attached?",
        sys_graphics.display()
    )
}

/// The Sense HAT's 8x8 LED matrix, driven through its framebuffer device.
pub struct SenseHat {
    device: File,
    path: PathBuf,
    rotation: Rotation,
}

impl SenseHat {
    pub fn open(rotation: Rotation) -> Result<Self> {
        let path = find_framebuffer(Path::new(SYS_GRAPHICS), Path::new(DEV))?;
        Self::with_device(path, rotation)
    }

    pub fn with_device(path: impl Into<PathBuf>, rotation: Rotation) -> Result<Self> {
        let path = path.into();
        let device = OpenOptions::new()
            .write(true)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        Ok(Self {
            device,
            path,
            rotation,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplaySink for SenseHat {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        let mut bytes = [0u8; NUM_CELLS * BYTES_PER_LED];
        for (chunk, led) in bytes
            .chunks_exact_mut(BYTES_PER_LED)
            .zip(to_rgb565(frame, self.rotation))
        {
            chunk.copy_from_slice(&led.to_le_bytes());
        }
        trace!("writing {} bytes to {}", bytes.len(), self.path.display());

        self.device
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.device.write_all(&bytes))
            .and_then(|_| self.device.flush())
            .with_context(|| format!("writing frame to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epochalypse_common::{generate_frame, EpochSeconds, BLACK, BLUE, RED};
    use tempfile::TempDir;

    fn fake_system(fbs: &[(&str, &str)]) -> TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("sys")).unwrap();
        fs::create_dir(root.path().join("dev")).unwrap();
        for (fb, name) in fbs {
            let dir = root.path().join("sys").join(fb);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join("name"), name).unwrap();
            fs::write(root.path().join("dev").join(fb), b"").unwrap();
        }
        root
    }

    #[test]
    fn test_find_framebuffer() {
        let root = fake_system(&[("fb0", "simple\n"), ("fb1", "RPi-Sense FB\n")]);
        let found = find_framebuffer(&root.path().join("sys"), &root.path().join("dev")).unwrap();
        assert_eq!(found, root.path().join("dev").join("fb1"));
    }

    #[test]
    fn test_find_framebuffer_ignores_other_entries() {
        let root = fake_system(&[("fb0", "BCM2708 FB")]);
        fs::create_dir(root.path().join("sys").join("fbcon")).unwrap();
        fs::create_dir(root.path().join("sys").join("vtcon0")).unwrap();
        let err = find_framebuffer(&root.path().join("sys"), &root.path().join("dev")).unwrap_err();
        assert!(err.to_string().contains("RPi-Sense FB"), "{err}");
    }

    #[test]
    fn test_find_framebuffer_missing_sysfs() {
        let root = tempfile::tempdir().unwrap();
        let err = find_framebuffer(&root.path().join("nope"), root.path()).unwrap_err();
        assert!(err.to_string().starts_with("listing framebuffers"), "{err}");
    }

    #[test]
    fn test_open_missing_device() {
        let root = tempfile::tempdir().unwrap();
        assert!(SenseHat::with_device(root.path().join("fb9"), Rotation::Deg0).is_err());
    }

    #[test]
    fn test_show_writes_rgb565() {
        let root = fake_system(&[("fb1", "RPi-Sense FB")]);
        let path = root.path().join("dev").join("fb1");
        let mut hat = SenseHat::with_device(&path, Rotation::Deg0).unwrap();

        let mut frame = [BLACK; NUM_CELLS];
        frame[0] = RED;
        frame[63] = BLUE;
        hat.show(&frame).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), NUM_CELLS * BYTES_PER_LED);
        assert_eq!(&bytes[0..2], &[0x00, 0xf8]);
        assert_eq!(&bytes[126..128], &[0x1f, 0x00]);
        assert!(bytes[2..126].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_show_overwrites_previous_frame() {
        let root = fake_system(&[("fb1", "RPi-Sense FB")]);
        let path = root.path().join("dev").join("fb1");
        let mut hat = SenseHat::with_device(&path, Rotation::Deg90).unwrap();

        hat.show(&generate_frame(EpochSeconds(0))).unwrap();
        hat.show(&generate_frame(EpochSeconds(u32::MAX))).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), NUM_CELLS * BYTES_PER_LED);
        // Elapsed bits fill the bottom half of the frame, which turns to the
        // left half of the matrix.
        for led in 0..NUM_CELLS {
            let value = u16::from_le_bytes([bytes[2 * led], bytes[2 * led + 1]]);
            let expected = if led % 8 < 4 { 0xf800 } else { 0x0000 };
            assert_eq!(value, expected, "led {led}");
        }
    }
}
