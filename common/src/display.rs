use crate::Frame;

/// Something that can put a frame on the LED matrix.
///
/// `show` returns once the frame is on the display, so the transition timing
/// is measured from committed frames. How cells land on physical LEDs is up
/// to the implementation.
pub trait DisplaySink {
    fn show(&mut self, frame: &Frame) -> anyhow::Result<()>;
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn show(&mut self, frame: &Frame) -> anyhow::Result<()> {
        (**self).show(frame)
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn show(&mut self, frame: &Frame) -> anyhow::Result<()> {
        (**self).show(frame)
    }
}
