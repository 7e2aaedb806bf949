use crate::framesync::FrameReport;

/// Receives every frame the synchronizer finishes decoding.
///
/// The handler is borrowed for the duration of one `execute` call and is invoked
/// synchronously, once per completed frame, with views that live only for the call.
/// Closures taking a [`FrameReport`] implement this trait.
pub trait FrameHandler {
  fn on_frame(&mut self, report: &FrameReport<'_>);
}

impl<F> FrameHandler for F
where
  F: FnMut(&FrameReport<'_>),
{
  fn on_frame(&mut self, report: &FrameReport<'_>) {
    self(report)
  }
}
