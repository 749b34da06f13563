use crate::library::error::Result;

/// Two text lines, a progress bar and a capture-ready indicator.
///
/// Setters only update the display buffer; nothing is shown until `flush`.
pub trait DeviceDisplay: Send + Sync {
    /// Prepare the output device
    fn init(&mut self) -> Result<()>;

    /// Blank both lines, zero the progress and drop the ready indicator
    fn clear(&mut self) -> Result<()>;

    /// Write text to a line (0-based). Errors if the line does not exist.
    fn write_line(&mut self, line: u8, text: &str) -> Result<()>;

    /// Progress in percent, values above 100 are capped
    fn set_progress(&mut self, percent: u8) -> Result<()>;

    fn set_capture_ready(&mut self, ready: bool) -> Result<()>;

    /// Push the buffered content to the device
    fn flush(&mut self) -> Result<()>;

    #[allow(dead_code)]
    fn num_lines(&self) -> u8 {
        2
    }
}
