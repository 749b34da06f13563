use crate::device_display::interface::DeviceDisplay;
use crate::library::error::{Error, Result};

/// Keeps whatever was last flushed so tests can inspect it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeviceDisplayFake {
    pub lines: [String; 2],
    pub progress: u8,
    pub ready: bool,
    pub flushed: Vec<[String; 2]>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.lines = [String::new(), String::new()];
        self.progress = 0;
        self.ready = false;
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<()> {
        let slot = self
            .lines
            .get_mut(line as usize)
            .ok_or_else(|| Error::Display(format!("Invalid line number {}", line)))?;
        *slot = text.to_string();
        Ok(())
    }

    fn set_progress(&mut self, percent: u8) -> Result<()> {
        self.progress = percent.min(100);
        Ok(())
    }

    fn set_capture_ready(&mut self, ready: bool) -> Result<()> {
        self.ready = ready;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushed.push(self.lines.clone());
        Ok(())
    }
}
