use crate::device_display::interface::DeviceDisplay;
use crate::library::error::{Error, Result};

const WIDTH: usize = 40;
const BAR_WIDTH: usize = 30;

pub struct DeviceDisplayConsole {
    lines: [String; 2],
    progress: u8,
    ready: bool,
    last_rendered: Option<String>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
            progress: 0,
            ready: false,
            last_rendered: None,
        }
    }

    fn render_display(&self) -> String {
        let border = "─".repeat(WIDTH);
        let filled = self.progress as usize * BAR_WIDTH / 100;
        let bar = format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.progress
        );
        let status = if self.ready { "● READY TO CAPTURE" } else { "" };

        let mut out = format!("┌{}┐\n", border);
        for row in self.lines.iter().map(String::as_str).chain([bar.as_str(), status]) {
            out.push_str(&format!("│{:<width$}│\n", row, width = WIDTH));
        }
        out.push_str(&format!("└{}┘", border));
        out
    }
}

impl Default for DeviceDisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<()> {
        self.flush()
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

        *slot = text.chars().take(WIDTH).collect();
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
        let rendered = self.render_display();
        // Skip identical frames, the renderer runs on every tick.
        if self.last_rendered.as_deref() != Some(rendered.as_str()) {
            println!("{}", rendered);
            self.last_rendered = Some(rendered);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_truncates() {
        let mut display = DeviceDisplayConsole::new();

        display.write_line(0, &"x".repeat(100)).unwrap();

        assert_eq!(display.lines[0].chars().count(), WIDTH);
    }

    #[test]
    fn test_invalid_line_is_rejected() {
        let mut display = DeviceDisplayConsole::new();

        assert!(matches!(
            display.write_line(2, "nope"),
            Err(Error::Display(_))
        ));
    }

    #[test]
    fn test_render_shows_progress_and_ready() {
        let mut display = DeviceDisplayConsole::new();
        display.write_line(0, "Hold steady...").unwrap();
        display.set_progress(150).unwrap();
        display.set_capture_ready(true).unwrap();

        let rendered = display.render_display();

        assert!(rendered.contains("Hold steady..."));
        assert!(rendered.contains(&format!("[{}] 100%", "#".repeat(BAR_WIDTH))));
        assert!(rendered.contains("READY TO CAPTURE"));
    }

    #[test]
    fn test_clear_resets_buffer() {
        let mut display = DeviceDisplayConsole::new();
        display.write_line(1, "text").unwrap();
        display.set_progress(40).unwrap();

        display.clear().unwrap();

        assert!(display.lines.iter().all(String::is_empty));
        assert_eq!(display.progress, 0);
    }
}
