use crate::device_display::interface::DeviceDisplay;
use crate::library::error::{Error, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq)]
struct Screen {
    lines: [String; 2],
    progress: u8,
    ready: bool,
}

/// The eframe app drawing the shared screen buffer.
#[derive(Clone)]
pub struct DisplayWindow {
    screen: Arc<Mutex<Screen>>,
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = match self.screen.lock() {
            Ok(screen) => screen.clone(),
            Err(_) => return,
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);

                for line in screen.lines.iter() {
                    ui.label(egui::RichText::new(line).size(20.0));
                }

                ui.add_space(12.0);
                ui.add(
                    egui::ProgressBar::new(screen.progress as f32 / 100.0)
                        .show_percentage()
                        .desired_width(320.0),
                );

                ui.add_space(12.0);
                let (text, color) = if screen.ready {
                    ("Ready to capture", egui::Color32::from_rgb(40, 160, 70))
                } else {
                    ("Not ready", egui::Color32::from_rgb(140, 140, 140))
                };
                ui.label(egui::RichText::new(text).color(color).strong());
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Setters edit `pending`; the window only sees it after `flush`.
pub struct DeviceDisplayGui {
    screen: Arc<Mutex<Screen>>,
    pending: Screen,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::default())),
            pending: Screen::default(),
        }
    }

    pub fn window(&self) -> DisplayWindow {
        DisplayWindow {
            screen: self.screen.clone(),
        }
    }

}

impl Default for DeviceDisplayGui {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocks the calling thread (must be the main thread) until the window is closed.
pub fn run_window(window: DisplayWindow) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 220.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native("Skin Check", options, Box::new(|_cc| Box::new(window)))
        .map_err(|e| Error::Display(e.to_string()))
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.pending = Screen::default();
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<()> {
        if line >= 2 {
            return Err(Error::Display(format!("Invalid line number {}", line)));
        }
        self.pending.lines[line as usize] = text.to_string();
        Ok(())
    }

    fn set_progress(&mut self, percent: u8) -> Result<()> {
        self.pending.progress = percent.min(100);
        Ok(())
    }

    fn set_capture_ready(&mut self, ready: bool) -> Result<()> {
        self.pending.ready = ready;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let mut screen = self
            .screen
            .lock()
            .map_err(|e| Error::Poisoned(e.to_string()))?;
        *screen = self.pending.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(window: &DisplayWindow) -> Screen {
        window.screen.lock().unwrap().clone()
    }

    #[test]
    fn test_window_shows_flushed_screen() {
        let mut display = DeviceDisplayGui::new();
        let window = display.window();

        display.write_line(1, "Move the camera closer").unwrap();
        display.set_progress(42).unwrap();
        assert_eq!(shown(&window), Screen::default());

        display.flush().unwrap();

        let screen = shown(&window);
        assert_eq!(screen.lines[1], "Move the camera closer");
        assert_eq!(screen.progress, 42);
    }

    #[test]
    fn test_clear_keeps_old_screen_until_flush() {
        let mut display = DeviceDisplayGui::new();
        let window = display.window();

        display.write_line(0, "Hold steady...").unwrap();
        display.set_progress(80).unwrap();
        display.set_capture_ready(true).unwrap();
        display.flush().unwrap();

        display.clear().unwrap();

        let screen = shown(&window);
        assert_eq!(screen.lines[0], "Hold steady...");
        assert_eq!(screen.progress, 80);
        assert!(screen.ready);

        display.flush().unwrap();
        assert_eq!(shown(&window), Screen::default());
    }

    #[test]
    fn test_invalid_line_is_rejected() {
        let mut display = DeviceDisplayGui::new();

        assert!(display.write_line(2, "nope").is_err());
    }
}
