use config::{Config, DisplayBackend, LoggerBackend, CONFIG_PATH_ENV};
use device_camera::impl_fake::DeviceCameraFake;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::{run_window, DeviceDisplayGui};
use device_display::interface::DeviceDisplay;
use image_classifier::impl_fake::ImageClassifierFake;
use library::error::Error;
use library::logger::impl_console::LoggerConsole;
use library::logger::impl_tracing::LoggerTracing;
use library::logger::interface::Logger;
use skin_check::core::Msg;
use skin_check::main::SkinCheck;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

mod config;
mod device_camera;
mod device_display;
mod guidance;
mod image_classifier;
mod library;
mod skin_check;

fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
        .map(PathBuf::from)
}

/// Pressing Enter captures now, or dismisses the summary being shown.
fn spawn_capture_button(sender: Sender<Msg>) {
    std::thread::spawn(move || {
        let mut line = String::new();
        while std::io::stdin().read_line(&mut line).unwrap_or(0) > 0 {
            if sender.send(Msg::CaptureRequested).is_err() {
                break;
            }
            line.clear();
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path().as_deref())?;

    let logger: Arc<dyn Logger + Send + Sync> = match config.logger {
        LoggerBackend::Console => Arc::new(LoggerConsole::new(config.logger_timezone())),
        LoggerBackend::Tracing => {
            LoggerTracing::install_subscriber("info")?;
            Arc::new(LoggerTracing::new())
        }
    };

    let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));

    let image_classifier = Arc::new(ImageClassifierFake::new(logger.clone()));

    let mut window = None;
    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match config.display {
        DisplayBackend::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayBackend::Gui => {
            let gui = DeviceDisplayGui::new();
            window = Some(gui.window());
            Arc::new(Mutex::new(gui))
        }
    };

    device_display
        .lock()
        .map_err(|e| Error::Poisoned(e.to_string()))?
        .init()?;

    let skin_check = SkinCheck::new(
        config,
        logger.clone(),
        device_camera,
        device_display,
        image_classifier,
    );

    spawn_capture_button(skin_check.sender());

    match window {
        Some(window) => {
            std::thread::spawn(move || {
                if let Err(e) = skin_check.run() {
                    let _ = logger.warn(&format!("Skin check stopped: {}", e));
                }
            });
            run_window(window)?;
        }
        None => skin_check.run()?,
    }

    Ok(())
}
