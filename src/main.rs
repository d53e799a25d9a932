//! FileSpy - a small folder browser that shows the raw filesystem
//! attributes of the selected entry and remembers where you left off.

mod app;
mod bookmark;
mod config;
mod deferred;
mod entry;
mod error;
mod input;
mod io;
mod message;
mod navigator;
mod session;
mod settings;
mod style;
mod view;

use app::FileSpy;
use config::Config;
use eframe::egui;
use log::{info, warn};

fn main() -> eframe::Result<()> {
    // Filter with RUST_LOG, e.g. RUST_LOG=filespy=debug
    env_logger::init();

    if let Err(e) = Config::create_default() {
        warn!("Could not create default config: {}", e);
    }
    let config = Config::load();
    info!("Launching FileSpy");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([480.0, 320.0])
            .with_title(navigator::APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        navigator::APP_NAME,
        options,
        Box::new(move |_cc| Ok(Box::new(FileSpy::new(&config)))),
    )
}
