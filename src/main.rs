#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod config;
mod controller;
mod model;
mod view;

use config::Preferences;
use controller::serial::NativeDriver;
use controller::Controller;
use simplelog::*;
use view::app::App;

fn main() {
    if let Err(e) = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("Logger unavailable: {}", e);
    }

    let preferences_path = config::default_path();
    let preferences = preferences_path
        .as_deref()
        .map(Preferences::load)
        .unwrap_or_default();

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(440., 260.)),
        resizable: false,
        ..eframe::NativeOptions::default()
    };

    eframe::run_native(
        "JUMA Voice Memory Controller",
        options,
        Box::new(move |_cc| {
            let controller = Controller::new(NativeDriver, preferences, preferences_path);
            Box::new(App::new(controller))
        }),
    );
}
