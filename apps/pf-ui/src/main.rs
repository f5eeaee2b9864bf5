#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod fields;

use app::PlateflowApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title("Plateflow"),
        ..Default::default()
    };

    eframe::run_native(
        "Plateflow",
        options,
        Box::new(|cc| Ok(Box::new(PlateflowApp::new(cc)))),
    )
}
