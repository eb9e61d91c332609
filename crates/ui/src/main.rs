//! Native desktop launcher. The browser build starts from `lib.rs` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Placeholder Generator")
            .with_inner_size([900.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "placeholdr",
        options,
        Box::new(|cc| Ok(Box::new(placeholdr_ui::PlaceholderApp::new(cc)?))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
