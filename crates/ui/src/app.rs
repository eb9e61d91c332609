use eframe::egui;
use placeholdr_core::dimensions::{MAX_HEIGHT, MAX_WIDTH, MIN_DIMENSION};
use placeholdr_core::{Download, Generator, RenderError, Renderer};
use placeholdr_protocol::{RenderTheme, ThemeToken};

use crate::renderer::{self, PREVIEW_MAX, PreviewTexture};
use crate::theme;

/// The window opens in dark mode.
const INITIAL_THEME: RenderTheme = RenderTheme::Dark;

/// Main application state.
pub struct PlaceholderApp {
    generator: Generator,
    preview: PreviewTexture,
    /// Values bound to the width/height inputs.
    width_input: i64,
    height_input: i64,
    /// Where the last download went.
    saved: Option<String>,
}

impl PlaceholderApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, RenderError> {
        let generator = initial_generator()?;
        cc.egui_ctx.set_visuals(theme::visuals(generator.theme()));
        theme::apply_typography(&cc.egui_ctx);

        Ok(Self {
            width_input: i64::from(generator.width()),
            height_input: i64::from(generator.height()),
            generator,
            preview: PreviewTexture::default(),
            saved: None,
        })
    }

    fn download(&mut self) {
        let Ok(download) = self.generator.download() else {
            // The generator already holds the message.
            return;
        };
        match save(&download) {
            Ok(Some(location)) => {
                log::info!("saved {location}");
                self.saved = Some(location);
            }
            Ok(None) => log::debug!("save cancelled"),
            Err(e) => self.generator.report_error(format!("Failed to save image: {e}")),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Width");
            let width = ui.add(
                egui::DragValue::new(&mut self.width_input)
                    .range(i64::from(MIN_DIMENSION)..=i64::from(u32::MAX))
                    .suffix(" px"),
            );
            if width.changed() {
                self.generator.set_width(self.width_input);
                self.saved = None;
            }

            ui.add_space(12.0);
            ui.label("Height");
            let height = ui.add(
                egui::DragValue::new(&mut self.height_input)
                    .range(i64::from(MIN_DIMENSION)..=i64::from(u32::MAX))
                    .suffix(" px"),
            );
            if height.changed() {
                self.generator.set_height(self.height_input);
                self.saved = None;
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Generate Image").clicked()
                && let Err(rejection) = self.generator.submit()
            {
                // Shown in the banner.
                log::debug!("submit rejected: {}", rejection.reason());
            }
            if ui.button("Download").clicked() {
                self.download();
            }
        });

        ui.label(
            egui::RichText::new(format!(
                "Minimum dimensions: {MIN_DIMENSION}x{MIN_DIMENSION} pixels"
            ))
            .small()
            .weak(),
        );
        ui.label(
            egui::RichText::new(format!(
                "Maximum dimensions: {MAX_WIDTH}x{MAX_HEIGHT} pixels"
            ))
            .small()
            .weak(),
        );
    }

    fn banner(&self, ui: &mut egui::Ui) {
        if let Some(err) = self.generator.error() {
            let color = ui.visuals().error_fg_color;
            egui::Frame::new()
                .fill(color.gamma_multiply(0.12))
                .stroke(egui::Stroke::new(1.0, color))
                .corner_radius(egui::CornerRadius::same(5))
                .inner_margin(egui::Margin::symmetric(10, 6))
                .show(ui, |ui| {
                    ui.colored_label(color, err);
                });
        } else if let Some(location) = &self.saved {
            ui.label(egui::RichText::new(format!("Saved {location}")).small());
        }
    }

    fn preview(&mut self, ui: &mut egui::Ui) {
        if let Err(e) = self.preview.refresh(ui.ctx(), &self.generator) {
            self.generator.report_error(e.to_string());
        }
        let Some(texture) = self.preview.texture() else {
            return;
        };

        let submitted = self.generator.submitted();
        let natural = egui::vec2(submitted.width() as f32, submitted.height() as f32);
        let bounds = PREVIEW_MAX.min(egui::vec2(ui.available_width(), PREVIEW_MAX.y));
        let size = renderer::fit_within(natural, bounds);

        let border = theme::resolve(ThemeToken::GradientEnd, self.generator.theme());
        ui.vertical_centered(|ui| {
            egui::Frame::new()
                .stroke(egui::Stroke::new(1.0, border))
                .show(ui, |ui| {
                    ui.add(egui::Image::new((texture.id(), size)));
                });
            ui.label(
                egui::RichText::new(format!(
                    "Preview dimensions: {}px × {}px",
                    submitted.width(),
                    submitted.height()
                ))
                .small()
                .weak(),
            );
        });
    }
}

fn initial_generator() -> Result<Generator, RenderError> {
    Ok(Generator::new(Renderer::new()?, INITIAL_THEME))
}

impl eframe::App for PlaceholderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Placeholder Generator");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.generator.theme() {
                        RenderTheme::Dark => "🌙 Dark",
                        RenderTheme::Light => "☀ Light",
                    };
                    if ui.button(theme_label).clicked() {
                        self.generator.toggle_theme();
                        ctx.set_visuals(theme::visuals(self.generator.theme()));
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.controls(ui);
                ui.add_space(6.0);
                self.banner(ui);
                ui.separator();
                self.preview(ui);
            });
        });
    }
}

/// Hand the PNG to the host. `Ok(None)` means the user cancelled.
#[cfg(not(target_arch = "wasm32"))]
fn save(download: &Download) -> Result<Option<String>, String> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(&download.file_name)
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        return Ok(None);
    };
    std::fs::write(&path, &download.png).map_err(|e| e.to_string())?;
    Ok(Some(path.display().to_string()))
}

#[cfg(target_arch = "wasm32")]
fn save(download: &Download) -> Result<Option<String>, String> {
    browser_download(download).map_err(|e| format!("{e:?}"))?;
    Ok(Some(download.file_name.clone()))
}

/// Offer the bytes through a temporary `<a download>` pointing at a Blob URL.
#[cfg(target_arch = "wasm32")]
fn browser_download(download: &Download) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let bytes = js_sys::Uint8Array::from(download.png.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&download.file_name);
    anchor.click();

    // Revoking in the same task can cancel the download in some browsers.
    let revoke = wasm_bindgen::closure::Closure::once_into_js(move || {
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("failed to revoke {url}: {e:?}");
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0)?;
    Ok(())
}
