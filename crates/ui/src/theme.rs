use placeholdr_protocol::{Color, RenderTheme, ThemeToken};

pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Same palette the placeholder itself is painted with.
pub fn resolve(token: ThemeToken, theme: RenderTheme) -> egui::Color32 {
    to_color32(token.resolve(theme))
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_CAPTION: f32 = 12.0;

// ── egui visual presets ────────────────────────────────────────────────────

pub fn visuals(theme: RenderTheme) -> egui::Visuals {
    match theme {
        RenderTheme::Dark => dark_visuals(),
        RenderTheme::Light => light_visuals(),
    }
}

/// Gray-800/900 chrome around the preview.
fn dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x1f, 0x29, 0x37);
    v.window_fill = egui::Color32::from_rgb(0x1f, 0x29, 0x37);
    v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x18, 0x27);
    v.faint_bg_color = egui::Color32::from_rgb(0x37, 0x41, 0x51);
    v.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0xe5, 0xe7, 0xeb));
    v.widgets.noninteractive.bg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0x37, 0x41, 0x51));
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x37, 0x41, 0x51);
    v.widgets.inactive.weak_bg_fill = egui::Color32::from_rgb(0x37, 0x41, 0x51);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x4b, 0x55, 0x63);
    v.widgets.hovered.weak_bg_fill = egui::Color32::from_rgb(0x4b, 0x55, 0x63);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0x25, 0x63, 0xeb);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x3b, 0x82, 0xf6, 80);
    v.selection.stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0x3b, 0x82, 0xf6));
    v.error_fg_color = egui::Color32::from_rgb(0xf8, 0x71, 0x71);
    apply_corners(&mut v);
    v
}

fn light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = egui::Color32::from_rgb(0xf9, 0xfa, 0xfb);
    v.window_fill = egui::Color32::WHITE;
    v.extreme_bg_color = egui::Color32::WHITE;
    v.faint_bg_color = egui::Color32::from_rgb(0xf3, 0xf4, 0xf6);
    v.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0x37, 0x41, 0x51));
    v.widgets.noninteractive.bg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0xd1, 0xd5, 0xdb));
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0xe5, 0xe7, 0xeb);
    v.widgets.inactive.weak_bg_fill = egui::Color32::from_rgb(0xe5, 0xe7, 0xeb);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0xd1, 0xd5, 0xdb);
    v.widgets.hovered.weak_bg_fill = egui::Color32::from_rgb(0xd1, 0xd5, 0xdb);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0x25, 0x63, 0xeb);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x25, 0x63, 0xeb, 50);
    v.selection.stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0x25, 0x63, 0xeb));
    v.error_fg_color = egui::Color32::from_rgb(0xdc, 0x26, 0x26);
    apply_corners(&mut v);
    v
}

fn apply_corners(v: &mut egui::Visuals) {
    v.window_corner_radius = egui::CornerRadius::same(6);
    v.menu_corner_radius = egui::CornerRadius::same(6);
    v.widgets.noninteractive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v.widgets.open.corner_radius = egui::CornerRadius::same(5);
}

pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(FONT_TITLE),
    );
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(FONT_BODY),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    style.spacing.interact_size.y = 24.0;
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_raster_palette() {
        assert_eq!(
            resolve(ThemeToken::LabelText, RenderTheme::Dark),
            egui::Color32::from_rgb(0xe5, 0xe7, 0xeb)
        );
        assert_eq!(
            resolve(ThemeToken::GradientStart, RenderTheme::Light),
            egui::Color32::from_rgb(0xf3, 0xf4, 0xf6)
        );
    }

    #[test]
    fn visuals_follow_theme() {
        assert!(visuals(RenderTheme::Dark).dark_mode);
        assert!(!visuals(RenderTheme::Light).dark_mode);
    }
}
