use eframe::egui::{self, Color32, FontId, Margin, Stroke, TextStyle};
use lpstudio_core::solution::Status;

pub struct Palette;

impl Palette {
    pub fn background() -> Color32 {
        Color32::from_rgb(12, 18, 22)
    }

    pub fn top_panel() -> Color32 {
        Color32::from_rgb(17, 25, 31)
    }

    pub fn main_panel() -> Color32 {
        Color32::from_rgb(20, 29, 36)
    }

    pub fn surface() -> Color32 {
        Color32::from_rgb(26, 37, 46)
    }

    pub fn surface_alt() -> Color32 {
        Color32::from_rgb(30, 42, 52)
    }

    pub fn border_soft() -> Color32 {
        Color32::from_rgb(52, 68, 80)
    }

    pub fn border_strong() -> Color32 {
        Color32::from_rgb(70, 92, 106)
    }

    pub fn button_idle() -> Color32 {
        Color32::from_rgb(34, 48, 58)
    }

    pub fn button_hover() -> Color32 {
        Color32::from_rgb(44, 62, 74)
    }

    pub fn accent_teal() -> Color32 {
        Color32::from_rgb(96, 204, 186)
    }

    pub fn accent_amber() -> Color32 {
        Color32::from_rgb(232, 186, 104)
    }

    pub fn accent_sky() -> Color32 {
        Color32::from_rgb(128, 184, 236)
    }

    pub fn text_primary() -> Color32 {
        Color32::from_rgb(232, 238, 240)
    }

    pub fn text_secondary() -> Color32 {
        Color32::from_rgb(170, 186, 194)
    }

    pub fn banner_info() -> (Color32, Color32) {
        (
            Color32::from_rgb(186, 218, 244),
            Color32::from_rgb(28, 46, 64),
        )
    }

    pub fn banner_success() -> (Color32, Color32) {
        (
            Color32::from_rgb(176, 232, 206),
            Color32::from_rgb(24, 52, 42),
        )
    }

    pub fn banner_error() -> (Color32, Color32) {
        (
            Color32::from_rgb(244, 170, 170),
            Color32::from_rgb(62, 28, 30),
        )
    }

    pub fn status(status: Status) -> Color32 {
        match status {
            Status::Optimal => Color32::from_rgb(168, 226, 198),
            Status::Unbounded | Status::NotSolved => Color32::from_rgb(240, 196, 140),
            Status::Infeasible => Color32::from_rgb(236, 148, 148),
        }
    }

    pub fn shadow_color() -> Color32 {
        Color32::from_black_alpha(100)
    }
}

#[derive(Clone, Copy)]
pub struct SectionStyle {
    fill: Color32,
    border: Color32,
    accent: Color32,
}

impl SectionStyle {
    pub fn form() -> Self {
        Self {
            fill: Palette::surface(),
            border: Palette::border_strong(),
            accent: Palette::accent_teal(),
        }
    }

    pub fn result() -> Self {
        Self {
            fill: Palette::surface_alt(),
            border: Palette::border_soft(),
            accent: Palette::accent_amber(),
        }
    }

    pub fn history() -> Self {
        Self {
            fill: Palette::surface_alt(),
            border: Palette::border_soft(),
            accent: Palette::accent_sky(),
        }
    }
}

/// Group frame with a coloured stripe on the left edge.
pub fn section_card<R>(
    ui: &mut egui::Ui,
    style: SectionStyle,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    let inner = egui::Frame::group(ui.style())
        .fill(style.fill)
        .stroke(Stroke::new(1.2, style.border))
        .rounding(10.0)
        .inner_margin(Margin::symmetric(18.0, 14.0))
        .outer_margin(Margin::symmetric(0.0, 4.0))
        .shadow(egui::epaint::Shadow {
            offset: egui::vec2(0.0, 4.0),
            blur: 14.0,
            spread: 0.0,
            color: Palette::shadow_color(),
        })
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        });

    let area = inner.response.rect.shrink2(egui::vec2(3.0, 6.0));
    let stripe = egui::Rect::from_min_max(area.left_top(), egui::pos2(area.left() + 4.0, area.bottom()));
    ui.painter_at(inner.response.rect)
        .rect_filled(stripe, 3.0, style.accent);

    inner
}

pub fn configure_style(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_rounding = egui::Rounding::same(12.0);
    visuals.window_fill = Palette::surface_alt();
    visuals.panel_fill = Palette::main_panel();
    visuals.extreme_bg_color = Palette::background();
    visuals.widgets.noninteractive.bg_fill = Palette::top_panel();
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Palette::text_secondary());
    visuals.widgets.inactive.bg_fill = Palette::button_idle();
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.1, Palette::text_primary());
    visuals.widgets.hovered.bg_fill = Palette::button_hover();
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.1, Palette::accent_teal());
    visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(96, 204, 186, 70);
    visuals.selection.stroke = Stroke::new(1.2, Palette::accent_teal());

    let mut style = (*ctx.style()).clone();
    style.visuals = visuals;
    style
        .text_styles
        .insert(TextStyle::Heading, FontId::proportional(22.0));
    style
        .text_styles
        .insert(TextStyle::Body, FontId::proportional(16.0));
    style
        .text_styles
        .insert(TextStyle::Button, FontId::proportional(15.0));
    style
        .text_styles
        .insert(TextStyle::Monospace, FontId::monospace(14.5));
    style.spacing.item_spacing = egui::vec2(12.0, 10.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.visuals.override_text_color = Some(Palette::text_primary());
    ctx.set_style(style);
}
