use client_core::notice::NoticeKind;
use eframe::egui;
use shared::domain::{EventStatus, OrderStatus};

pub const BRAND: egui::Color32 = egui::Color32::from_rgb(241, 196, 15);
pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 53, 69);
pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(40, 167, 69);
pub const INFO: egui::Color32 = egui::Color32::from_rgb(23, 162, 184);
pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 153, 0);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(120, 124, 130);

pub const BANNER_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
pub const BANNER_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

pub const CARD_WIDTH: f32 = 280.0;

pub fn notice_color(kind: NoticeKind) -> egui::Color32 {
    match kind {
        NoticeKind::Success => SUCCESS,
        NoticeKind::Info => INFO,
        NoticeKind::Warning => WARNING,
        NoticeKind::Error => DANGER,
    }
}

pub fn notice_icon(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "✔",
        NoticeKind::Info => "ℹ",
        NoticeKind::Warning => "⚠",
        NoticeKind::Error => "✖",
    }
}

pub fn event_status_color(status: &EventStatus) -> egui::Color32 {
    match status {
        EventStatus::Open => SUCCESS,
        EventStatus::Closed => DANGER,
        EventStatus::Upcoming => INFO,
        EventStatus::Other(_) => MUTED,
    }
}

pub fn order_status_color(status: &OrderStatus) -> egui::Color32 {
    match status {
        OrderStatus::Delivered => SUCCESS,
        OrderStatus::Pending => WARNING,
        OrderStatus::Other(_) => MUTED,
    }
}

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    style.visuals.selection.bg_fill = BRAND.gamma_multiply(0.6);
    style.visuals.hyperlink_color = BRAND;
    ctx.set_style(style);
}
