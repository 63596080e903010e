use client_core::{
    confirm::{Confirmation, Decision},
    notice::Notice,
    present::{cart_line_description, format_event_date, format_money, order_schedule},
};
use eframe::egui;
use shared::protocol::{Event, Order};

use crate::ui::theme;

pub fn info_row(ui: &mut egui::Ui, label: &str, value: impl Into<egui::WidgetText>) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(value);
    });
}

fn modal_window(title: &str, id: &str) -> egui::Window<'static> {
    egui::Window::new(title.to_string())
        .id(egui::Id::new(id))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
}

/// Returns `true` once the notice button is pressed.
pub fn notice_window(ctx: &egui::Context, notice: &Notice) -> bool {
    let mut dismissed = false;
    modal_window(&notice.title, "notice_window").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(theme::notice_icon(notice.kind))
                    .size(24.0)
                    .color(theme::notice_color(notice.kind)),
            );
            ui.label(&notice.text);
        });
        ui.add_space(8.0);
        if ui.button(&notice.button).clicked() {
            dismissed = true;
        }
    });
    dismissed
}

pub fn confirmation_window<T>(ctx: &egui::Context, prompt: &Confirmation<T>) -> Option<Decision> {
    let mut decision = None;
    modal_window(&prompt.title, "confirmation_window").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(theme::notice_icon(client_core::notice::NoticeKind::Warning))
                    .size(24.0)
                    .color(theme::WARNING),
            );
            ui.label(&prompt.text);
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let confirm = egui::Button::new(
                egui::RichText::new(&prompt.confirm_label).color(egui::Color32::WHITE),
            )
            .fill(theme::DANGER);
            if ui.add(confirm).clicked() {
                decision = Some(Decision::Confirmed);
            }
            if ui.button(&prompt.cancel_label).clicked() {
                decision = Some(Decision::Cancelled);
            }
        });
    });
    decision
}

fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
}

/// Returns `true` when the delete button was pressed.
pub fn event_card(ui: &mut egui::Ui, event: &Event) -> bool {
    let mut delete = false;
    card_frame(ui).show(ui, |ui| {
        ui.set_width(theme::CARD_WIDTH);
        let name = ui.label(egui::RichText::new(&event.name).strong().size(16.0));
        if !event.image.is_empty() {
            name.on_hover_text(&event.image);
        }
        if !event.description.is_empty() {
            ui.label(egui::RichText::new(&event.description).color(theme::MUTED));
        }
        info_row(ui, "Fecha:", format_event_date(&event.date));
        info_row(
            ui,
            "Estado:",
            egui::RichText::new(event.status.label()).color(theme::event_status_color(&event.status)),
        );
        info_row(ui, "Cupos:", event.capacity.to_string());
        ui.add_space(4.0);
        let button = egui::Button::new(egui::RichText::new("Eliminar").color(egui::Color32::WHITE))
            .fill(theme::DANGER);
        if ui.add(button).clicked() {
            delete = true;
        }
    });
    delete
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCardAction {
    ShowDetail,
    MarkDelivered,
}

pub fn order_card(ui: &mut egui::Ui, order: &Order) -> Option<OrderCardAction> {
    let mut action = None;
    card_frame(ui).show(ui, |ui| {
        ui.set_width(theme::CARD_WIDTH);
        ui.label(egui::RichText::new(format!("Pedido #{}", order.id)).strong().size(16.0));
        info_row(ui, "Cliente:", order.customer.full_name());
        info_row(ui, "Fecha:", order_schedule(order));
        info_row(ui, "Entrega:", order.delivery.label());
        info_row(ui, "Total:", format_money(order.total));
        info_row(
            ui,
            "Estado:",
            egui::RichText::new(order.status.label()).color(theme::order_status_color(&order.status)),
        );
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Ver Detalles").clicked() {
                action = Some(OrderCardAction::ShowDetail);
            }
            if !order.is_delivered() && ui.button("Marcar como entregado").clicked() {
                action = Some(OrderCardAction::MarkDelivered);
            }
        });
    });
    action
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Close,
    MarkDelivered,
}

pub fn order_detail_window(ctx: &egui::Context, order: &Order) -> Option<DetailAction> {
    let mut action = None;
    let title = format!("Detalles del Pedido #{}", order.id);
    modal_window(&title, "order_detail_window").show(ctx, |ui| {
        ui.set_min_width(420.0);
        ui.label(egui::RichText::new("Cliente").strong().color(theme::BRAND));
        info_row(ui, "Nombre:", order.customer.full_name());
        info_row(ui, "Documento:", order.customer.document_number.as_str());
        info_row(ui, "Dirección:", order.customer.address.as_str());
        info_row(ui, "Barrio:", order.customer.neighborhood.as_str());
        ui.separator();

        ui.label(egui::RichText::new("Pedido").strong().color(theme::BRAND));
        info_row(ui, "Fecha:", order_schedule(order));
        info_row(ui, "Tipo de entrega:", order.delivery.label());
        info_row(ui, "Cantidad:", order.item_count.to_string());
        if let Some(description) = order.description.as_deref().filter(|d| !d.is_empty()) {
            info_row(ui, "Descripción:", description);
        }
        info_row(
            ui,
            "Estado:",
            egui::RichText::new(order.status.label()).color(theme::order_status_color(&order.status)),
        );
        ui.separator();

        ui.label(egui::RichText::new("Productos").strong().color(theme::BRAND));
        egui::Grid::new("order_detail_cart")
            .num_columns(4)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Producto");
                ui.strong("Cantidad");
                ui.strong("Precio");
                ui.strong("Subtotal");
                ui.end_row();
                for item in &order.cart {
                    ui.vertical(|ui| {
                        ui.label(&item.name);
                        if let Some(description) = cart_line_description(item) {
                            ui.label(
                                egui::RichText::new(description)
                                    .small()
                                    .color(theme::MUTED),
                            );
                        }
                    });
                    ui.label(item.quantity.to_string());
                    ui.label(format_money(item.price));
                    ui.label(format_money(item.price * f64::from(item.quantity)));
                    ui.end_row();
                }
            });
        ui.add_space(4.0);
        info_row(ui, "Total:", format_money(order.total));
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if !order.is_delivered() && ui.button("Marcar como entregado").clicked() {
                action = Some(DetailAction::MarkDelivered);
            }
            if ui.button("Cerrar").clicked() {
                action = Some(DetailAction::Close);
            }
        });
    });
    action
}
