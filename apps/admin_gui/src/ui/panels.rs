//! Central panels for the three admin screens. Local state changes (filters,
//! paging) are applied directly to the screen; anything that needs the backend
//! comes back as a `PanelAction` for the app shell to dispatch.

use client_core::{
    filter::{DEFAULT_HOUR_FROM, DEFAULT_HOUR_TO},
    present::{category_title, group_by_category},
    screens::{EventsScreen, LoadState, OrdersScreen},
};
use eframe::egui;
use shared::domain::{Category, DeliveryType, EventId, EventStatus, OrderId};

use crate::ui::{
    theme,
    widgets::{self, OrderCardAction},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Reload,
    RequestDelete(EventId),
    GenerateReport,
    ShowOrder(OrderId),
    MarkDelivered(OrderId),
    SendResetEmail(String),
    ResetPassword(String),
}

#[derive(Debug, Default)]
pub struct AccountForms {
    pub email: String,
    pub new_password: String,
    pub sending_email: bool,
    pub resetting_password: bool,
}

fn load_indicator(ui: &mut egui::Ui, state: &LoadState) {
    match state {
        LoadState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Cargando...");
            });
        }
        LoadState::Failed(reason) => {
            ui.colored_label(theme::DANGER, reason);
        }
        LoadState::Idle | LoadState::Loaded => {}
    }
}

pub fn events_panel(ui: &mut egui::Ui, screen: &mut EventsScreen, actions: &mut Vec<PanelAction>) {
    ui.heading("Eventos");
    ui.add_space(4.0);

    ui.horizontal_wrapped(|ui| {
        ui.label("Seleccione una Categoría");
        let mut category = screen.filter().category.clone();
        egui::ComboBox::from_id_salt("event_category")
            .selected_text(category.as_ref().map_or("Todas", Category::label).to_string())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut category, None, "Todas");
                for option in Category::ALL {
                    ui.selectable_value(&mut category, Some(option.clone()), option.label());
                }
            });
        if category != screen.filter().category {
            screen.set_category(category);
        }

        let mut search = screen.filter().search.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("Buscar evento por nombre")
                .desired_width(220.0),
        );
        if response.changed() {
            screen.set_search(search);
        }
        if !screen.filter().search.is_empty()
            && ui
                .small_button("✖")
                .on_hover_text("Limpiar búsqueda")
                .clicked()
        {
            screen.clear_search();
        }

        let mut status = screen.filter().status.clone();
        egui::ComboBox::from_id_salt("event_status")
            .selected_text(status.as_ref().map_or("Todos los estados", EventStatus::label).to_string())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut status, None, "Todos los estados");
                for option in EventStatus::ALL {
                    ui.selectable_value(&mut status, Some(option.clone()), option.label());
                }
            });
        if status != screen.filter().status {
            screen.set_status(status);
        }

        if ui
            .button(format!("Ordenar por fecha: {}", screen.filter().sort.arrow()))
            .clicked()
        {
            screen.toggle_sort();
        }
        let report = egui::Button::new(
            egui::RichText::new("Generar Reporte PDF").color(egui::Color32::BLACK),
        )
        .fill(theme::BRAND);
        if ui.add(report).clicked() {
            actions.push(PanelAction::GenerateReport);
        }
        if ui.button("Recargar").clicked() {
            actions.push(PanelAction::Reload);
        }
    });
    ui.separator();
    load_indicator(ui, screen.load_state());

    if screen.view().not_found {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("No se encontraron eventos con el término de búsqueda.")
                .color(theme::MUTED),
        );
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (category, events) in group_by_category(&screen.view().items) {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(category_title(&category))
                        .strong()
                        .size(18.0)
                        .color(theme::BRAND),
                );
                ui.horizontal_wrapped(|ui| {
                    for event in events {
                        if widgets::event_card(ui, event) {
                            actions.push(PanelAction::RequestDelete(event.id.clone()));
                        }
                    }
                });
            }
        });
}

fn error_banner(ui: &mut egui::Ui, screen: &mut OrdersScreen) {
    let Some(message) = screen.error().map(str::to_string) else {
        return;
    };
    egui::Frame::NONE
        .fill(theme::BANNER_FILL)
        .stroke(egui::Stroke::new(1.0, theme::BANNER_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Cerrar").clicked() {
                        screen.dismiss_error();
                    }
                });
            });
        });
}

pub fn orders_panel(ui: &mut egui::Ui, screen: &mut OrdersScreen, actions: &mut Vec<PanelAction>) {
    ui.heading("Pedidos");
    ui.add_space(4.0);
    error_banner(ui, screen);

    ui.horizontal_wrapped(|ui| {
        ui.label("Tipo de entrega");
        let mut delivery = screen.filter().delivery.clone();
        egui::ComboBox::from_id_salt("order_delivery")
            .selected_text(delivery.as_ref().map_or("Todos", DeliveryType::label).to_string())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut delivery, None, "Todos");
                for option in DeliveryType::ALL {
                    ui.selectable_value(&mut delivery, Some(option.clone()), option.label());
                }
            });
        if delivery != screen.filter().delivery {
            screen.set_delivery(delivery);
        }

        ui.label("Hora desde");
        let mut hour_from = screen.filter().hour_from.clone();
        let from_edit = egui::TextEdit::singleline(&mut hour_from)
            .hint_text(DEFAULT_HOUR_FROM)
            .desired_width(60.0);
        if ui.add(from_edit).changed() {
            screen.set_hour_from(hour_from);
        }
        ui.label("hasta");
        let mut hour_to = screen.filter().hour_to.clone();
        let to_edit = egui::TextEdit::singleline(&mut hour_to)
            .hint_text(DEFAULT_HOUR_TO)
            .desired_width(60.0);
        if ui.add(to_edit).changed() {
            screen.set_hour_to(hour_to);
        }

        if ui.button("Recargar").clicked() {
            actions.push(PanelAction::Reload);
        }
    });
    ui.separator();
    load_indicator(ui, screen.load_state());

    let mut requested_page = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if screen.page_items().is_empty() && !screen.load_state().is_loading() {
                ui.label(egui::RichText::new("No hay pedidos para mostrar.").color(theme::MUTED));
            }
            ui.horizontal_wrapped(|ui| {
                for order in screen.page_items() {
                    match widgets::order_card(ui, order) {
                        Some(OrderCardAction::ShowDetail) => {
                            actions.push(PanelAction::ShowOrder(order.id.clone()))
                        }
                        Some(OrderCardAction::MarkDelivered) => {
                            actions.push(PanelAction::MarkDelivered(order.id.clone()))
                        }
                        None => {}
                    }
                }
            });

            let total_pages = screen.total_pages();
            if total_pages > 1 {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    for page in 1..=total_pages {
                        let selected = page == screen.current_page();
                        if ui.add(egui::Button::new(page.to_string()).selected(selected)).clicked() {
                            requested_page = Some(page);
                        }
                    }
                });
            }
        });
    if let Some(page) = requested_page {
        screen.set_page(page);
    }
}

pub fn account_panel(ui: &mut egui::Ui, forms: &mut AccountForms, actions: &mut Vec<PanelAction>) {
    ui.heading("Recuperar contraseña");
    ui.add_space(4.0);

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(360.0);
            ui.label(egui::RichText::new("Enviar correo de recuperación").strong());
            ui.add(
                egui::TextEdit::singleline(&mut forms.email)
                    .hint_text("Correo electrónico")
                    .desired_width(f32::INFINITY),
            );
            let send = egui::Button::new("Enviar");
            if ui
                .add_enabled(!forms.sending_email && !forms.email.trim().is_empty(), send)
                .clicked()
            {
                actions.push(PanelAction::SendResetEmail(forms.email.trim().to_string()));
            }
            if forms.sending_email {
                ui.spinner();
            }
        });

    ui.add_space(12.0);

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(360.0);
            ui.label(egui::RichText::new("Restablecer Contraseña").strong());
            ui.add(
                egui::TextEdit::singleline(&mut forms.new_password)
                    .password(true)
                    .hint_text("Nueva contraseña (6 a 10 caracteres)")
                    .desired_width(f32::INFINITY),
            );
            let reset = egui::Button::new("Restablecer Contraseña");
            if ui.add_enabled(!forms.resetting_password, reset).clicked() {
                actions.push(PanelAction::ResetPassword(forms.new_password.clone()));
            }
            if forms.resetting_password {
                ui.spinner();
            }
        });
}
