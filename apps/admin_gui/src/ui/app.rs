use std::{collections::VecDeque, time::Duration};

use chrono::Local;
use client_core::{
    confirm::{Confirmation, Decision},
    notice::Notice,
    password::{password_reset_notice, reset_email_notice, validate_new_password},
    report::ReportOutcome,
    screens::{EventsScreen, OrdersScreen},
    ClientResult,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::EventId;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        orchestration::dispatch_backend_command,
    },
    ui::{
        panels::{self, AccountForms, PanelAction},
        theme,
        widgets::{self, DetailAction},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Events,
    Orders,
    Account,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Events, Tab::Orders, Tab::Account];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Events => "Eventos",
            Tab::Orders => "Pedidos",
            Tab::Account => "Recuperar contraseña",
        }
    }
}

pub struct AdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    tab: Tab,
    activation: u64,
    events: EventsScreen,
    orders: OrdersScreen,
    account: AccountForms,
    pending_delete: Option<Confirmation<EventId>>,
    notices: VecDeque<Notice>,
    last_error: Option<UiError>,
    status: String,
    style_applied: bool,
}

impl AdminApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            tab: Tab::Events,
            activation: 0,
            events: EventsScreen::new(0),
            orders: OrdersScreen::new(0),
            account: AccountForms::default(),
            pending_delete: None,
            notices: VecDeque::new(),
            last_error: None,
            status: String::new(),
            style_applied: false,
        };
        app.activate(Tab::Events);
        app
    }

    /// Shows `tab` with a freshly created screen and starts its load. Results
    /// still in flight for the previous screen are dropped when they arrive.
    pub fn activate(&mut self, tab: Tab) {
        self.activation += 1;
        self.tab = tab;
        self.pending_delete = None;
        let activation = self.activation;
        match tab {
            Tab::Events => {
                self.events = EventsScreen::new(activation);
                self.events.begin_load();
                self.dispatch(BackendCommand::LoadEvents { activation });
            }
            Tab::Orders => {
                self.orders = OrdersScreen::new(activation);
                self.orders.begin_load();
                self.dispatch(BackendCommand::LoadOrders { activation });
            }
            Tab::Account => {
                self.account = AccountForms::default();
            }
        }
        tracing::debug!(?tab, activation, "screen activated");
    }

    fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    fn record_failure<T>(&mut self, context: UiErrorContext, result: &ClientResult<T>) {
        if let Err(err) = result {
            let ui_error = UiError::from_client_error(context, err);
            tracing::warn!(
                category = ?ui_error.category(),
                context = ?ui_error.context(),
                error = %err,
                "backend operation failed"
            );
            self.last_error = Some(ui_error);
        }
    }

    /// A response belongs to the screen on display only if that tab is still
    /// showing the same activation it was issued from.
    fn is_stale(&self, tab: Tab, activation: u64) -> bool {
        if self.tab != tab || self.activation != activation {
            tracing::debug!(
                ?tab,
                activation,
                current = self.activation,
                "dropping response for inactive screen"
            );
            return true;
        }
        false
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::Error(err) => {
                tracing::warn!(
                    category = ?err.category(),
                    context = ?err.context(),
                    "{}",
                    err.message()
                );
                self.push_notice(err.to_notice());
                self.last_error = Some(err);
            }
            UiEvent::EventsLoaded { activation, result } => {
                if self.is_stale(Tab::Events, activation) {
                    return;
                }
                self.record_failure(UiErrorContext::Events, &result);
                if let Some(notice) = self.events.finish_load(result) {
                    self.push_notice(notice);
                }
            }
            UiEvent::EventDeleted {
                activation,
                id,
                result,
            } => {
                if self.is_stale(Tab::Events, activation) {
                    return;
                }
                self.record_failure(UiErrorContext::Events, &result);
                let notice = self.events.finish_delete(&id, result);
                self.push_notice(notice);
            }
            UiEvent::OrdersLoaded { activation, result } => {
                if self.is_stale(Tab::Orders, activation) {
                    return;
                }
                self.record_failure(UiErrorContext::Orders, &result);
                self.orders.finish_load(result);
            }
            UiEvent::OrderDelivered {
                activation,
                id,
                result,
            } => {
                if self.is_stale(Tab::Orders, activation) {
                    return;
                }
                self.record_failure(UiErrorContext::Orders, &result);
                self.orders.finish_mark_delivered(&id, result);
            }
            UiEvent::ResetEmailSent(result) => {
                self.account.sending_email = false;
                self.record_failure(UiErrorContext::Account, &result);
                if result.is_ok() {
                    self.account.email.clear();
                }
                self.push_notice(reset_email_notice(&result));
            }
            UiEvent::PasswordReset(result) => {
                self.account.resetting_password = false;
                self.record_failure(UiErrorContext::Account, &result);
                if result.is_ok() {
                    self.account.new_password.clear();
                }
                self.push_notice(password_reset_notice(&result));
            }
            UiEvent::ReportSaved(path) => {
                self.status = format!("Reporte guardado en {}", path.display());
                self.push_notice(Notice::success(
                    "Reporte generado",
                    format!("El reporte se guardó en {}", path.display()),
                ));
            }
        }
    }

    pub fn handle_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::Reload => self.activate(self.tab),
            PanelAction::RequestDelete(id) => {
                self.pending_delete = Some(self.events.request_delete(id));
            }
            PanelAction::GenerateReport => {
                match self.events.prepare_report(Local::now().naive_local()) {
                    ReportOutcome::Empty(notice) => self.push_notice(notice),
                    ReportOutcome::Ready(report) => {
                        tracing::info!(
                            rows = report.row_count(),
                            file = %report.file_name,
                            "event report composed"
                        );
                        self.dispatch(BackendCommand::SaveReport { report });
                    }
                }
            }
            PanelAction::ShowOrder(id) => {
                self.orders.open_detail(&id);
            }
            PanelAction::MarkDelivered(id) => {
                let activation = self.orders.activation();
                self.dispatch(BackendCommand::MarkOrderDelivered { activation, id });
            }
            PanelAction::SendResetEmail(email) => {
                if self.dispatch(BackendCommand::SendResetEmail { email }) {
                    self.account.sending_email = true;
                }
            }
            PanelAction::ResetPassword(new_password) => {
                let checked = validate_new_password(&new_password);
                if checked.is_err() {
                    self.push_notice(password_reset_notice(&checked));
                    return;
                }
                if self.dispatch(BackendCommand::ResetPassword { new_password }) {
                    self.account.resetting_password = true;
                }
            }
        }
    }

    /// Resolves the open delete prompt. Only a confirmed prompt reaches the API.
    pub fn resolve_delete(&mut self, decision: Decision) {
        let Some(prompt) = self.pending_delete.take() else {
            return;
        };
        if let Some(id) = prompt.resolve(decision) {
            let activation = self.events.activation();
            self.dispatch(BackendCommand::DeleteEvent { activation, id });
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    fn show_navigation(&mut self, ctx: &egui::Context) -> Option<Tab> {
        let mut selected = None;
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Mila")
                        .strong()
                        .size(20.0)
                        .color(theme::BRAND),
                );
                ui.separator();
                for tab in Tab::ALL {
                    if ui
                        .add(egui::Button::new(tab.label()).selected(self.tab == tab))
                        .clicked()
                    {
                        selected = Some(tab);
                    }
                }
            });
            ui.add_space(4.0);
        });
        selected
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if !self.status.is_empty() {
                    ui.small(egui::RichText::new(&self.status).weak());
                }
                if let Some(err) = &self.last_error {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(
                            egui::RichText::new(format!("Último error: {}", err.message()))
                                .color(theme::DANGER),
                        );
                    });
                }
            });
        });
    }

    fn show_overlays(&mut self, ctx: &egui::Context, actions: &mut Vec<PanelAction>) {
        if let Some(order) = self.orders.detail().cloned() {
            match widgets::order_detail_window(ctx, &order) {
                Some(DetailAction::Close) => self.orders.close_detail(),
                Some(DetailAction::MarkDelivered) => {
                    actions.push(PanelAction::MarkDelivered(order.id.clone()))
                }
                None => {}
            }
        }

        if let Some(prompt) = &self.pending_delete {
            if let Some(decision) = widgets::confirmation_window(ctx, prompt) {
                self.resolve_delete(decision);
            }
        }

        if let Some(notice) = self.notices.front() {
            if widgets::notice_window(ctx, notice) {
                self.dismiss_notice();
            }
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.style_applied {
            theme::apply(ctx);
            self.style_applied = true;
        }
        self.process_ui_events();

        let selected = self.show_navigation(ctx);
        self.show_status_bar(ctx);

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Events => panels::events_panel(ui, &mut self.events, &mut actions),
            Tab::Orders => panels::orders_panel(ui, &mut self.orders, &mut actions),
            Tab::Account => panels::account_panel(ui, &mut self.account, &mut actions),
        });
        self.show_overlays(ctx, &mut actions);

        for action in actions {
            self.handle_action(action);
        }
        if let Some(tab) = selected {
            if tab != self.tab {
                self.activate(tab);
            }
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
