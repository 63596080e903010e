//! Screen state containers. Each screen owns its raw collection and filter
//! selection, recomputes the derived view after every change, and only mutates
//! the collection once the API has confirmed an operation.

use chrono::NaiveDateTime;
use shared::{
    domain::{Category, DeliveryType, EventId, EventStatus, OrderId, OrderStatus},
    protocol::{Event, Order},
};
use tracing::{error, info};

use crate::{
    confirm::Confirmation,
    error::ClientResult,
    filter::{
        clamp_page, derive_events, derive_orders, EventFilter, EventsView, OrderFilter,
        Pagination, ORDERS_PAGE_SIZE,
    },
    notice::Notice,
    report::{self, ReportOutcome},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventsScreen {
    activation: u64,
    load_state: LoadState,
    events: Vec<Event>,
    filter: EventFilter,
    view: EventsView,
}

impl EventsScreen {
    pub fn new(activation: u64) -> Self {
        Self {
            activation,
            ..Self::default()
        }
    }

    pub fn activation(&self) -> u64 {
        self.activation
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn view(&self) -> &EventsView {
        &self.view
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Stores the fetched collection verbatim, or leaves it empty and returns the
    /// notice to show.
    pub fn finish_load(&mut self, result: ClientResult<Vec<Event>>) -> Option<Notice> {
        match result {
            Ok(events) => {
                self.events = events;
                self.load_state = LoadState::Loaded;
                self.refresh();
                None
            }
            Err(err) => {
                error!("failed to load events: {err}");
                self.events.clear();
                self.load_state = LoadState::Failed(err.user_message());
                self.refresh();
                Some(Notice::error("Error", "No se pudo cargar los eventos."))
            }
        }
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
        self.refresh();
    }

    pub fn set_status(&mut self, status: Option<EventStatus>) {
        self.filter.status = status;
        self.refresh();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    pub fn toggle_sort(&mut self) {
        self.filter.sort = self.filter.sort.toggled();
        self.refresh();
    }

    pub fn request_delete(&self, id: EventId) -> Confirmation<EventId> {
        Confirmation::new(
            id,
            "¿Estás seguro?",
            "¡Este evento se eliminará permanentemente!",
            "Sí, eliminar",
            "No, cancelar",
        )
    }

    /// Applies the API's answer to a confirmed delete.
    pub fn finish_delete(&mut self, id: &EventId, result: ClientResult<()>) -> Notice {
        match result {
            Ok(()) => {
                self.events.retain(|event| &event.id != id);
                self.refresh();
                Notice::success("Éxito", "Evento eliminado exitosamente")
            }
            Err(err) => {
                error!(event_id = %id, "failed to delete event: {err}");
                Notice::error("Error", "Ocurrió un error al eliminar el evento")
            }
        }
    }

    pub fn prepare_report(&self, generated_at: NaiveDateTime) -> ReportOutcome {
        report::compose(&self.view.items, &self.filter, generated_at)
    }

    fn refresh(&mut self) {
        self.view = derive_events(&self.events, &self.filter);
    }
}

#[derive(Debug, Clone)]
pub struct OrdersScreen {
    activation: u64,
    load_state: LoadState,
    orders: Vec<Order>,
    filter: OrderFilter,
    filtered: Vec<Order>,
    page: usize,
    detail: Option<OrderId>,
    error: Option<String>,
}

impl Default for OrdersScreen {
    fn default() -> Self {
        Self::new(0)
    }
}

impl OrdersScreen {
    pub fn new(activation: u64) -> Self {
        Self {
            activation,
            load_state: LoadState::Idle,
            orders: Vec::new(),
            filter: OrderFilter::default(),
            filtered: Vec::new(),
            page: 1,
            detail: None,
            error: None,
        }
    }

    pub fn activation(&self) -> u64 {
        self.activation
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    pub fn filtered(&self) -> &[Order] {
        &self.filtered
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn finish_load(&mut self, result: ClientResult<Vec<Order>>) {
        match result {
            Ok(orders) => {
                self.orders = orders;
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                error!("failed to load orders: {err}");
                let message = format!("Error al obtener los pedidos: {}", err.user_message());
                self.orders.clear();
                self.load_state = LoadState::Failed(message.clone());
                self.error = Some(message);
            }
        }
        self.refresh();
    }

    pub fn set_delivery(&mut self, delivery: Option<DeliveryType>) {
        self.filter.delivery = delivery;
        self.refilter();
    }

    pub fn set_hour_from(&mut self, hour_from: impl Into<String>) {
        self.filter.hour_from = hour_from.into();
        self.refilter();
    }

    pub fn set_hour_to(&mut self, hour_to: impl Into<String>) {
        self.filter.hour_to = hour_to.into();
        self.refilter();
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, ORDERS_PAGE_SIZE, self.filtered.len())
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.pagination().total_pages()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.total_pages());
    }

    pub fn page_items(&self) -> &[Order] {
        self.pagination().slice(&self.filtered)
    }

    pub fn open_detail(&mut self, id: &OrderId) -> bool {
        if self.orders.iter().any(|order| &order.id == id) {
            self.detail = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&Order> {
        let id = self.detail.as_ref()?;
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Applies the API's answer to a mark-delivered request: only the status of
    /// the matching order changes, and any open detail view is closed.
    pub fn finish_mark_delivered(&mut self, id: &OrderId, result: ClientResult<()>) {
        match result {
            Ok(()) => {
                if let Some(order) = self.orders.iter_mut().find(|order| &order.id == id) {
                    order.status = OrderStatus::Delivered;
                }
                info!(order_id = %id, "order delivered");
                self.detail = None;
                self.refresh();
            }
            Err(err) => {
                error!(order_id = %id, "failed to mark order delivered: {err}");
                self.error = Some(format!(
                    "Error al actualizar el pedido: {}",
                    err.user_message()
                ));
            }
        }
    }

    /// Filter selection changed: back to the first page.
    fn refilter(&mut self) {
        self.filtered = derive_orders(&self.orders, &self.filter);
        self.page = 1;
    }

    /// Collection changed: keep the page when it still exists.
    fn refresh(&mut self) {
        self.filtered = derive_orders(&self.orders, &self.filter);
        self.page = clamp_page(self.page, self.total_pages());
    }
}

#[cfg(test)]
#[path = "tests/screens_tests.rs"]
mod tests;
