//! Pure derivation of the displayed lists from a raw collection plus the current
//! filter selection. Nothing here holds state; screens call back in after every
//! change.

use std::ops::Range;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use shared::{
    domain::{Category, DeliveryType, EventStatus, SortDirection},
    protocol::{Event, Order},
};

pub const ORDERS_PAGE_SIZE: usize = 15;
pub const DEFAULT_HOUR_FROM: &str = "11:00";
pub const DEFAULT_HOUR_TO: &str = "18:00";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub category: Option<Category>,
    pub status: Option<EventStatus>,
    pub search: String,
    pub sort: SortDirection,
}

impl EventFilter {
    fn matches(&self, event: &Event, needle: &str) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |category| &event.category == category);
        let status_ok = self
            .status
            .as_ref()
            .map_or(true, |status| &event.status == status);
        category_ok && status_ok && event.name.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsView {
    pub items: Vec<Event>,
    /// Set when a non-empty search term matched nothing.
    pub not_found: bool,
}

pub fn derive_events(events: &[Event], filter: &EventFilter) -> EventsView {
    let needle = filter.search.to_lowercase();
    let mut keyed: Vec<(Option<NaiveDateTime>, &Event)> = events
        .iter()
        .filter(|event| filter.matches(event, &needle))
        .map(|event| (parse_event_date(&event.date), event))
        .collect();

    // Stable, and unparsable dates (None) sort first. Descending is the exact
    // reverse of ascending so toggling twice is a no-op.
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    let mut items: Vec<Event> = keyed.into_iter().map(|(_, event)| event.clone()).collect();
    if filter.sort == SortDirection::Descending {
        items.reverse();
    }

    let not_found = !filter.search.is_empty() && items.is_empty();
    EventsView { items, not_found }
}

pub fn parse_event_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    /// Raw `HH:MM` inputs; only the hour part takes part in filtering.
    pub hour_from: String,
    pub hour_to: String,
    pub delivery: Option<DeliveryType>,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            hour_from: DEFAULT_HOUR_FROM.to_string(),
            hour_to: DEFAULT_HOUR_TO.to_string(),
            delivery: None,
        }
    }
}

impl OrderFilter {
    fn matches(&self, order: &Order, from: Option<u32>, to: Option<u32>) -> bool {
        let hour_ok = match order.time.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(time) => match (parse_order_hour(time), from, to) {
                (Some(hour), Some(from), Some(to)) => from <= hour && hour <= to,
                _ => false,
            },
        };
        let delivery_ok = self
            .delivery
            .as_ref()
            .map_or(true, |delivery| &order.delivery == delivery);
        hour_ok && delivery_ok
    }
}

pub fn derive_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    let from = bound_hour(&filter.hour_from);
    let to = bound_hour(&filter.hour_to);
    orders
        .iter()
        .filter(|order| filter.matches(order, from, to))
        .cloned()
        .collect()
}

/// Hour of day of an order time (`HH:MM` or `HH:MM:SS`).
pub fn parse_order_hour(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .map(|time| time.hour())
}

/// Leading hour of a filter bound such as `"11:00"`.
pub fn bound_hour(raw: &str) -> Option<u32> {
    raw.trim().split(':').next()?.trim().parse().ok()
}

/// A clamped page window. Only `new` builds one, so `page` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let mut pagination = Self {
            page,
            page_size: page_size.max(1),
            total_items,
        };
        pagination.page = clamp_page(page, pagination.total_pages());
        pagination
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn range(&self) -> Range<usize> {
        let start = (self.page.saturating_sub(1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }
}

/// Pages are 1-based; with no items there is still a page 1 to show.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
