//! Formatting and grouping used by the card grids and the report.

use shared::{
    domain::Category,
    protocol::{CartItem, Event, Order},
};

use crate::filter::parse_event_date;

pub fn format_event_date(raw: &str) -> String {
    parse_event_date(raw)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "Fecha inválida".to_string())
}

pub fn format_money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount}")
    }
}

pub fn order_schedule(order: &Order) -> String {
    match order.time.as_deref() {
        Some(time) if !time.trim().is_empty() => format!("{} {}", order.date, time.trim()),
        _ => order.date.clone(),
    }
}

/// Cart lines only show a description when the API sent a non-blank one.
pub fn cart_line_description(item: &CartItem) -> Option<&str> {
    Some(item.description.trim()).filter(|text| !text.is_empty())
}

pub fn category_title(category: &Category) -> &str {
    match category.label() {
        "" => "Sin categoría",
        label => label,
    }
}

/// Sections of the events grid: fixed categories in display order, then any
/// category the API added, in order of first appearance. Empty sections are
/// left out and each section keeps the incoming (sorted) order.
pub fn group_by_category(events: &[Event]) -> Vec<(Category, Vec<&Event>)> {
    let mut sections: Vec<(Category, Vec<&Event>)> = Category::ALL
        .iter()
        .map(|category| (category.clone(), Vec::new()))
        .collect();

    for event in events {
        match sections
            .iter()
            .position(|(category, _)| category == &event.category)
        {
            Some(index) => sections[index].1.push(event),
            None => sections.push((event.category.clone(), vec![event])),
        }
    }

    sections.retain(|(_, members)| !members.is_empty());
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{event, order};

    #[test]
    fn groups_follow_fixed_order_and_skip_empty_sections() {
        let events = vec![
            event(1, "Hamlet", "teatro", "2024-05-01", "abierto"),
            event(2, "Feria", "gastronomia", "2024-05-02", "abierto"),
            event(3, "Charla IA", "charlas", "2024-05-03", "abierto"),
            event(4, "Macbeth", "teatro", "2024-05-04", "abierto"),
        ];

        let sections = group_by_category(&events);
        let summary: Vec<(&str, usize)> = sections
            .iter()
            .map(|(category, members)| (category.as_str(), members.len()))
            .collect();

        assert_eq!(summary, [("charlas", 1), ("teatro", 2), ("gastronomia", 1)]);
        assert_eq!(sections[1].1[0].name, "Hamlet");
    }

    #[test]
    fn formats_dates_and_amounts_for_cards() {
        assert_eq!(format_event_date("2024-05-01"), "01/05/2024");
        assert_eq!(format_event_date("mañana"), "Fecha inválida");
        assert_eq!(format_money(25000.0), "$25000");
        assert_eq!(format_money(12.5), "$12.5");
    }

    #[test]
    fn schedule_omits_missing_time() {
        assert_eq!(order_schedule(&order(1, Some("12:30"), "envio")), "2024-05-01 12:30");
        assert_eq!(order_schedule(&order(2, None, "envio")), "2024-05-01");
    }

    #[test]
    fn blank_cart_descriptions_are_hidden() {
        let mut item = order(1, None, "envio").cart.remove(0);
        assert_eq!(cart_line_description(&item), None);

        item.description = "  sin picante ".to_string();
        assert_eq!(cart_line_description(&item), Some("sin picante"));
    }

    #[test]
    fn events_without_category_get_a_section_title() {
        let events = vec![
            event(1, "Hamlet", "teatro", "2024-05-01", "abierto"),
            event(2, "Sin datos", "", "2024-05-02", "abierto"),
        ];

        let groups = group_by_category(&events);
        let titles: Vec<&str> = groups
            .iter()
            .map(|(category, _)| category_title(category))
            .collect();

        assert_eq!(titles, ["Teatro", "Sin categoría"]);
    }
}
