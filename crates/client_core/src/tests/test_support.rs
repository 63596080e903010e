//! Fixture builders shared by the unit test suites.

use shared::{
    domain::{Category, DeliveryType, EventId, EventStatus, OrderId, OrderStatus},
    protocol::{CartItem, Customer, Event, Order},
};

pub fn event(id: i64, name: &str, category: &str, date: &str, status: &str) -> Event {
    Event {
        id: EventId::from(id),
        name: name.to_string(),
        description: format!("{name} description"),
        date: date.to_string(),
        category: Category::from(category),
        capacity: 50,
        status: EventStatus::from(status),
        image: format!("https://img.example/{id}.png"),
    }
}

pub fn sample_events() -> Vec<Event> {
    vec![
        event(1, "Jazz Night", "culturales", "2024-05-01", "abierto"),
        event(2, "Soccer Cup", "deportes", "2024-04-01", "cerrado"),
    ]
}

pub fn order(id: i64, time: Option<&str>, delivery: &str) -> Order {
    Order {
        id: OrderId::from(id),
        date: "2024-05-01".to_string(),
        time: time.map(str::to_string),
        delivery: DeliveryType::from(delivery),
        total: 25000.0,
        item_count: 2,
        status: OrderStatus::Pending,
        description: Some("sin cebolla".to_string()),
        customer: Customer {
            first_name: "Ana".to_string(),
            last_name: "Gómez".to_string(),
            document_number: "1032456789".to_string(),
            address: "Calle 10 # 4-21".to_string(),
            neighborhood: "Centro".to_string(),
        },
        cart: vec![CartItem {
            id: None,
            name: "Bandeja paisa".to_string(),
            price: 12500.0,
            quantity: 2,
            description: String::new(),
        }],
    }
}

/// `count` orders with ids 1..=count, all at noon for home delivery.
pub fn noon_orders(count: i64) -> Vec<Order> {
    (1..=count)
        .map(|id| order(id, Some("12:00"), "envio"))
        .collect()
}
