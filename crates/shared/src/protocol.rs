use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    CartItemId, Category, DeliveryType, EventId, EventStatus, OrderId, OrderStatus, WireId,
};

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WireId>::deserialize(deserializer)?
        .map(WireId::into_string)
        .unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Raw date as sent by the API (`YYYY-MM-DD` or an ISO timestamp).
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "categoria", default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(rename = "cantidadCupos", default, deserialize_with = "null_as_default")]
    pub capacity: u32,
    #[serde(rename = "estadoEvento", default, deserialize_with = "null_as_default")]
    pub status: EventStatus,
    #[serde(rename = "imagen", default)]
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(rename = "nombre", default)]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(
        rename = "numero_documento",
        default,
        deserialize_with = "string_or_number"
    )]
    pub document_number: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "barrio", default)]
    pub neighborhood: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartItemId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "cantidad", default)]
    pub quantity: u32,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "fecha", default)]
    pub date: String,
    /// Time of day (`HH:MM` or `HH:MM:SS`); absent for orders without a slot.
    #[serde(rename = "hora", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "tipoEntrega", default, deserialize_with = "null_as_default")]
    pub delivery: DeliveryType,
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "cantidad", default)]
    pub item_count: u32,
    #[serde(rename = "estado", default, deserialize_with = "null_as_default")]
    pub status: OrderStatus,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "usuario", default, deserialize_with = "null_as_default")]
    pub customer: Customer,
    #[serde(rename = "carrito", default)]
    pub cart: Vec<CartItem>,
}

impl Order {
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }
}

/// Body of `PATCH /pedidos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

impl OrderStatusUpdate {
    pub fn delivered() -> Self {
        Self {
            status: OrderStatus::Delivered,
        }
    }
}

/// Body of `POST /enviar-correo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetEmailRequest {
    pub email: String,
}

/// Body of `POST /restablecer-contrasena`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(rename = "nuevaContrasena")]
    pub new_password: String,
}

/// `{success, message}` envelope returned by the account endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_without_status_defaults_to_pending() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": 7,
            "fecha": "2024-05-01",
            "hora": "12:30",
            "tipoEntrega": "envio",
            "total": 32000,
            "cantidad": 2,
            "estado": null,
            "usuario": {
                "nombre": "Ana",
                "apellido": "Gómez",
                "numero_documento": 1032456789,
                "direccion": "Calle 1",
                "barrio": "Centro"
            },
            "carrito": [
                { "id": 1, "nombre": "Empanada", "precio": 16000, "cantidad": 2 }
            ]
        }))
        .expect("order");

        assert_eq!(order.id, OrderId::from(7));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer.document_number, "1032456789");
        assert_eq!(order.customer.full_name(), "Ana Gómez");
        assert_eq!(order.cart[0].quantity, 2);
    }

    #[test]
    fn incomplete_rows_fall_back_to_defaults() {
        let events: Vec<Event> = serde_json::from_value(serde_json::json!([
            {
                "id": 1,
                "nombre": "Jazz Night",
                "categoria": "culturales",
                "cantidadCupos": 120,
                "estadoEvento": "abierto"
            },
            {
                "id": 2,
                "nombre": "Sin datos",
                "cantidadCupos": null,
                "estadoEvento": null
            }
        ]))
        .expect("events");

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].status, EventStatus::Other(String::new()));
        assert_eq!(events[1].category, Category::Other(String::new()));
        assert_eq!(events[1].capacity, 0);

        let order: Order = serde_json::from_value(serde_json::json!({
            "id": 3,
            "tipoEntrega": null,
            "usuario": { "nombre": "Ana", "numero_documento": null }
        }))
        .expect("order");
        assert_eq!(order.delivery, DeliveryType::Other(String::new()));
        assert_eq!(order.customer.full_name(), "Ana");
        assert!(order.customer.document_number.is_empty());

        let order: Order = serde_json::from_value(serde_json::json!({ "id": 4 })).expect("order");
        assert_eq!(order.customer, Customer::default());
    }

    #[test]
    fn status_update_uses_api_field_names() {
        let body = serde_json::to_value(OrderStatusUpdate::delivered()).expect("serialize");
        assert_eq!(body, serde_json::json!({ "estado": "entregado" }));

        let body = serde_json::to_value(PasswordResetRequest {
            new_password: "secreto1".to_string(),
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({ "nuevaContrasena": "secreto1" }));
    }
}
