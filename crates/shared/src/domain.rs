use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as it appears on the wire. The API hands out numeric ids for some
/// collections and string ids for others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    pub fn into_string(self) -> String {
        match self {
            WireId::Number(value) => value.to_string(),
            WireId::Text(value) => value,
        }
    }
}

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "WireId")]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<WireId> for $name {
            fn from(value: WireId) -> Self {
                Self(value.into_string())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(EventId);
id_newtype!(OrderId);
id_newtype!(CartItemId);

/// Closed set of wire values with an escape hatch for anything the API adds later.
/// Parsing is an exact match unless the enum is declared `(lenient)`, in which
/// case the raw value is trimmed and lower-cased first.
macro_rules! wire_enum {
    (@key $raw:ident) => {
        $raw.as_str()
    };
    (@key $raw:ident lenient) => {
        $raw.trim().to_lowercase().as_str()
    };
    ($(#[$meta:meta])* $name:ident $(($mode:ident))? { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(raw) => raw,
                }
            }

            /// Human-facing label used by selectors and card badges.
            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw,
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match wire_enum!(@key raw $($mode)?) {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Event category. `ALL` is also the grouping order of the events grid.
    Category {
        Charlas => ("charlas", "Charlas"),
        Teatro => ("teatro", "Teatro"),
        Deportes => ("deportes", "Deportes"),
        Culturales => ("culturales", "Culturales"),
        Festivales => ("festivales", "Festivales"),
    }
);

wire_enum!(EventStatus {
    Open => ("abierto", "Abierto"),
    Closed => ("cerrado", "Cerrado"),
    Upcoming => ("proximo", "Próximo"),
});

wire_enum!(OrderStatus {
    Pending => ("pendiente", "Pendiente"),
    Delivered => ("entregado", "Entregado"),
});

wire_enum!(DeliveryType (lenient) {
    HomeDelivery => ("envio", "Domicilio"),
    Pickup => ("recogida", "Recogido en tienda"),
});

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// Rows with a null or missing value keep an empty `Other` so the rest of the
// collection still loads.
impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Other(String::new())
    }
}

impl Default for DeliveryType {
    fn default() -> Self {
        DeliveryType::Other(String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let numeric: EventId = serde_json::from_str("7").expect("numeric id");
        let text: EventId = serde_json::from_str("\"a1\"").expect("string id");
        assert_eq!(numeric, EventId::from(7));
        assert_eq!(text.as_str(), "a1");
    }

    #[test]
    fn wire_enums_normalize_and_keep_unknown_values() {
        assert_eq!(DeliveryType::from(" Envio "), DeliveryType::HomeDelivery);
        assert_eq!(
            Category::from("gastronomia"),
            Category::Other("gastronomia".to_string())
        );
        let json = serde_json::to_string(&EventStatus::Upcoming).expect("serialize");
        assert_eq!(json, "\"proximo\"");
    }

    #[test]
    fn only_delivery_type_folds_case_and_whitespace() {
        assert_eq!(
            Category::from("Deportes"),
            Category::Other("Deportes".to_string())
        );
        assert_eq!(
            EventStatus::from(" abierto"),
            EventStatus::Other(" abierto".to_string())
        );
        assert_eq!(OrderStatus::from("entregado"), OrderStatus::Delivered);
        assert_eq!(DeliveryType::from("RECOGIDA"), DeliveryType::Pickup);
    }

    #[test]
    fn category_order_is_the_fixed_display_order() {
        let wire: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(
            wire,
            ["charlas", "teatro", "deportes", "culturales", "festivales"]
        );
    }
}
