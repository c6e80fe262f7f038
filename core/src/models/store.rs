//! Store orders.

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by a customer.
    Placed,
    /// Approved by the store.
    Approved,
    /// Delivered.
    Delivered,
}

impl OrderStatus {
    /// Every status, in document order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Placed,
        OrderStatus::Approved,
        OrderStatus::Delivered,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Approved => "approved",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order for a pet.
///
/// `GET /store/order/{orderId}` only answers for ids 1 to 10.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Id of the ordered pet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,
    /// Number of pets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// RFC 3339 ship date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    /// Order status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    /// Whether the order is complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

/// Lowest order id the store serves.
pub const MIN_ORDER_ID: i64 = 1;
/// Highest order id the store serves.
pub const MAX_ORDER_ID: i64 = 10;

impl Order {
    /// An order with every field populated.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Order {
            id: Some(rng.gen_range(MIN_ORDER_ID..=MAX_ORDER_ID)),
            pet_id: Some(rng.gen_range(1000..=9999)),
            quantity: Some(rng.gen_range(1..=5)),
            ship_date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            status: Some(OrderStatus::Placed),
            complete: Some(false),
        }
    }

    /// An order with only id, pet id and quantity.
    pub fn minimal() -> Self {
        let mut rng = rand::thread_rng();
        Order {
            id: Some(rng.gen_range(MIN_ORDER_ID..=MAX_ORDER_ID)),
            pet_id: Some(rng.gen_range(1000..=9999)),
            quantity: Some(1),
            ..Order::default()
        }
    }

    /// A placed order using `id`, which may lie outside the served range.
    pub fn with_id(id: i64) -> Self {
        Order {
            id: Some(id),
            pet_id: Some(rand::thread_rng().gen_range(1000..=9999)),
            quantity: Some(1),
            status: Some(OrderStatus::Placed),
            ..Order::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_order_in_served_range() {
        for _ in 0..20 {
            let order = Order::random();
            let id = order.id.unwrap();
            assert!((MIN_ORDER_ID..=MAX_ORDER_ID).contains(&id));
            assert_eq!(order.complete, Some(false));
        }
    }

    #[test]
    fn test_order_wire_format() {
        let value = serde_json::to_value(Order::random()).unwrap();
        assert!(value.get("petId").is_some());
        assert!(value.get("shipDate").unwrap().as_str().unwrap().ends_with('Z'));
        assert_eq!(value["status"], "placed");
    }

    #[test]
    fn test_minimal_and_custom_id() {
        let value = serde_json::to_value(Order::minimal()).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 3);
        assert_eq!(Order::with_id(0).id, Some(0));
    }
}
