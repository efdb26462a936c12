use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// An order together with all of its line items.
///
/// Orders are written once and never updated; `id` and `created_at` are
/// assigned before the order reaches the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub total_price: BigDecimal,
    pub items: Vec<LineItem>,
}
