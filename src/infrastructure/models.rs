use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::order::{LineItem, Order};
use crate::schema::{order_lines, orders};

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub account_id: Uuid,
    pub total_price: &'a BigDecimal,
}

impl<'a> From<&'a Order> for NewOrderRow<'a> {
    fn from(order: &'a Order) -> Self {
        Self {
            id: order.id,
            created_at: order.created_at,
            account_id: order.account_id,
            total_price: &order.total_price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

/// One row of the `orders ⟕ order_lines` join. The header columns repeat
/// for every line of the same order; an order without lines yields a single
/// row whose line columns are NULL.
#[derive(Debug, Clone, Queryable)]
pub struct AccountOrderRow {
    pub order_id: Uuid,
    pub account_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub total_price: Option<BigDecimal>,
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
}

impl AccountOrderRow {
    /// An order built from the header columns, without items. Missing
    /// header values fall back to the epoch and zero.
    pub fn header(&self) -> Order {
        if self.created_at.is_none() || self.total_price.is_none() {
            log::warn!(
                "order {} has a NULL created_at or total_price; using zero values",
                self.order_id
            );
        }
        Order {
            id: self.order_id,
            account_id: self.account_id,
            created_at: self.created_at.unwrap_or_default(),
            total_price: self.total_price.clone().unwrap_or_default(),
            items: Vec::new(),
        }
    }

    /// The line carried by this row, if the order has any.
    pub fn line_item(&self) -> Option<LineItem> {
        Some(LineItem {
            product_id: self.product_id?,
            quantity: self.quantity?,
        })
    }
}
