use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, Order};
use crate::domain::ports::OrderRepository;

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Build a new order for `account_id` and store it.
    ///
    /// The order id and creation time are assigned here. Line items with a
    /// non-positive quantity are rejected before anything is written.
    pub fn place_order(
        &self,
        account_id: Uuid,
        total_price: BigDecimal,
        items: Vec<LineItem>,
    ) -> Result<Order, DomainError> {
        if let Some(item) = items.iter().find(|item| item.quantity <= 0) {
            return Err(DomainError::InvalidInput(format!(
                "quantity for product {} must be positive, got {}",
                item.product_id, item.quantity
            )));
        }

        let order = Order {
            id: Uuid::new_v4(),
            account_id,
            // The store keeps microsecond precision.
            created_at: Utc::now().trunc_subsecs(6),
            total_price,
            items,
        };
        self.repo.put(&order)?;
        Ok(order)
    }

    pub fn orders_for_account(&self, account_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.repo.list_for_account(account_id)
    }
}
