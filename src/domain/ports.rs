use uuid::Uuid;

use super::errors::DomainError;
use super::order::Order;

pub trait OrderRepository: Send + Sync + 'static {
    /// Persist the order header and every line item atomically.
    fn put(&self, order: &Order) -> Result<(), DomainError>;

    /// All orders of an account with their items, sorted by order id.
    fn list_for_account(&self, account_id: Uuid) -> Result<Vec<Order>, DomainError>;
}
