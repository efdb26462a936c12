use std::fmt::Display;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Order {0} already exists")]
    DuplicateOrder(Uuid),
    #[error("Write error: {0}")]
    Write(String),
    #[error("Read error: {0}")]
    Read(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn write(e: impl Display) -> Self {
        DomainError::Write(e.to_string())
    }

    pub fn read(e: impl Display) -> Self {
        DomainError::Read(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_order_display_names_the_id() {
        let id = Uuid::nil();
        assert_eq!(
            DomainError::DuplicateOrder(id).to_string(),
            "Order 00000000-0000-0000-0000-000000000000 already exists"
        );
    }

    #[test]
    fn helpers_keep_the_source_message() {
        assert_eq!(DomainError::write("boom").to_string(), "Write error: boom");
        assert_eq!(DomainError::read("eof").to_string(), "Read error: eof");
    }
}
