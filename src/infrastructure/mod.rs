pub mod fold;
pub mod models;
pub mod order_repo;
