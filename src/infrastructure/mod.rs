pub mod models;
pub mod order_repo;
pub mod user_repo;

#[cfg(test)]
pub mod memory;
