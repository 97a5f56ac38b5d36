//! Persistence for products.
//!
//! Handlers only see [`ProductStore`]; the server wires in [`PgProductStore`],
//! tests use [`MemoryProductStore`].

use crate::models;
use async_trait::async_trait;

mod memory;
pub mod product;

pub use memory::MemoryProductStore;
pub use product::PgProductStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("product {0} does not exist")]
    NotFound(i32),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, in store order.
    async fn find_all(&self) -> Result<Vec<models::Product>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<models::Product>, StoreError>;

    /// Inserts a new product (assigning its id) or updates an existing one.
    /// `created_at` is never rewritten by an update.
    async fn save(&self, product: models::Product) -> Result<models::Product, StoreError>;

    async fn delete(&self, product: &models::Product) -> Result<(), StoreError>;
}
