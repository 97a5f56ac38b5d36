use crate::db::{ProductStore, StoreError};
use crate::models;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Keeps products in memory, ordered by id. Ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    inner: RwLock<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    last_id: i32,
    products: BTreeMap<i32, models::Product>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> Result<Vec<models::Product>, StoreError> {
        Ok(self.inner.read().await.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<models::Product>, StoreError> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn save(&self, mut product: models::Product) -> Result<models::Product, StoreError> {
        let mut rows = self.inner.write().await;

        if product.is_new() {
            rows.last_id += 1;
            product.id = rows.last_id;
        } else {
            let existing = rows
                .products
                .get(&product.id)
                .ok_or(StoreError::NotFound(product.id))?;
            product.created_at = existing.created_at;
        }

        rows.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, product: &models::Product) -> Result<(), StoreError> {
        self.inner.write().await.products.remove(&product.id);
        Ok(())
    }
}
