use crate::db::{ProductStore, StoreError};
use crate::models;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;

pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, mut product: models::Product) -> Result<models::Product, StoreError> {
        let query_span = tracing::info_span!("Saving new product into the database");
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO products (
            name,
            brand,
            category,
            price,
            description,
            created_at,
            image_file_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id;
            "#,
        )
        .bind(&product.name)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.created_at)
        .bind(&product.image_file_name)
        .fetch_one(&self.pool)
        .instrument(query_span)
        .await
        .map(move |id| {
            product.id = id;
            product
        })
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            StoreError::from(err)
        })
    }

    async fn update(&self, product: models::Product) -> Result<models::Product, StoreError> {
        let query_span = tracing::info_span!("Updating product");
        sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE products
            SET
                name=$2,
                brand=$3,
                category=$4,
                price=$5,
                description=$6,
                image_file_name=$7
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image_file_name)
        .fetch_optional(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            StoreError::from(err)
        })
        .and_then(|updated| match updated {
            Some(_) => {
                tracing::info!("Product {} has been saved", product.id);
                Ok(product)
            }
            None => Err(StoreError::NotFound(product.id)),
        })
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<models::Product>, StoreError> {
        let query_span = tracing::info_span!("Fetch all products.");
        sqlx::query_as::<_, models::Product>(
            r#"
            SELECT
                id, name, brand, category, price, description, created_at, image_file_name
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch products, error: {:?}", err);
            StoreError::from(err)
        })
    }

    #[tracing::instrument(name = "Fetch product.", skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Option<models::Product>, StoreError> {
        sqlx::query_as::<_, models::Product>(
            r#"
            SELECT
                id, name, brand, category, price, description, created_at, image_file_name
            FROM products
            WHERE id=$1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product, error: {:?}", err);
            StoreError::from(err)
        })
    }

    async fn save(&self, product: models::Product) -> Result<models::Product, StoreError> {
        if product.is_new() {
            self.insert(product).await
        } else {
            self.update(product).await
        }
    }

    #[tracing::instrument(name = "Delete product.", skip(self, product), fields(id = product.id))]
    async fn delete(&self, product: &models::Product) -> Result<(), StoreError> {
        sqlx::query::<sqlx::Postgres>("DELETE FROM products WHERE id = $1;")
            .bind(product.id)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|err| {
                tracing::error!("Failed to delete product: {:?}", err);
                StoreError::from(err)
            })
    }
}
