use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_derive::{Deserialize, Serialize};

/// A catalog entry. `id` is 0 until the store assigns one.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
    // file name inside the image store, not a path
    pub image_file_name: Option<String>,
}

impl Product {
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "product #{} {} ({}) price: {} image: {:?}",
            self.id, self.name, self.brand, self.price, self.image_file_name
        )
    }
}
