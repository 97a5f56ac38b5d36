use crate::forms::FormErrors;
use crate::models;
use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::str::FromStr;

/// Product fields as typed into the create/edit form.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(min_length = 1, message = "The name is required")]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(max_length = 255)]
    pub brand: String,
    #[validate(max_length = 255)]
    pub category: String,
    // fits NUMERIC(12, 2): up to ten integer digits, at most two decimals
    #[validate(pattern = r"^\d{1,10}(\.\d{1,2})?$", message = "The price must be a non-negative amount")]
    pub price: String,
    #[validate(max_length = 2000)]
    pub description: String,
}

/// Form input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
}

/// Raw uploaded image: bytes plus the name the client gave the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub original_name: String,
}

/// Multipart body posted by the create and edit pages.
#[derive(MultipartForm)]
pub struct ProductUpload {
    pub name: Option<Text<String>>,
    pub brand: Option<Text<String>>,
    pub category: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub image_file: Option<Bytes>,
}

impl ProductForm {
    pub fn validate_input(&self) -> Result<ValidProduct, FormErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::default(),
            Err(err) => FormErrors::from_validation(&err),
        };

        let price = match Decimal::from_str(self.price.trim()) {
            Ok(price) => Some(price),
            Err(_) => {
                if !errors.contains("price") {
                    errors.add("price", "The price must be a non-negative amount");
                }
                None
            }
        };

        match price {
            Some(price) if errors.is_empty() => Ok(ValidProduct {
                name: self.name.clone(),
                brand: self.brand.clone(),
                category: self.category.clone(),
                price,
                description: self.description.clone(),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&models::Product> for ProductForm {
    fn from(product: &models::Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
        }
    }
}

impl ValidProduct {
    pub fn into_product(
        self,
        created_at: DateTime<Utc>,
        image_file_name: Option<String>,
    ) -> models::Product {
        models::Product {
            id: 0,
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            description: self.description,
            created_at,
            image_file_name,
        }
    }

    /// Overwrites the editable fields; id, created_at and the image stay.
    pub fn apply_to(self, product: &mut models::Product) {
        product.name = self.name;
        product.brand = self.brand;
        product.category = self.category;
        product.price = self.price;
        product.description = self.description;
    }
}

impl ImageUpload {
    /// `None` for an empty upload, which is what an untouched file input sends.
    pub fn new(bytes: Vec<u8>, original_name: impl Into<String>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }

        Some(ImageUpload {
            bytes,
            original_name: original_name.into(),
        })
    }
}

fn text(field: Option<Text<String>>) -> String {
    field
        .map(|value| value.into_inner().trim().to_string())
        .unwrap_or_default()
}

impl ProductUpload {
    pub fn into_parts(self) -> (ProductForm, Option<ImageUpload>) {
        let image = self.image_file.and_then(|file| {
            ImageUpload::new(file.data.to_vec(), file.file_name.unwrap_or_default())
        });

        let form = ProductForm {
            name: text(self.name),
            brand: text(self.brand),
            category: text(self.category),
            price: text(self.price),
            description: text(self.description),
        };

        (form, image)
    }
}
