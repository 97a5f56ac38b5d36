//! Product CRUD flows, independent of the web framework.
//!
//! Every operation ends in an [`Outcome`]: either a page to render or a
//! redirect back to the list, optionally with a [`Flash`]. Image files are
//! kept in step with the records: the old file goes before a reference is
//! replaced and with the record on delete. Image deletion is best effort.

use crate::db::{ProductStore, StoreError};
use crate::forms::{FormErrors, ImageUpload, ProductForm};
use crate::helpers::{Flash, ImageStore};
use crate::models;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::Utc;
use std::sync::Arc;

pub const LIST_LOCATION: &str = "/products";

pub const IMAGE_REQUIRED: &str = "The image file is required";
pub const IMAGE_UPLOAD_FAILED: &str = "Error uploading image file";
pub const PRODUCT_CREATED: &str = "Product created successfully!";
pub const PRODUCT_UPDATED: &str = "Product updated successfully!";
pub const PRODUCT_DELETED: &str = "Product deleted successfully!";
pub const UPDATE_FAILED: &str = "Error updating product";
pub const DELETE_FAILED: &str = "Error deleting product";

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    List {
        products: Vec<models::Product>,
    },
    Create {
        form: ProductForm,
        errors: FormErrors,
    },
    Edit {
        product: models::Product,
        form: ProductForm,
        errors: FormErrors,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub location: &'static str,
    pub flash: Option<Flash>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(Page),
    Redirect(Redirect),
}

impl Outcome {
    pub fn to_list() -> Self {
        Outcome::Redirect(Redirect {
            location: LIST_LOCATION,
            flash: None,
        })
    }

    pub fn to_list_with(flash: Flash) -> Self {
        Outcome::Redirect(Redirect {
            location: LIST_LOCATION,
            flash: Some(flash),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("product store failed: {0}")]
    Store(#[from] StoreError),
}

impl ResponseError for ControllerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body("Internal error")
    }
}

pub struct ProductController {
    store: Arc<dyn ProductStore>,
    images: ImageStore,
}

impl ProductController {
    pub fn new(store: Arc<dyn ProductStore>, images: ImageStore) -> Self {
        Self { store, images }
    }

    #[tracing::instrument(name = "List products.", skip(self))]
    pub async fn list(&self) -> Result<Outcome, ControllerError> {
        let products = self.store.find_all().await?;
        Ok(Outcome::Render(Page::List { products }))
    }

    pub fn show_create_form(&self) -> Outcome {
        Outcome::Render(Page::Create {
            form: ProductForm::default(),
            errors: FormErrors::default(),
        })
    }

    #[tracing::instrument(name = "Create product.", skip(self, form, image))]
    pub async fn create(
        &self,
        form: ProductForm,
        image: Option<ImageUpload>,
    ) -> Result<Outcome, ControllerError> {
        let validated = form.validate_input();
        let (valid, image) = match (validated, image) {
            (Ok(valid), Some(image)) => (valid, image),
            (validated, image) => {
                let mut errors = validated.err().unwrap_or_default();
                if image.is_none() {
                    errors.add("image_file", IMAGE_REQUIRED);
                }
                tracing::debug!("Invalid data received {:?}", errors);
                return Ok(Outcome::Render(Page::Create { form, errors }));
            }
        };

        let image_file_name = match self.images.save(&image.bytes, &image.original_name).await {
            Ok(name) => name,
            Err(err) => {
                tracing::error!("Error saving image: {}", err);
                let mut errors = FormErrors::default();
                errors.add("image_file", IMAGE_UPLOAD_FAILED);
                return Ok(Outcome::Render(Page::Create { form, errors }));
            }
        };

        let product = valid.into_product(Utc::now(), Some(image_file_name.clone()));
        match self.store.save(product).await {
            Ok(product) => {
                tracing::info!("Created {}", product);
                Ok(Outcome::to_list_with(Flash::message(PRODUCT_CREATED)))
            }
            Err(err) => {
                // nothing references the new file
                self.delete_image(&image_file_name).await;
                Err(err.into())
            }
        }
    }

    #[tracing::instrument(name = "Show edit form.", skip(self))]
    pub async fn show_edit_form(&self, id: i32) -> Outcome {
        match self.store.find_by_id(id).await {
            Ok(Some(product)) => {
                let form = ProductForm::from(&product);
                Outcome::Render(Page::Edit {
                    product,
                    form,
                    errors: FormErrors::default(),
                })
            }
            Ok(None) => Outcome::to_list(),
            Err(err) => {
                tracing::error!("Failed to load product {}: {}", id, err);
                Outcome::to_list()
            }
        }
    }

    #[tracing::instrument(name = "Update product.", skip(self, form, image))]
    pub async fn update(&self, id: i32, form: ProductForm, image: Option<ImageUpload>) -> Outcome {
        self.try_update(id, form, image)
            .await
            .unwrap_or_else(|err| {
                tracing::error!("Failed to update product {}: {}", id, err);
                Outcome::to_list_with(Flash::error(UPDATE_FAILED))
            })
    }

    async fn try_update(
        &self,
        id: i32,
        form: ProductForm,
        image: Option<ImageUpload>,
    ) -> Result<Outcome, StoreError> {
        let Some(mut product) = self.store.find_by_id(id).await? else {
            return Ok(Outcome::to_list());
        };

        let valid = match form.validate_input() {
            Ok(valid) => valid,
            Err(errors) => {
                return Ok(Outcome::Render(Page::Edit {
                    product,
                    form,
                    errors,
                }))
            }
        };

        if let Some(image) = image {
            if let Some(old) = product.image_file_name.as_deref() {
                self.delete_image(old).await;
            }

            // on failure the product keeps its previous file name
            match self.images.save(&image.bytes, &image.original_name).await {
                Ok(name) => product.image_file_name = Some(name),
                Err(err) => tracing::error!("Error saving image: {}", err),
            }
        }

        valid.apply_to(&mut product);
        let product = self.store.save(product).await?;
        tracing::info!("Updated {}", product);

        Ok(Outcome::to_list_with(Flash::message(PRODUCT_UPDATED)))
    }

    #[tracing::instrument(name = "Delete product.", skip(self))]
    pub async fn delete(&self, id: i32) -> Outcome {
        self.try_delete(id).await.unwrap_or_else(|err| {
            tracing::error!("Failed to delete product {}: {}", id, err);
            Outcome::to_list_with(Flash::error(DELETE_FAILED))
        })
    }

    async fn try_delete(&self, id: i32) -> Result<Outcome, StoreError> {
        let Some(product) = self.store.find_by_id(id).await? else {
            return Ok(Outcome::to_list());
        };

        if let Some(image) = product.image_file_name.as_deref() {
            self.delete_image(image).await;
        }

        self.store.delete(&product).await?;
        tracing::info!("Deleted product {}", id);

        Ok(Outcome::to_list_with(Flash::message(PRODUCT_DELETED)))
    }

    async fn delete_image(&self, file_name: &str) {
        if let Err(err) = self.images.delete(file_name).await {
            tracing::error!("Error deleting image: {}", err);
        }
    }
}
