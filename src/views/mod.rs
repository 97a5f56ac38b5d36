use crate::helpers::Flash;
use crate::services::Page;
use anyhow::{Context, Result};
use tera::{Context as TeraContext, Tera};

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("../../templates/products/index.html");
const FORM_FIELDS_TEMPLATE: &str = include_str!("../../templates/products/form_fields.html");
const CREATE_TEMPLATE: &str = include_str!("../../templates/products/create.html");
const EDIT_TEMPLATE: &str = include_str!("../../templates/products/edit.html");

/// HTML pages of the catalog, compiled once at startup.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // parents and children must be registered together
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("products/form_fields.html", FORM_FIELDS_TEMPLATE),
            ("products/index.html", INDEX_TEMPLATE),
            ("products/create.html", CREATE_TEMPLATE),
            ("products/edit.html", EDIT_TEMPLATE),
        ])
        .context("Failed to add product templates")?;

        Ok(Self { tera })
    }

    pub fn render(&self, page: &Page, flash: Option<&Flash>) -> Result<String> {
        let mut context = TeraContext::new();
        context.insert("flash", &flash);

        let template = match page {
            Page::List { products } => {
                context.insert("products", products);
                "products/index.html"
            }
            Page::Create { form, errors } => {
                context.insert("form", form);
                context.insert("errors", errors);
                "products/create.html"
            }
            Page::Edit {
                product,
                form,
                errors,
            } => {
                context.insert("product", product);
                context.insert("form", form);
                context.insert("errors", errors);
                "products/edit.html"
            }
        };

        self.tera
            .render(template, &context)
            .with_context(|| format!("Failed to render {}", template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FormErrors, ProductForm};
    use crate::models::Product;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn product() -> Product {
        Product {
            id: 5,
            name: "Widget <b>".to_string(),
            brand: "Acme".to_string(),
            category: "Tools".to_string(),
            price: Decimal::from_str("9.99").unwrap(),
            description: "Useful".to_string(),
            image_file_name: Some("abc.png".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_page_shows_products_and_flash() {
        let views = Views::new().unwrap();
        let page = Page::List {
            products: vec![product()],
        };

        let html = views
            .render(&page, Some(&Flash::message("Product created successfully!")))
            .unwrap();

        assert!(html.contains("Widget &lt;b&gt;"));
        assert!(html.contains("9.99"));
        assert!(html.contains("/images/abc.png"));
        assert!(html.contains("/products/edit?id=5"));
        assert!(html.contains("/products/delete?id=5"));
        assert!(html.contains("Product created successfully!"));
    }

    #[test]
    fn test_list_page_without_products() {
        let views = Views::new().unwrap();
        let html = views.render(&Page::List { products: vec![] }, None).unwrap();
        assert!(html.contains("No products yet"));
    }

    #[test]
    fn test_create_page_shows_errors() {
        let views = Views::new().unwrap();
        let mut errors = FormErrors::default();
        errors.add("image_file", "The image file is required");
        let page = Page::Create {
            form: ProductForm {
                name: "Widget".to_string(),
                ..Default::default()
            },
            errors,
        };

        let html = views.render(&page, None).unwrap();

        assert!(html.contains("The image file is required"));
        assert!(html.contains("value=\"Widget\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
    }

    #[test]
    fn test_edit_page_shows_current_image() {
        let views = Views::new().unwrap();
        let product = product();
        let page = Page::Edit {
            form: ProductForm::from(&product),
            product,
            errors: FormErrors::default(),
        };

        let html = views.render(&page, None).unwrap();

        assert!(html.contains("action=\"/products/edit?id=5\""));
        assert!(html.contains("/images/abc.png"));
    }
}
