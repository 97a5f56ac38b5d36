use crate::forms::ProductUpload;
use crate::routes::product::respond;
use crate::services::ProductController;
use crate::views::Views;
use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse, Result};

#[tracing::instrument(name = "Create product page.", skip(controller, views))]
#[get("/create")]
pub async fn create_page_handler(
    controller: web::Data<ProductController>,
    views: web::Data<Views>,
) -> Result<HttpResponse> {
    respond(&views, controller.show_create_form(), None)
}

#[tracing::instrument(name = "Create product.", skip(upload, controller, views))]
#[post("/create")]
pub async fn create_handler(
    MultipartForm(upload): MultipartForm<ProductUpload>,
    controller: web::Data<ProductController>,
    views: web::Data<Views>,
) -> Result<HttpResponse> {
    let (form, image) = upload.into_parts();
    let outcome = controller.create(form, image).await?;
    respond(&views, outcome, None)
}
