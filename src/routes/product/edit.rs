use crate::forms::ProductUpload;
use crate::routes::product::{respond, IdQuery};
use crate::services::ProductController;
use crate::views::Views;
use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse, Result};

#[tracing::instrument(name = "Edit product page.", skip(controller, views))]
#[get("/edit")]
pub async fn edit_page_handler(
    query: web::Query<IdQuery>,
    controller: web::Data<ProductController>,
    views: web::Data<Views>,
) -> Result<HttpResponse> {
    let outcome = controller.show_edit_form(query.id).await;
    respond(&views, outcome, None)
}

#[tracing::instrument(name = "Update product.", skip(upload, controller, views))]
#[post("/edit")]
pub async fn edit_handler(
    query: web::Query<IdQuery>,
    MultipartForm(upload): MultipartForm<ProductUpload>,
    controller: web::Data<ProductController>,
    views: web::Data<Views>,
) -> Result<HttpResponse> {
    let (form, image) = upload.into_parts();
    let outcome = controller.update(query.id, form, image).await;
    respond(&views, outcome, None)
}
