use crate::routes::product::{respond, IdQuery};
use crate::services::ProductController;
use crate::views::Views;
use actix_web::{get, web, HttpResponse, Result};

#[tracing::instrument(name = "Delete product.", skip(controller, views))]
#[get("/delete")]
pub async fn delete_handler(
    query: web::Query<IdQuery>,
    controller: web::Data<ProductController>,
    views: web::Data<Views>,
) -> Result<HttpResponse> {
    let outcome = controller.delete(query.id).await;
    respond(&views, outcome, None)
}
