use crate::helpers::Flash;
use crate::routes::product::respond;
use crate::services::ProductController;
use crate::views::Views;
use actix_web::{get, web, HttpRequest, HttpResponse, Result};

#[tracing::instrument(name = "Products list page.", skip(req, controller, views))]
#[get("")]
pub async fn list_handler(
    req: HttpRequest,
    controller: web::Data<ProductController>,
    views: web::Data<Views>,
) -> Result<HttpResponse> {
    let flash = Flash::from_request(&req);
    let outcome = controller.list().await?;
    let mut response = respond(&views, outcome, flash.as_ref())?;

    // shown once
    if flash.is_some() {
        for cookie in Flash::removal_cookies() {
            response.add_cookie(&cookie)?;
        }
    }

    Ok(response)
}
