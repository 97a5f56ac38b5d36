pub mod health_checks;
pub mod product;

pub use health_checks::*;

use actix_web::{get, http::header, HttpResponse};

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, crate::services::LIST_LOCATION))
        .finish()
}
