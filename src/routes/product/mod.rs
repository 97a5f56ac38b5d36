mod create;
mod delete;
mod edit;
mod list;

pub use create::*;
pub use delete::*;
pub use edit::*;
pub use list::*;

use crate::helpers::Flash;
use crate::services::Outcome;
use crate::views::Views;
use actix_web::{error, http::header, http::header::ContentType, HttpResponse, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

/// Turns a controller outcome into a page or a 303 back to the list.
pub(crate) fn respond(views: &Views, outcome: Outcome, flash: Option<&Flash>) -> Result<HttpResponse> {
    match outcome {
        Outcome::Render(page) => {
            let html = views.render(&page, flash).map_err(|err| {
                tracing::error!("Failed to render page: {:?}", err);
                error::ErrorInternalServerError("Failed to render page")
            })?;

            Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
        }
        Outcome::Redirect(redirect) => {
            let mut response = HttpResponse::SeeOther();
            response.insert_header((header::LOCATION, redirect.location));
            if let Some(flash) = redirect.flash {
                response.cookie(flash.to_cookie());
            }

            Ok(response.finish())
        }
    }
}
