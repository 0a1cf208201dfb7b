pub mod auth;
pub mod diary;
pub mod health;
pub mod metrics;
pub mod pages;
pub mod swagger;

use actix_web::HttpResponse;

pub(crate) fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .append_header(("Location", location.into()))
        .finish()
}
