use actix_web::{web, HttpResponse};

use crate::database::UserRepository;
use crate::middleware::{CurrentUser, Owner};
use crate::services::diary_service;
use crate::utils::AppError;
use crate::views;

const FETCH_USER: &str = "Error fetching user from database";

pub async fn home(user: CurrentUser) -> HttpResponse {
    views::home(&user)
}

pub async fn about(user: CurrentUser) -> HttpResponse {
    views::about(&user)
}

#[utoipa::path(
    get,
    path = "/profile/{id}",
    tag = "Pages",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile page", body = String, content_type = "text/html"),
        (status = 302, description = "Not logged in, redirect to /login"),
        (status = 403, description = "Id belongs to another user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn profile(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let owner = diary_service::load_user(users.get_ref(), &id, FETCH_USER).await?;
    Ok(views::profile(&owner.name, &owner.id_hex(), &user))
}

pub async fn about_profile(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let owner = diary_service::load_user(users.get_ref(), &id, FETCH_USER).await?;
    Ok(views::about_profile(&owner.name, &user))
}
