use actix_web::{web, HttpResponse};

use super::redirect;
use crate::database::UserRepository;
use crate::middleware::Owner;
use crate::services::diary_service::{self, EditEntryForm, EntryForm};
use crate::utils::AppError;
use crate::views;

const FETCH_USER: &str = "Error fetching user from database";

#[utoipa::path(
    get,
    path = "/diary/{id}",
    tag = "Diary",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "All entries in log order", body = String, content_type = "text/html"),
        (status = 302, description = "Not logged in, redirect to /login"),
        (status = 403, description = "Id belongs to another user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn diary(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let owner = diary_service::load_user(users.get_ref(), &id, FETCH_USER).await?;
    Ok(views::diary(&owner.name, &owner.log, &user))
}

pub async fn new_entry_page(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let owner = diary_service::load_user(users.get_ref(), &id, FETCH_USER).await?;
    Ok(views::new_entry(&owner.name, &user))
}

#[utoipa::path(
    post,
    path = "/new/{id}",
    tag = "Diary",
    params(("id" = String, Path, description = "User id")),
    request_body(content = EntryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Entry appended, redirect to the diary"),
        (status = 403, description = "Id belongs to another user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_entry(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<String>,
    form: web::Form<EntryForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("📝 POST /new/{} - date: {}", id, form.date);

    let index = diary_service::add_entry(users.get_ref(), &id, form.into_inner()).await?;
    log::info!("✅ Entry {} added for user {}", index, id);
    Ok(redirect(format!("/diary/{}", id)))
}

pub async fn edit_entry_page(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<(String, usize)>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();

    let entry = diary_service::get_entry(users.get_ref(), &id, index).await?;
    Ok(views::edit_entry(&entry, index, &id, &user))
}

#[utoipa::path(
    patch,
    path = "/edit/{id}/{entry_index}",
    tag = "Diary",
    params(
        ("id" = String, Path, description = "User id"),
        ("entry_index" = usize, Path, description = "Position of the entry in the log")
    ),
    request_body(content = EditEntryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Entry replaced, redirect to the diary"),
        (status = 403, description = "Id belongs to another user"),
        (status = 404, description = "User or entry not found"),
        (status = 409, description = "Entry at this position is no longer the one being edited")
    )
)]
pub async fn update_entry(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<(String, usize)>,
    form: web::Form<EditEntryForm>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    log::info!("🔧 PATCH /edit/{}/{}", id, index);

    diary_service::update_entry(users.get_ref(), &id, index, form.into_inner()).await?;
    Ok(redirect(format!("/diary/{}", id)))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}/{entry_index}",
    tag = "Diary",
    params(
        ("id" = String, Path, description = "User id"),
        ("entry_index" = usize, Path, description = "Position of the entry in the log")
    ),
    responses(
        (status = 302, description = "Entry removed, redirect to the diary"),
        (status = 403, description = "Id belongs to another user"),
        (status = 404, description = "User or entry not found")
    )
)]
pub async fn delete_entry(
    user: Owner,
    users: web::Data<dyn UserRepository>,
    path: web::Path<(String, usize)>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    log::info!("🗑️  DELETE /delete/{}/{}", id, index);

    let removed = diary_service::delete_entry(users.get_ref(), &id, index).await?;
    log::info!("✅ Entry {} ({}) removed for user {}", index, removed.date, id);
    Ok(redirect(format!("/diary/{}", id)))
}
