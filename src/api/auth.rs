use actix_session::Session;
use actix_web::{web, HttpResponse};

use super::redirect;
use crate::database::UserRepository;
use crate::middleware::session::{log_in, log_out};
use crate::middleware::CurrentUser;
use crate::services::auth_service::{self, LoginForm, SignupForm};
use crate::utils::AppError;
use crate::views;

pub async fn login_page(user: Option<CurrentUser>) -> HttpResponse {
    views::login(user.as_deref())
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in, redirect to the profile page"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    users: web::Data<dyn UserRepository>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /login - email: {}", form.email);

    let user = auth_service::login(users.get_ref(), &form)
        .await
        .inspect_err(|e| log::warn!("❌ Login failed: {} - {}", form.email, e))?;

    log_in(&session, &user)?;
    log::info!("✅ Login successful: {}", user.email);
    Ok(redirect(format!("/profile/{}", user.id_hex())))
}

pub async fn signup_page(user: Option<CurrentUser>) -> HttpResponse {
    views::signup(user.as_deref())
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created, redirect to the profile page"),
        (status = 400, description = "Email already exists"),
        (status = 500, description = "Error saving user to database")
    )
)]
pub async fn signup(
    users: web::Data<dyn UserRepository>,
    session: Session,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let email = form.email.clone();
    log::info!("📝 POST /signup - name: {}, email: {}", form.name, email);

    let user = auth_service::signup(users.get_ref(), form)
        .await
        .inspect_err(|e| log::warn!("❌ Signup failed: {} - {}", email, e))?;

    log_in(&session, &user)?;
    Ok(redirect(format!("/profile/{}", user.id_hex())))
}

pub async fn logout(session: Session) -> HttpResponse {
    log::info!("👋 GET /logout");
    log_out(&session);
    redirect("/login")
}
