use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::api::metrics;

/// Failure reported by a [`UserRepository`](crate::database::UserRepository).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Every way a request can end without the happy-path response.
///
/// The `Display` text is the plain-text body sent to the client, so it never
/// carries store details.
#[derive(Debug, Error)]
pub enum AppError {
    /// No session user; answered with a redirect, not an error page.
    #[error("Login required")]
    LoginRequired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Entry not found")]
    EntryNotFound,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Entry has changed, reload and try again")]
    StaleEntry,

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Error saving session")]
    Session(String),
}

impl AppError {
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| {
            log::error!("❌ {}: {}", context, source);
            Self::Store { context, source }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::LoginRequired => StatusCode::FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::EntryNotFound => StatusCode::NOT_FOUND,
            AppError::EmailTaken => StatusCode::BAD_REQUEST,
            AppError::StaleEntry => StatusCode::CONFLICT,
            AppError::Store { .. } | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::LoginRequired = self {
            return HttpResponse::Found()
                .append_header(("Location", "/login"))
                .finish();
        }

        if let AppError::Session(detail) = self {
            log::error!("❌ Session write failed: {}", detail);
        }

        metrics::increment_error_count();
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
