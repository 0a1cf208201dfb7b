//! Session cookie plumbing and the two request guards.
//!
//! Guards run in a fixed order on every protected route: no session
//! redirects to `/login`, then another user's `{id}` is `403`. `Owner` does
//! both and must be the first handler argument, so it fails before any path
//! or form extractor can.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_session::{storage::CookieSessionStore, Session, SessionExt, SessionMiddleware};
use actix_web::{cookie::Key, dev::Payload, FromRequest, HttpRequest};

use crate::config::AppConfig;
use crate::models::{SessionUser, User};
use crate::utils::AppError;

const USER_KEY: &str = "user";

/// `key` must be shared by every worker so any of them can read the cookie.
pub fn session_middleware(config: &AppConfig, key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(config.cookie_name.clone())
        .cookie_secure(config.cookie_secure)
        .cookie_http_only(true)
        .build()
}

/// Stores a snapshot of `user` in the session (never the password).
pub fn log_in(session: &Session, user: &User) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_KEY, SessionUser::from(user))
        .map_err(|e| AppError::Session(format!("user {}: {}", user.id, e)))
}

pub fn log_out(session: &Session) {
    session.purge();
}

fn session_user(session: &Session) -> Option<SessionUser> {
    match session.get::<SessionUser>(USER_KEY) {
        Ok(user) => user,
        Err(e) => {
            log::warn!("⚠️ Unreadable session user: {}", e);
            None
        }
    }
}

/// The logged-in user, required by every protected handler.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl Deref for CurrentUser {
    type Target = SessionUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = session_user(&req.get_session())
            .map(CurrentUser)
            .ok_or(AppError::LoginRequired);
        ready(user)
    }
}

/// The logged-in user, who must also own the `{id}` segment of the route.
#[derive(Debug, Clone)]
pub struct Owner(pub SessionUser);

impl Deref for Owner {
    type Target = SessionUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Owner {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let owner = session_user(&req.get_session())
            .ok_or(AppError::LoginRequired)
            .and_then(|user| {
                require_owner(&user, req.match_info().get("id").unwrap_or_default())?;
                Ok(Owner(user))
            });
        ready(owner)
    }
}

/// Ownership check: the path id must equal the session user's id.
pub fn require_owner(user: &SessionUser, id: &str) -> Result<(), AppError> {
    if user.id == id {
        Ok(())
    } else {
        log::warn!("⛔ User {} tried to access resources of {}", user.id, id);
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};
    use actix_web::{web, App, HttpResponse};

    fn owner() -> SessionUser {
        SessionUser {
            id: "65f0c0ffee0000000000beef".to_string(),
            name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
        }
    }

    #[test]
    fn owner_matches_own_id_only() {
        assert!(require_owner(&owner(), "65f0c0ffee0000000000beef").is_ok());
        assert!(matches!(
            require_owner(&owner(), "65f0c0ffee0000000000dead"),
            Err(AppError::Forbidden)
        ));
    }

    #[actix_web::test]
    async fn extractor_redirects_without_session_and_reads_it_back() {
        let app = init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name("session".to_owned())
                        .cookie_secure(false)
                        .build(),
                )
                .route(
                    "/set",
                    web::get().to(|session: Session| async move {
                        let user = User::new(
                            "Owner".to_string(),
                            "owner@example.com".to_string(),
                            "pw".to_string(),
                        );
                        log_in(&session, &user)?;
                        Ok::<_, AppError>(HttpResponse::Ok().body(user.id_hex()))
                    }),
                )
                .route(
                    "/me",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.email.clone())
                    }),
                ),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get("Location").unwrap(), "/login");

        let res = call_service(&app, TestRequest::get().uri("/set").to_request()).await;
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = call_service(
            &app,
            TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_body(res).await, "owner@example.com");
    }

    #[actix_web::test]
    async fn owner_is_checked_before_the_path_is_parsed() {
        let app = init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name("session".to_owned())
                        .cookie_secure(false)
                        .build(),
                )
                .route(
                    "/set",
                    web::get().to(|session: Session| async move {
                        let user = User::new(
                            "Owner".to_string(),
                            "owner@example.com".to_string(),
                            "pw".to_string(),
                        );
                        log_in(&session, &user)?;
                        Ok::<_, AppError>(HttpResponse::Ok().body(user.id_hex()))
                    }),
                )
                .route(
                    "/items/{id}/{index}",
                    web::get().to(|owner: Owner, path: web::Path<(String, usize)>| async move {
                        HttpResponse::Ok().body(format!("{} {}", owner.name, path.1))
                    }),
                ),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri("/items/x/abc").to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);

        let res = call_service(&app, TestRequest::get().uri("/set").to_request()).await;
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie set")
            .into_owned();
        let id = String::from_utf8(read_body(res).await.to_vec()).unwrap();

        let cases = [
            ("/items/65f0c0ffee0000000000dead/abc".to_string(), StatusCode::FORBIDDEN),
            (format!("/items/{id}/abc"), StatusCode::NOT_FOUND),
            (format!("/items/{id}/2"), StatusCode::OK),
        ];
        for (uri, status) in cases {
            let req = TestRequest::get().uri(&uri).cookie(cookie.clone()).to_request();
            assert_eq!(call_service(&app, req).await.status(), status, "{uri}");
        }
    }
}
