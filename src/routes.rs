use actix_web::web;

use crate::api;

/// Registers every page and form route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(api::health::health_check))
        .route("/metrics", web::get().to(api::metrics::get_metrics))
        .route("/", web::get().to(api::pages::home))
        .service(
            web::resource("/login")
                .route(web::get().to(api::auth::login_page))
                .route(web::post().to(api::auth::login)),
        )
        .service(
            web::resource("/signup")
                .route(web::get().to(api::auth::signup_page))
                .route(web::post().to(api::auth::signup)),
        )
        .route("/logout", web::get().to(api::auth::logout))
        .route("/about", web::get().to(api::pages::about))
        .route("/about/{id}", web::get().to(api::pages::about_profile))
        .route("/profile/{id}", web::get().to(api::pages::profile))
        .route("/diary/{id}", web::get().to(api::diary::diary))
        .service(
            web::resource("/new/{id}")
                .route(web::get().to(api::diary::new_entry_page))
                .route(web::post().to(api::diary::create_entry)),
        )
        .service(
            web::resource("/edit/{id}/{entry_index}")
                .route(web::get().to(api::diary::edit_entry_page))
                .route(web::patch().to(api::diary::update_entry)),
        )
        .route(
            "/delete/{id}/{entry_index}",
            web::delete().to(api::diary::delete_entry),
        );
}
