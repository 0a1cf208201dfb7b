use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diary Service",
        version = "0.1.0",
        description = "Server-rendered personal diary.\n\n**Authentication:** a session cookie is issued by `/login` and `/signup`. Pages under `/profile`, `/about/{id}`, `/diary`, `/new`, `/edit` and `/delete` also require the path id to be the logged-in user.\n\n**Forms:** bodies are `application/x-www-form-urlencoded`. `PATCH` and `DELETE` can be sent as `POST` with `?_method=VERB`."
    ),
    paths(
        crate::api::auth::login,
        crate::api::auth::signup,
        crate::api::pages::profile,
        crate::api::diary::diary,
        crate::api::diary::create_entry,
        crate::api::diary::update_entry,
        crate::api::diary::delete_entry,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::services::auth_service::LoginForm,
            crate::services::auth_service::SignupForm,
            crate::services::diary_service::EntryForm,
            crate::services::diary_service::EditEntryForm,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Signup, login and logout. Success answers with a redirect and a session cookie."),
        (name = "Pages", description = "Profile and about pages of the logged-in user."),
        (name = "Diary", description = "Listing, creating, editing and deleting diary entries. Entries are addressed by position."),
        (name = "Health", description = "Health check and request counters."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_the_diary_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in ["/login", "/signup", "/diary/{id}", "/edit/{id}/{entry_index}", "/delete/{id}/{entry_index}"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(doc["paths"]["/edit/{id}/{entry_index}"]["patch"].is_object());
    }
}
