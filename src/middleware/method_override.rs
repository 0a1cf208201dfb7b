use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error,
};
use futures::future::LocalBoxFuture;
use serde::Deserialize;
use std::future::{ready, Ready};

pub const OVERRIDE_HEADER: &str = "x-http-method-override";

/// Lets HTML forms reach PATCH/PUT/DELETE routes.
///
/// A `POST` carrying `?_method=VERB` or an `X-HTTP-Method-Override` header is
/// routed as `VERB`. The header wins when both are present. Must wrap the app
/// so it runs before routing.
pub struct MethodOverride;

#[derive(Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

fn parse_override(raw: &str) -> Option<Method> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "PATCH" => Some(Method::PATCH),
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

fn requested_override(req: &ServiceRequest) -> Option<Method> {
    let from_header = req
        .headers()
        .get(OVERRIDE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_override);

    from_header.or_else(|| {
        web::Query::<OverrideQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().method)
            .and_then(|m| parse_override(&m))
    })
}

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if *req.method() == Method::POST {
            if let Some(method) = requested_override(&req) {
                log::debug!("↪️  {} overridden to {}", req.path(), method);
                req.head_mut().method = method;
            }
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};
    use actix_web::{http::StatusCode, App, HttpResponse};
    use rstest::rstest;

    #[rstest]
    #[case("patch", Some(Method::PATCH))]
    #[case(" DELETE ", Some(Method::DELETE))]
    #[case("Put", Some(Method::PUT))]
    #[case("GET", None)]
    #[case("TRACE", None)]
    fn only_body_verbs_can_be_requested(#[case] raw: &str, #[case] expected: Option<Method>) {
        assert_eq!(parse_override(raw), expected);
    }

    async fn verb(method: Method) -> HttpResponse {
        HttpResponse::Ok().body(method.to_string())
    }

    #[rstest]
    #[case(TestRequest::post().uri("/thing?_method=PATCH"), "PATCH")]
    #[case(TestRequest::post().uri("/thing?_method=delete"), "DELETE")]
    #[case(
        TestRequest::post().uri("/thing?_method=PATCH").insert_header((OVERRIDE_HEADER, "DELETE")),
        "DELETE"
    )]
    #[case(TestRequest::post().uri("/thing"), "POST")]
    #[case(TestRequest::get().uri("/thing?_method=DELETE"), "GET")]
    #[actix_web::test]
    async fn rewrites_post_before_routing(#[case] req: TestRequest, #[case] seen: &str) {
        let app = init_service(
            App::new()
                .wrap(MethodOverride)
                .route("/thing", web::route().to(verb)),
        )
        .await;

        let res = call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_body(res).await, seen);
    }
}
