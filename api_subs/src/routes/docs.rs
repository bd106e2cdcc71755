use actix_web::{HttpResponse, Responder};

const OPENAPI_SPEC: &str = include_str!("../../openapi.yaml");

/// Serves the bundled OpenAPI document.
pub async fn get_openapi() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/yaml")
        .body(OPENAPI_SPEC)
}
