use actix_web::{
    error,
    web::{self},
};
use common::error::AppError;

pub mod routes {
    pub mod docs;
    pub mod sub;
}

mod services {
    pub(crate) mod sub;
}

pub mod dtos {
    pub mod sub;
}

/// Routes for `/subscriptions`. `/summary` is registered ahead of `/{id}`.
pub fn mount_subscriptions() -> actix_web::Scope {
    web::scope("/subscriptions")
        .app_data(json_config())
        .app_data(query_config())
        .service(routes::sub::get_summary)
        .service(routes::sub::get_subscriptions)
        .service(routes::sub::post_subscription)
        .service(routes::sub::get_subscription)
        .service(routes::sub::put_subscription)
        .service(routes::sub::delete_subscription)
}

pub fn mount_docs() -> actix_web::Resource {
    web::resource("/swagger").route(web::get().to(routes::docs::get_openapi))
}

/// Malformed JSON bodies become `AppError::BadRequest`, so they share the
/// `{"error": ...}` shape of every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| error::Error::from(AppError::BadRequest(err.to_string())))
}

/// Query strings that cannot be decoded become `AppError::BadRequest` rather
/// than actix's plain-text 400.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| error::Error::from(AppError::BadRequest(err.to_string())))
}
