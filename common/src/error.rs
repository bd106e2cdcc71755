use actix_web::{HttpResponse, http::StatusCode};
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // === APPLICATION ERRORS ===
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let to_error_json = |err_msg: &str| serde_json::json!({ "error": err_msg });

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_error_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::NotFound(_) => HttpResponse::NotFound().json(to_error_json(&self.to_string())),
            AppError::BadRequest(_) => {
                HttpResponse::BadRequest().json(to_error_json(&self.to_string()))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}
