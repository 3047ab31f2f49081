// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template rendering error: {0}")]
    Template(#[from] askama::Error),

    #[error("Session error: {0}")]
    SessionError(String),

    // Authenticated, but the view is not part of the user's navigation.
    #[error("View '{0}' is not available for this role")]
    ViewNotPermitted(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, user_message) = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) | AppError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Lỗi truy cập dữ liệu.")
            }
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Lỗi cấu hình."),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Không thể hiển thị trang."),
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Lỗi phiên đăng nhập.")
            }
            AppError::ViewNotPermitted(_) | AppError::Unauthorized => {
                (StatusCode::FORBIDDEN, "Bạn không có quyền truy cập trang này.")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Không tìm thấy dữ liệu."),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Html(format!(r#"
            <!DOCTYPE html><html lang="vi"><head><meta charset="utf-8"><title>Lỗi</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Lỗi {status_code}</h1><p>{message}</p><a href="/">Quay lại</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
