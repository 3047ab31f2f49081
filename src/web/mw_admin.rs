// src/web/mw_admin.rs
use crate::{error::AppError, services::navigation::Navigator};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};

/// Rejects non-admin users. Must run after `require_auth`.
pub async fn require_admin(
    Extension(navigator): Extension<Navigator>, // Put there by require_auth
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match navigator.current_user() {
        // Admin: on to the handler
        Some(user) if user.is_admin() => Ok(next.run(request).await),
        // Logged in, but not an admin
        Some(user) => {
            tracing::warn!("Admin MW: access denied for '{}' ({}) to {}", user.username, user.role, request.uri());
            Err(AppError::Unauthorized)
        }
        // Only reachable if the layer order is wrong
        None => Err(AppError::Unauthorized),
    }
}
