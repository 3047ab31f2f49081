// src/web/mw_auth.rs
use crate::{error::AppError, state::AppState, web::session::load_navigator};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Lets the request through only when the session has a logged-in user
/// whose account still exists in the store.
///
/// The session's `Navigator` is placed in the request extensions for the
/// handlers downstream.
pub async fn require_auth(
    State(state): State<AppState>, // Store, to check the account is still there
    session: Session,              // Current session
    mut request: Request,          // Mutable so the navigator can go into the extensions
    next: Next,
) -> Result<Response, AppError> {
    // Navigator written by the login handler (default = logged out)
    let navigator = load_navigator(&session).await?;

    let Some(user) = navigator.current_user() else {
        tracing::debug!("Auth MW: not authenticated, redirecting to /login");
        return Ok(Redirect::to("/login").into_response());
    };

    // Sessions outlive restarts; an account that is gone ends the session
    let known = state.store.read().await.users().iter().any(|u| u.id == user.id);
    if !known {
        tracing::warn!(
            "Auth MW: account '{}' ({}) no longer exists, ending session",
            user.username,
            user.id
        );
        session
            .flush()
            .await
            .map_err(|e| AppError::SessionError(format!("failed to end session: {}", e)))?;
        return Ok(Redirect::to("/login").into_response());
    }

    tracing::debug!("Auth MW: user '{}' authenticated for {}", user.username, request.uri());
    // Handlers pick it up with Extension<Navigator>
    request.extensions_mut().insert(navigator);
    Ok(next.run(request).await)
}
