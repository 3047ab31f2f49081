// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::LoginForm,
    services::{auth_service, navigation::Navigator},
    state::AppState,
    templates::{render, LoginPage},
    web::session::{home_path, load_navigator, store_navigator},
};
use axum::{
    extract::{Extension, Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /
pub async fn root(session: Session) -> AppResult<Redirect> {
    let navigator = load_navigator(&session).await?;
    Ok(Redirect::to(&home_path(&navigator)))
}

// GET /login
pub async fn show_login_form(session: Session) -> AppResult<Response> {
    let navigator = load_navigator(&session).await?;
    if navigator.current_user().is_some() {
        tracing::debug!("GET /login: already logged in, redirecting");
        return Ok(Redirect::to(&home_path(&navigator)).into_response());
    }
    Ok(render(&LoginPage { error: None, username: String::new() })?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for '{}'", form.username);

    let user = {
        let store = state.store.read().await;
        auth_service::authenticate(store.users(), &form.username, &form.password).cloned()
    };

    let Some(user) = user else {
        tracing::warn!("Login failed for '{}'", form.username);
        let page = LoginPage {
            error: Some("Tên đăng nhập hoặc mật khẩu không đúng.".to_string()),
            username: form.username,
        };
        return Ok(render(&page)?.into_response());
    };

    // Login resets the view to the role's landing page
    let mut navigator = load_navigator(&session).await?;
    navigator.set_current_user(Some(user));

    // New session id after login
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("failed to cycle session id: {}", e)))?;
    store_navigator(&session, &navigator).await?;

    let target = home_path(&navigator);
    tracing::info!("✅ Login succeeded for '{}', landing on {}", form.username, target);
    Ok(Redirect::to(&target).into_response())
}

// GET /logout: flushes the store, then ends the session.
pub async fn handle_logout(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
) -> AppResult<Redirect> {
    // Flush before the session goes away
    state.save().await?;

    let username = navigator.current_user().map(|u| u.username.clone());
    navigator.set_current_user(None);
    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("failed to delete session: {}", e)))?;

    if let Some(name) = username {
        tracing::info!("🚪 User '{}' logged out.", name);
    }
    Ok(Redirect::to("/login"))
}
