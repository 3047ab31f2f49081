// src/web/session.rs
use crate::{
    error::{AppError, AppResult},
    services::navigation::{Navigator, View},
};
use tower_sessions::Session;

/// Session key holding the serialized `Navigator`.
pub const NAVIGATOR_KEY: &str = "navigator";

pub async fn load_navigator(session: &Session) -> AppResult<Navigator> {
    session
        .get::<Navigator>(NAVIGATOR_KEY)
        .await
        .map(Option::unwrap_or_default)
        .map_err(|e| AppError::SessionError(format!("failed to read navigator: {}", e)))
}

pub async fn store_navigator(session: &Session, navigator: &Navigator) -> AppResult<()> {
    session
        .insert(NAVIGATOR_KEY, navigator)
        .await
        .map_err(|e| AppError::SessionError(format!("failed to store navigator: {}", e)))
}

/// Switches the session to `view`, refusing views hidden from the user's role.
pub async fn enter_view(session: &Session, navigator: &mut Navigator, view: View) -> AppResult<()> {
    navigator.select(view)?;
    store_navigator(session, navigator).await
}

/// Where a redirect should land for this session.
pub fn home_path(navigator: &Navigator) -> String {
    navigator.active_view().map_or_else(|| "/login".to_string(), View::path)
}

/// `path?key=message`, with the message url-encoded.
pub fn with_message(path: &str, key: &str, message: &str) -> String {
    format!("{}?{}={}", path, key, urlencoding::encode(message))
}
