// src/web/storage_handlers.rs
use crate::{
    error::AppResult,
    services::navigation::Navigator,
    state::AppState,
    web::session::{home_path, with_message},
};
use axum::{
    extract::{Extension, State},
    response::Redirect,
};

// POST /save
//
// The write is awaited before responding; the indicator only drives the
// "saving" button state for the next page loads.
pub async fn handle_save(
    State(state): State<AppState>,
    Extension(navigator): Extension<Navigator>,
) -> AppResult<Redirect> {
    // Full snapshot, awaited
    state.save().await?;
    // Cosmetic only; restarts any running timer
    state.save_indicator.start();
    Ok(Redirect::to(&with_message(&home_path(&navigator), "success", "Đã lưu dữ liệu.")))
}
