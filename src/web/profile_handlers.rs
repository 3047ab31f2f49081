// src/web/profile_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::ProfileForm,
    services::navigation::Navigator,
    state::AppState,
    web::session::{store_navigator, with_message},
};
use axum::{
    extract::{Extension, Form, State},
    response::Redirect,
};
use tower_sessions::Session;

// POST /profile
//
// Only the display fields and the password are editable; role and the
// student link always come from the stored account.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
    Form(form): Form<ProfileForm>,
) -> AppResult<Redirect> {
    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Ok(Redirect::to(&with_message("/profile", "error", "Họ tên không được để trống.")));
    }

    let session_user = navigator.current_user().ok_or(AppError::Unauthorized)?;
    let mut store = state.store.write().await;
    // Start from the stored account; the session copy has no password
    let Some(mut updated) = store.users().iter().find(|u| u.id == session_user.id).cloned() else {
        tracing::warn!("Profile update for unknown account {}", session_user.id);
        return Ok(Redirect::to(&account_missing()));
    };

    updated.full_name = full_name.to_string();
    let avatar = form.avatar.trim();
    updated.avatar = (!avatar.is_empty()).then(|| avatar.to_string());
    if !form.new_password.is_empty() {
        updated.password = Some(form.new_password);
    }

    if !store.update_profile(updated.clone()) {
        return Ok(Redirect::to(&account_missing()));
    }
    drop(store);

    // Keep the header in sync with the stored account
    navigator.refresh_user(&updated);
    store_navigator(&session, &navigator).await?;

    Ok(Redirect::to(&with_message("/profile", "success", "Đã cập nhật hồ sơ.")))
}

fn account_missing() -> String {
    with_message("/profile", "error", "Tài khoản không còn tồn tại.")
}
