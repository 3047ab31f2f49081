// src/web/class_handlers.rs
use crate::{
    error::AppResult, models::class::ClassForm, state::AppState, web::session::with_message,
};
use axum::{
    extract::{Form, State},
    response::Redirect,
};
use uuid::Uuid;

// POST /classes/create
pub async fn handle_create_class(
    State(state): State<AppState>,
    Form(form): Form<ClassForm>,
) -> AppResult<Redirect> {
    // Name and grade are required
    match form.into_class(Uuid::new_v4().to_string()) {
        Ok(class) => {
            let message = format!("Đã thêm lớp '{}'.", class.name);
            state.store.write().await.add_class(class);
            Ok(Redirect::to(&with_message("/classes", "success", &message)))
        }
        Err(message) => {
            tracing::warn!("Class creation rejected: {}", message);
            Ok(Redirect::to(&with_message("/classes", "error", &message)))
        }
    }
}
