// src/web/student_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::student::StudentForm,
    services::{
        navigation::{Navigator, View},
        search,
    },
    state::AppState,
    templates::{
        class_options, gender_options, render, Chrome, Feedback, StudentEditPage, StudentRow,
        StudentsPage,
    },
    web::session::{enter_view, with_message},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

// GET /students?q=<term>
pub async fn show_students(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
    Query(params): Query<SearchParams>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    // 403 for roles that do not see this view
    enter_view(&session, &mut navigator, View::Students).await?;

    let store = state.store.read().await;
    let rows: Vec<StudentRow> = search::filter_students(store.students(), &params.q)
        .map(|s| StudentRow::new(s, store.classes()))
        .collect();
    tracing::debug!("GET /students: '{}' matched {} students", params.q, rows.len());

    let mut chrome = Chrome::new(&navigator, &state.save_indicator).with_feedback(feedback);
    chrome.search_term = params.q.clone();

    render(&StudentsPage {
        chrome,
        search_term: params.q,
        total: store.students().len(),
        rows,
        class_options: class_options(store.classes(), None),
        gender_options: gender_options(None),
    })
}

// POST /students/create
pub async fn handle_create_student(
    State(state): State<AppState>,
    Form(form): Form<StudentForm>,
) -> AppResult<Redirect> {
    // Validate the form; new students start without an account
    let student = match form.into_student(Uuid::new_v4().to_string(), None) {
        Ok(student) => student,
        Err(message) => {
            tracing::warn!("Student creation rejected: {}", message);
            return Ok(Redirect::to(&with_message("/students", "error", &message)));
        }
    };

    let message = format!("Đã thêm học sinh '{}'.", student.name);
    state.store.write().await.add_student(student);
    Ok(Redirect::to(&with_message("/students", "success", &message)))
}

// GET /students/{id}/edit
pub async fn show_edit_student(
    State(state): State<AppState>,
    Extension(navigator): Extension<Navigator>,
    Path(student_id): Path<String>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    let store = state.store.read().await;
    let student = store.find_student(&student_id).ok_or_else(|| {
        tracing::warn!("Edit requested for unknown student {}", student_id);
        AppError::NotFound
    })?;

    let chrome = Chrome::new(&navigator, &state.save_indicator).with_feedback(feedback);
    render(&StudentEditPage::new(chrome, student, store.classes()))
}

// POST /students/{id}/edit
pub async fn handle_update_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Form(form): Form<StudentForm>,
) -> AppResult<Redirect> {
    let edit_path = format!("/students/{}/edit", student_id);
    let mut store = state.store.write().await;

    // The account link is not part of the form; keep the stored one
    let account_id = store.find_student(&student_id).and_then(|s| s.account_id.clone());
    let student = match form.into_student(student_id.clone(), account_id) {
        Ok(student) => student,
        Err(message) => {
            tracing::warn!("Update of student {} rejected: {}", student_id, message);
            return Ok(Redirect::to(&with_message(&edit_path, "error", &message)));
        }
    };

    let message = format!("Đã cập nhật học sinh '{}'.", student.name);
    // No-op for an id that is not in the store
    if store.update_student(student) {
        Ok(Redirect::to(&with_message("/students", "success", &message)))
    } else {
        Ok(Redirect::to(&with_message("/students", "error", "Không tìm thấy học sinh.")))
    }
}
