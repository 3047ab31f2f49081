// src/web/view_handlers.rs
//
// One handler per dashboard view. Each switches the session's active view
// first, so a role that cannot see the view gets a 403 before any data is read.
use crate::{
    error::{AppError, AppResult},
    services::{
        dashboard,
        navigation::{Navigator, View},
        portal, rankings,
    },
    state::AppState,
    templates::{
        class_options, render, Chrome, ClassRow, ClassesPage, DashboardPage, Feedback,
        ProfilePage, RankRow, RankingsPage, StudentPortalPage,
    },
    web::session::enter_view,
};
use axum::{
    extract::{Extension, Query, State},
    response::Html,
};
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    class: Option<String>,
}

// GET /dashboard
pub async fn show_dashboard(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    enter_view(&session, &mut navigator, View::Dashboard).await?;

    let store = state.store.read().await;
    let stats = dashboard::compute(&store);
    let chrome = Chrome::new(&navigator, &state.save_indicator).with_feedback(feedback);
    render(&DashboardPage::new(chrome, &stats))
}

// GET /classes
pub async fn show_classes(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    enter_view(&session, &mut navigator, View::Classes).await?;

    let store = state.store.read().await;
    let classes = store
        .classes()
        .iter()
        .map(|c| ClassRow {
            id: c.id.clone(),
            name: c.name.clone(),
            grade: c.grade.clone(),
            room: c.room.clone().unwrap_or_default(),
            students: store.students().iter().filter(|s| s.class_id == c.id).count(),
        })
        .collect();

    let chrome = Chrome::new(&navigator, &state.save_indicator).with_feedback(feedback);
    render(&ClassesPage { chrome, classes })
}

// GET /rankings?class=<id>
pub async fn show_rankings(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
    Query(params): Query<RankingParams>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    enter_view(&session, &mut navigator, View::Rankings).await?;

    let class_filter = params.class.as_deref().map(str::trim).filter(|id| !id.is_empty());
    let store = state.store.read().await;
    let rows = rankings::rank(store.students(), store.classes(), class_filter)
        .iter()
        .map(RankRow::from)
        .collect();

    render(&RankingsPage {
        chrome: Chrome::new(&navigator, &state.save_indicator).with_feedback(feedback),
        rows,
        class_options: class_options(store.classes(), class_filter),
    })
}

// GET /profile
pub async fn show_profile(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    enter_view(&session, &mut navigator, View::Profile).await?;

    let chrome = Chrome::new(&navigator, &state.save_indicator).with_feedback(feedback);
    let user = navigator.current_user().ok_or(AppError::Unauthorized)?;
    render(&ProfilePage::new(chrome, user))
}

// GET /student-portal
pub async fn show_student_portal(
    State(state): State<AppState>,
    session: Session,
    Extension(mut navigator): Extension<Navigator>,
) -> AppResult<Html<String>> {
    enter_view(&session, &mut navigator, View::StudentPortal).await?;

    let store = state.store.read().await;
    let chrome = Chrome::new(&navigator, &state.save_indicator);
    let page = match navigator.current_user() {
        Some(user) => StudentPortalPage::new(chrome, &portal::resolve(&store, user)),
        None => StudentPortalPage { chrome, card: None },
    };
    render(&page)
}
