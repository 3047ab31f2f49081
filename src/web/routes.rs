// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, class_handlers, mw_admin, mw_auth, profile_handlers, storage_handlers,
        student_handlers, view_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Builds the application router. The session layer is added by the caller.
pub fn create_router(app_state: AppState) -> Router {
    // --- Public routes ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        // Redirects to the active view, or to /login
        .route("/", get(auth_handlers::root));

    // --- Admin routes ---
    // Mutations and the student editor: login AND admin role.
    // The add forms on /classes and /students post here.
    let admin_routes = Router::new()
        .route("/classes/create", post(class_handlers::handle_create_class))
        .route("/students/create", post(student_handlers::handle_create_student))
        .route(
            "/students/{id}/edit",
            get(student_handlers::show_edit_student).post(student_handlers::handle_update_student),
        )
        .route("/save", post(storage_handlers::handle_save))
        // Only mw_admin here; mw_auth is applied by the parent router
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    // --- Authenticated routes ---
    // Views are gated per role by the navigator inside each handler.
    let authenticated_routes = Router::new()
        .route("/dashboard", get(view_handlers::show_dashboard))
        .route("/classes", get(view_handlers::show_classes))
        .route("/students", get(student_handlers::show_students))
        .route("/rankings", get(view_handlers::show_rankings))
        .route("/profile", get(view_handlers::show_profile).post(profile_handlers::handle_update_profile))
        .route("/student-portal", get(view_handlers::show_student_portal))
        .route("/logout", get(auth_handlers::handle_logout))
        .merge(admin_routes)
        // require_auth wraps every route above, admin ones included
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    // --- Final router ---
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}
