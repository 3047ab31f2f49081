// src/web/mod.rs
pub mod auth_handlers;
pub mod class_handlers;
pub mod mw_admin;
pub mod mw_auth;
pub mod profile_handlers;
pub mod routes;
pub mod session;
pub mod storage_handlers;
pub mod student_handlers;
pub mod view_handlers;
