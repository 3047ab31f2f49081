// src/services/mod.rs
pub mod auth_service;
pub mod dashboard;
pub mod navigation;
pub mod persistence;
pub mod portal;
pub mod rankings;
pub mod save_indicator;
pub mod search;
pub mod store;
