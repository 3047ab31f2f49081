// src/models/mod.rs
pub mod class;
pub mod snapshot;
pub mod student;
pub mod user;
