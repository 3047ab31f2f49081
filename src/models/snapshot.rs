// src/models/snapshot.rs
use super::{class::Class, student::Student, user::User};
use serde::{Deserialize, Serialize};

/// Everything that is persisted: the three collections, written and read
/// as one blob. Missing keys deserialize to empty sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub users: Vec<User>,
}
