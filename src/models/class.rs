// src/models/class.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

// Form posted from classes.html
#[derive(Debug, Deserialize)]
pub struct ClassForm {
    pub name: String,
    pub grade: String,
    #[serde(default)]
    pub room: String,
}

impl ClassForm {
    /// Validates the form and builds a class with the given id.
    pub fn into_class(self, id: String) -> Result<Class, String> {
        let name = self.name.trim();
        let grade = self.grade.trim();
        if name.is_empty() || grade.is_empty() {
            return Err("Tên lớp và khối là bắt buộc.".to_string());
        }
        let room = self.room.trim();
        Ok(Class {
            id,
            name: name.to_string(),
            grade: grade.to_string(),
            room: (!room.is_empty()).then(|| room.to_string()),
        })
    }
}
