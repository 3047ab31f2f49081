// src/models/user.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two roles the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    /// Label shown next to the user's name in the header.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Quản trị viên",
            Role::Student => "Học sinh",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Student => write!(f, "student"),
        }
    }
}

// Account record as persisted in the storage blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Links a student account to its `Student` record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Avatar URL, falling back to a generated one seeded by the username.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                urlencoding::encode(&self.username)
            ),
        }
    }
}

// Login form posted from login.html
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// Profile form posted from profile.html
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_user() -> User {
        User {
            id: "u2".into(),
            username: "hs01".into(),
            password: Some("123".into()),
            role: Role::Student,
            full_name: "Nguyễn Văn An".into(),
            avatar: None,
            student_id: Some("S1".into()),
        }
    }

    #[test]
    fn serializes_with_camel_case_and_skips_missing_optionals() {
        let mut user = student_user();
        user.student_id = None;
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fullName"], "Nguyễn Văn An");
        assert_eq!(json["role"], "student");
        assert!(json.get("studentId").is_none());
        assert!(json.get("avatar").is_none());
    }

    #[test]
    fn avatar_falls_back_to_generated_url() {
        let mut user = student_user();
        assert!(user.avatar_url().ends_with("seed=hs01"));
        user.avatar = Some("https://example.org/me.png".into());
        assert_eq!(user.avatar_url(), "https://example.org/me.png");
    }
}
