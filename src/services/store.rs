// src/services/store.rs
use crate::models::{
    class::Class,
    snapshot::Snapshot,
    student::Student,
    user::{Role, User},
};
use std::collections::HashSet;

/// In-memory collections for the whole dashboard.
///
/// Hydrated once from storage at startup, mutated by append and
/// replace-by-id, and flushed back as a full `Snapshot`. There are no deletes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    students: Vec<Student>,
    classes: Vec<Class>,
    users: Vec<User>,
}

impl Store {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            students: snapshot.students,
            classes: snapshot.classes,
            users: snapshot.users,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            students: self.students.clone(),
            classes: self.classes.clone(),
            users: self.users.clone(),
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn find_class(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Appends without checking for an existing id; callers generate ids.
    pub fn add_student(&mut self, student: Student) {
        tracing::info!("Adding student '{}' ({})", student.name, student.id);
        self.students.push(student);
    }

    pub fn add_class(&mut self, class: Class) {
        tracing::info!("Adding class '{}' ({})", class.name, class.id);
        self.classes.push(class);
    }

    /// Replaces the student with the same id. Unknown ids leave the
    /// collection untouched; the return value only reports which case applied.
    pub fn update_student(&mut self, student: Student) -> bool {
        match self.students.iter_mut().find(|s| s.id == student.id) {
            Some(slot) => {
                tracing::info!("Updating student {}", student.id);
                *slot = student;
                true
            }
            None => {
                tracing::debug!("update_student: no student with id {}, nothing changed", student.id);
                false
            }
        }
    }

    /// Replaces the user with the same id. The caller refreshes the active
    /// session through `Navigator::refresh_user`.
    pub fn update_profile(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                tracing::info!("Updating profile of user {}", user.id);
                *slot = user;
                true
            }
            None => {
                tracing::debug!("update_profile: no user with id {}, nothing changed", user.id);
                false
            }
        }
    }

    /// Seeds an admin account when no users exist, so a fresh install can log in.
    pub fn seed_admin_if_empty(&mut self, username: &str, password: &str) -> bool {
        if !self.users.is_empty() {
            return false;
        }
        tracing::warn!("No users in storage, seeding admin account '{}'", username);
        self.users.push(User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: Some(password.to_string()),
            role: Role::Admin,
            full_name: "Quản trị viên".to_string(),
            avatar: None,
            student_id: None,
        });
        true
    }

    /// Reports dangling or duplicated references. References are soft, so
    /// these are only surfaced, never repaired.
    pub fn link_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for student in &self.students {
            if self.find_class(&student.class_id).is_none() {
                warnings.push(format!(
                    "student {} references missing class '{}'",
                    student.id, student.class_id
                ));
            }
        }

        let mut linked = HashSet::new();
        for user in &self.users {
            let Some(student_id) = user.student_id.as_deref() else {
                continue;
            };
            if !linked.insert(student_id) {
                warnings.push(format!(
                    "student '{}' is linked by more than one user (again by {})",
                    student_id, user.id
                ));
            }
            if self.find_student(student_id).is_none() {
                warnings.push(format!(
                    "user {} references missing student '{}'",
                    user.id, student_id
                ));
            }
        }

        warnings
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::student::{Gender, Score};

    pub(crate) fn student(id: &str, name: &str, class_id: &str, scores: &[f64]) -> Student {
        Student {
            id: id.into(),
            name: name.into(),
            dob: "2008-01-01".into(),
            gender: Gender::Male,
            school: "THPT Lê Quý Đôn".into(),
            class_id: class_id.into(),
            discipline_record: vec![],
            absence_count: 0,
            scores: scores
                .iter()
                .map(|v| Score { subject: "Toán".into(), value: *v })
                .collect(),
            teacher_comment: String::new(),
            account_id: None,
        }
    }

    pub(crate) fn class(id: &str, name: &str) -> Class {
        Class { id: id.into(), name: name.into(), grade: "10".into(), room: None }
    }

    pub(crate) fn user(id: &str, role: Role, student_id: Option<&str>) -> User {
        User {
            id: id.into(),
            username: format!("user-{}", id),
            password: Some("secret".into()),
            role,
            full_name: format!("User {}", id),
            avatar: None,
            student_id: student_id.map(str::to_string),
        }
    }

    #[test]
    fn add_student_appends_exactly_one() {
        let mut store = Store::default();
        store.add_student(student("s1", "Anh", "c1", &[]));
        let new = student("s2", "Binh", "c1", &[7.0]);
        store.add_student(new.clone());
        assert_eq!(store.students().len(), 2);
        assert_eq!(store.students().last(), Some(&new));
    }

    #[test]
    fn add_student_does_not_check_duplicate_ids() {
        let mut store = Store::default();
        store.add_student(student("s1", "Anh", "c1", &[]));
        store.add_student(student("s1", "Anh bis", "c1", &[]));
        assert_eq!(store.students().len(), 2);
    }

    #[test]
    fn update_student_replaces_only_the_match() {
        let mut store = Store::default();
        store.add_student(student("s1", "Anh", "c1", &[]));
        store.add_student(student("s2", "Binh", "c1", &[]));
        store.add_student(student("s3", "Chi", "c2", &[]));
        let before = store.clone();

        let mut changed = student("s2", "Bình", "c2", &[9.0]);
        changed.absence_count = 3;
        assert!(store.update_student(changed.clone()));

        assert_eq!(store.students()[0], before.students()[0]);
        assert_eq!(store.students()[1], changed);
        assert_eq!(store.students()[2], before.students()[2]);
    }

    #[test]
    fn update_student_with_unknown_id_is_a_no_op() {
        let mut store = Store::default();
        store.add_student(student("s1", "Anh", "c1", &[]));
        let before = store.clone();
        assert!(!store.update_student(student("nope", "Ghost", "c1", &[])));
        assert_eq!(store, before);
    }

    #[test]
    fn update_profile_replaces_by_id() {
        let mut store = Store::from_snapshot(Snapshot {
            users: vec![user("u1", Role::Admin, None), user("u2", Role::Student, Some("s1"))],
            ..Snapshot::default()
        });
        let mut changed = store.users()[1].clone();
        changed.full_name = "Nguyễn Văn An".into();
        assert!(store.update_profile(changed.clone()));
        assert_eq!(store.users()[1], changed);
        assert!(!store.update_profile(user("u9", Role::Admin, None)));
        assert_eq!(store.users().len(), 2);
    }

    #[test]
    fn seeds_admin_only_when_empty() {
        let mut store = Store::default();
        assert!(store.seed_admin_if_empty("admin", "pw"));
        assert!(store.users()[0].is_admin());
        assert!(!store.seed_admin_if_empty("other", "pw"));
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn link_warnings_report_dangling_and_duplicate_links() {
        let store = Store::from_snapshot(Snapshot {
            students: vec![student("s1", "Anh", "missing", &[])],
            classes: vec![],
            users: vec![
                user("u1", Role::Student, Some("s1")),
                user("u2", Role::Student, Some("s1")),
                user("u3", Role::Student, Some("s9")),
            ],
        });
        let warnings = store.link_warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("missing class")));
        assert!(warnings.iter().any(|w| w.contains("more than one user")));
        assert!(warnings.iter().any(|w| w.contains("missing student 's9'")));
    }
}
