// src/services/portal.rs
use crate::models::{class::Class, student::Student, user::User};
use crate::services::store::Store;

/// What the student portal shows for the logged-in user.
#[derive(Debug, Clone, PartialEq)]
pub enum PortalView<'a> {
    Linked {
        student: &'a Student,
        /// `None` when the student's class id is dangling.
        class: Option<&'a Class>,
    },
    /// The account has no student record behind it (no `studentId`, or one
    /// that matches nothing).
    Unlinked,
}

/// The student record behind a student-role account.
pub fn current_student_data<'a>(store: &'a Store, user: &User) -> Option<&'a Student> {
    if user.is_admin() {
        return None;
    }
    user.student_id.as_deref().and_then(|id| store.find_student(id))
}

pub fn current_student_class<'a>(store: &'a Store, student: &Student) -> Option<&'a Class> {
    store.find_class(&student.class_id)
}

pub fn resolve<'a>(store: &'a Store, user: &User) -> PortalView<'a> {
    match current_student_data(store, user) {
        Some(student) => PortalView::Linked {
            student,
            class: current_student_class(store, student),
        },
        None => {
            tracing::debug!("User {} has no linked student record", user.id);
            PortalView::Unlinked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{snapshot::Snapshot, user::Role};
    use crate::services::store::tests::{class, student, user};

    fn store() -> Store {
        Store::from_snapshot(Snapshot {
            students: vec![student("S1", "Anh", "c1", &[]), student("S2", "Binh", "gone", &[])],
            classes: vec![class("c1", "10A1")],
            users: vec![],
        })
    }

    #[test]
    fn linked_student_resolves_with_class() {
        let store = store();
        let view = resolve(&store, &user("u1", Role::Student, Some("S1")));
        match view {
            PortalView::Linked { student, class } => {
                assert_eq!(student.name, "Anh");
                assert_eq!(class.map(|c| c.name.as_str()), Some("10A1"));
            }
            PortalView::Unlinked => panic!("expected a linked student"),
        }
    }

    #[test]
    fn dangling_class_still_shows_student() {
        let store = store();
        let view = resolve(&store, &user("u2", Role::Student, Some("S2")));
        assert!(matches!(view, PortalView::Linked { class: None, .. }));
    }

    #[test]
    fn missing_student_is_unlinked() {
        let store = Store::default();
        let view = resolve(&store, &user("u1", Role::Student, Some("S1")));
        assert_eq!(view, PortalView::Unlinked);
        assert_eq!(resolve(&store, &user("u3", Role::Student, None)), PortalView::Unlinked);
    }

    #[test]
    fn admins_have_no_student_data() {
        let store = store();
        assert!(current_student_data(&store, &user("a", Role::Admin, Some("S1"))).is_none());
    }
}
