// src/services/search.rs
use crate::models::student::Student;

/// Students whose name or id contains `term`, ignoring case.
///
/// Lazily filters the borrowed slice; a blank term yields every student.
pub fn filter_students<'a>(
    students: &'a [Student],
    term: &str,
) -> impl Iterator<Item = &'a Student> + 'a {
    let needle = term.trim().to_lowercase();
    students.iter().filter(move |s| {
        needle.is_empty()
            || s.name.to_lowercase().contains(&needle)
            || s.id.to_lowercase().contains(&needle)
    })
}
