// src/services/dashboard.rs
use super::rankings::{self, RankingEntry};
use crate::models::class::Class;
use crate::services::store::Store;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassHeadcount<'a> {
    pub class: &'a Class,
    pub students: usize,
}

/// Figures shown on the admin landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats<'a> {
    pub student_count: usize,
    pub class_count: usize,
    /// Mean over every recorded score of every student.
    pub overall_average: Option<f64>,
    pub total_absences: i64,
    pub students_with_discipline: usize,
    pub per_class: Vec<ClassHeadcount<'a>>,
    pub top_students: Vec<RankingEntry<'a>>,
}

pub const TOP_STUDENTS: usize = 5;

pub fn compute(store: &Store) -> DashboardStats<'_> {
    let students = store.students();

    let (score_total, score_count) = students
        .iter()
        .flat_map(|s| s.scores.iter())
        .fold((0.0, 0usize), |(sum, n), score| (sum + score.value, n + 1));

    let per_class = store
        .classes()
        .iter()
        .map(|class| ClassHeadcount {
            class,
            students: students.iter().filter(|s| s.class_id == class.id).count(),
        })
        .collect();

    let mut top_students = rankings::rank(students, store.classes(), None);
    top_students.retain(|entry| entry.average.is_some());
    top_students.truncate(TOP_STUDENTS);

    DashboardStats {
        student_count: students.len(),
        class_count: store.classes().len(),
        overall_average: (score_count > 0).then(|| score_total / score_count as f64),
        total_absences: students.iter().map(|s| s.absence_count).sum(),
        students_with_discipline: students
            .iter()
            .filter(|s| !s.discipline_record.is_empty())
            .count(),
        per_class,
        top_students,
    }
}
