// src/services/rankings.rs
use crate::models::{class::Class, student::Student};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry<'a> {
    /// 1-based position in the ranking.
    pub position: usize,
    pub student: &'a Student,
    pub class_name: Option<&'a str>,
    pub average: Option<f64>,
    pub score_count: usize,
}

/// Ranks students by average score, highest first.
///
/// Students without scores come last. Equal averages keep insertion order
/// (the sort is stable). `class_filter` restricts the ranking to one class.
pub fn rank<'a>(
    students: &'a [Student],
    classes: &'a [Class],
    class_filter: Option<&str>,
) -> Vec<RankingEntry<'a>> {
    let mut scored: Vec<(&Student, Option<f64>)> = students
        .iter()
        .filter(|s| class_filter.map_or(true, |class_id| s.class_id == class_id))
        .map(|s| (s, s.average_score()))
        .collect();

    scored.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (student, average))| RankingEntry {
            position: idx + 1,
            student,
            class_name: classes
                .iter()
                .find(|c| c.id == student.class_id)
                .map(|c| c.name.as_str()),
            average,
            score_count: student.scores.len(),
        })
        .collect()
}
