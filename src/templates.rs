// src/templates.rs
use crate::{
    error::AppResult,
    models::{
        class::Class,
        student::{format_scores, Gender, Student},
        user::User,
    },
    services::{
        dashboard::DashboardStats,
        navigation::{NavItem, Navigator},
        portal::PortalView,
        rankings::RankingEntry,
        save_indicator::SaveIndicator,
    },
};
use askama::Template;
use axum::response::Html;

/// Renders a template, logging the failure before it turns into a 500.
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Failed to render template: {}", e);
        e.into()
    })
}

fn fmt_average(average: Option<f64>) -> String {
    average.map_or_else(|| "—".to_string(), |avg| format!("{:.2}", avg))
}

// Shared header/sidebar data, consumed by base.html.
pub struct Chrome {
    pub full_name: String,
    pub role_label: &'static str,
    pub avatar_url: String,
    pub is_admin: bool,
    pub is_saving: bool,
    pub last_saved: Option<String>,
    pub nav: Vec<NavItem>,
    pub search_term: String,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl Chrome {
    pub fn new(navigator: &Navigator, indicator: &SaveIndicator) -> Self {
        let (full_name, role_label, avatar_url, is_admin) = match navigator.current_user() {
            Some(user) => (user.full_name.clone(), user.role.label(), user.avatar_url(), user.is_admin()),
            None => (String::new(), "", String::new(), false),
        };
        Self {
            full_name,
            role_label,
            avatar_url,
            is_admin,
            is_saving: indicator.is_saving(),
            last_saved: indicator.last_saved_at().map(|at| at.format("%H:%M:%S %d/%m/%Y").to_string()),
            nav: navigator.nav_items(),
            search_term: String::new(),
            success_message: None,
            error_message: None,
        }
    }

    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.success_message = feedback.success;
        self.error_message = feedback.error;
        self
    }
}

/// `?success=` / `?error=` query parameters carried across a redirect.
#[derive(Debug, Default, serde::Deserialize)]
pub struct Feedback {
    pub success: Option<String>,
    pub error: Option<String>,
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn class_options(classes: &[Class], selected: Option<&str>) -> Vec<SelectOption> {
    classes
        .iter()
        .map(|c| SelectOption {
            value: c.id.clone(),
            label: format!("{} (khối {})", c.name, c.grade),
            selected: selected == Some(c.id.as_str()),
        })
        .collect()
}

pub fn gender_options(selected: Option<Gender>) -> Vec<SelectOption> {
    Gender::ALL
        .into_iter()
        .map(|g| SelectOption {
            value: g.label().to_string(),
            label: g.label().to_string(),
            selected: selected == Some(g),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub username: String,
}

pub struct ClassRow {
    pub id: String,
    pub name: String,
    pub grade: String,
    pub room: String,
    pub students: usize,
}

pub struct RankRow {
    pub position: usize,
    pub student_id: String,
    pub name: String,
    pub class_name: String,
    pub average: String,
    pub score_count: usize,
}

impl From<&RankingEntry<'_>> for RankRow {
    fn from(entry: &RankingEntry<'_>) -> Self {
        Self {
            position: entry.position,
            student_id: entry.student.id.clone(),
            name: entry.student.name.clone(),
            class_name: entry.class_name.unwrap_or("—").to_string(),
            average: fmt_average(entry.average),
            score_count: entry.score_count,
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub chrome: Chrome,
    pub student_count: usize,
    pub class_count: usize,
    pub overall_average: String,
    pub total_absences: i64,
    pub students_with_discipline: usize,
    pub per_class: Vec<ClassRow>,
    pub top_students: Vec<RankRow>,
}

impl DashboardPage {
    pub fn new(chrome: Chrome, stats: &DashboardStats<'_>) -> Self {
        Self {
            chrome,
            student_count: stats.student_count,
            class_count: stats.class_count,
            overall_average: fmt_average(stats.overall_average),
            total_absences: stats.total_absences,
            students_with_discipline: stats.students_with_discipline,
            per_class: stats
                .per_class
                .iter()
                .map(|h| ClassRow {
                    id: h.class.id.clone(),
                    name: h.class.name.clone(),
                    grade: h.class.grade.clone(),
                    room: h.class.room.clone().unwrap_or_default(),
                    students: h.students,
                })
                .collect(),
            top_students: stats.top_students.iter().map(RankRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "classes.html")]
pub struct ClassesPage {
    pub chrome: Chrome,
    pub classes: Vec<ClassRow>,
}

pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub dob: String,
    pub gender: &'static str,
    pub class_name: String,
    pub average: String,
    pub absence_count: i64,
}

impl StudentRow {
    pub fn new(student: &Student, classes: &[Class]) -> Self {
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            dob: student.dob.clone(),
            gender: student.gender.label(),
            class_name: classes
                .iter()
                .find(|c| c.id == student.class_id)
                .map_or_else(|| "—".to_string(), |c| c.name.clone()),
            average: fmt_average(student.average_score()),
            absence_count: student.absence_count,
        }
    }
}

#[derive(Template)]
#[template(path = "students.html")]
pub struct StudentsPage {
    pub chrome: Chrome,
    pub search_term: String,
    pub total: usize,
    pub rows: Vec<StudentRow>,
    pub class_options: Vec<SelectOption>,
    pub gender_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "student_edit.html")]
pub struct StudentEditPage {
    pub chrome: Chrome,
    pub id: String,
    pub name: String,
    pub dob: String,
    pub school: String,
    pub absence_count: i64,
    pub teacher_comment: String,
    pub discipline_record: String,
    pub scores: String,
    pub class_options: Vec<SelectOption>,
    pub gender_options: Vec<SelectOption>,
}

impl StudentEditPage {
    pub fn new(chrome: Chrome, student: &Student, classes: &[Class]) -> Self {
        Self {
            chrome,
            id: student.id.clone(),
            name: student.name.clone(),
            dob: student.dob.clone(),
            school: student.school.clone(),
            absence_count: student.absence_count,
            teacher_comment: student.teacher_comment.clone(),
            discipline_record: student.discipline_record.join("\n"),
            scores: format_scores(&student.scores),
            class_options: class_options(classes, Some(&student.class_id)),
            gender_options: gender_options(Some(student.gender)),
        }
    }
}

#[derive(Template)]
#[template(path = "rankings.html")]
pub struct RankingsPage {
    pub chrome: Chrome,
    pub rows: Vec<RankRow>,
    pub class_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub chrome: Chrome,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub role_label: &'static str,
}

impl ProfilePage {
    pub fn new(chrome: Chrome, user: &User) -> Self {
        Self {
            chrome,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone().unwrap_or_default(),
            role_label: user.role.label(),
        }
    }
}

pub struct ScoreRow {
    pub subject: String,
    pub value: String,
}

// Everything the portal card shows for a linked student.
pub struct PortalCard {
    pub id: String,
    pub name: String,
    pub dob: String,
    pub gender: &'static str,
    pub school: String,
    pub class_name: String,
    pub grade: String,
    pub room: String,
    pub absence_count: i64,
    pub discipline_record: Vec<String>,
    pub scores: Vec<ScoreRow>,
    pub average: String,
    pub teacher_comment: String,
}

#[derive(Template)]
#[template(path = "student_portal.html")]
pub struct StudentPortalPage {
    pub chrome: Chrome,
    pub card: Option<PortalCard>,
}

impl StudentPortalPage {
    pub fn new(chrome: Chrome, view: &PortalView<'_>) -> Self {
        let card = match view {
            PortalView::Linked { student, class } => {
                let class = *class;
                Some(PortalCard {
                    id: student.id.clone(),
                    name: student.name.clone(),
                    dob: student.dob.clone(),
                    gender: student.gender.label(),
                    school: student.school.clone(),
                    class_name: class.map_or_else(|| "Chưa xếp lớp".to_string(), |c| c.name.clone()),
                    grade: class.map(|c| c.grade.clone()).unwrap_or_default(),
                    room: class.and_then(|c| c.room.clone()).unwrap_or_default(),
                    absence_count: student.absence_count,
                    discipline_record: student.discipline_record.clone(),
                    scores: student
                        .scores
                        .iter()
                        .map(|s| ScoreRow { subject: s.subject.clone(), value: s.value.to_string() })
                        .collect(),
                    average: fmt_average(student.average_score()),
                    teacher_comment: student.teacher_comment.clone(),
                })
            }
            PortalView::Unlinked => None,
        };
        Self { chrome, card }
    }
}
