// src/models/student.rs
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Nam")]
    Male,
    #[serde(rename = "Nữ")]
    Female,
    #[serde(rename = "Khác")]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Nam",
            Gender::Female => "Nữ",
            Gender::Other => "Khác",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.label() == s.trim())
            .ok_or_else(|| format!("Giới tính không hợp lệ: '{}'", s))
    }
}

/// One graded subject. Subjects may repeat for the same student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub subject: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub dob: String,
    pub gender: Gender,
    pub school: String,
    /// Soft reference to `Class::id`, never checked on write.
    pub class_id: String,
    #[serde(default)]
    pub discipline_record: Vec<String>,
    #[serde(default)]
    pub absence_count: i64,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default)]
    pub teacher_comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl Student {
    /// Mean of all score values, `None` when the student has no scores.
    pub fn average_score(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let total: f64 = self.scores.iter().map(|s| s.value).sum();
        Some(total / self.scores.len() as f64)
    }
}

// Form posted from students.html (create) and student_edit.html (update)
#[derive(Debug, Deserialize)]
pub struct StudentForm {
    pub name: String,
    #[serde(default)]
    pub dob: String,
    pub gender: String,
    #[serde(default)]
    pub school: String,
    pub class_id: String,
    #[serde(default)]
    pub absence_count: String,
    #[serde(default)]
    pub teacher_comment: String,
    /// One entry per line.
    #[serde(default)]
    pub discipline_record: String,
    /// `Subject: value` per line.
    #[serde(default)]
    pub scores: String,
}

impl StudentForm {
    /// Validates the form and builds the full record.
    ///
    /// `account_id` is carried over from the stored record on update since
    /// the form never edits it.
    pub fn into_student(self, id: String, account_id: Option<String>) -> Result<Student, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Họ tên học sinh là bắt buộc.".to_string());
        }
        let gender: Gender = self.gender.parse()?;

        let absence_count = match self.absence_count.trim() {
            "" => 0,
            raw => raw
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 0)
                .ok_or_else(|| format!("Số buổi vắng không hợp lệ: '{}'", raw))?,
        };

        Ok(Student {
            id,
            name: name.to_string(),
            dob: self.dob.trim().to_string(),
            gender,
            school: self.school.trim().to_string(),
            class_id: self.class_id.trim().to_string(),
            discipline_record: parse_lines(&self.discipline_record),
            absence_count,
            scores: parse_scores(&self.scores)?,
            teacher_comment: self.teacher_comment.trim().to_string(),
            account_id,
        })
    }
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `Subject: value` lines. Blank lines are skipped.
pub fn parse_scores(text: &str) -> Result<Vec<Score>, String> {
    let mut scores = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (subject, value) = line
            .rsplit_once(':')
            .ok_or_else(|| format!("Dòng điểm không hợp lệ (cần 'Môn: điểm'): '{}'", line))?;
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(format!("Thiếu tên môn học: '{}'", line));
        }
        let value: f64 = value
            .trim()
            .replace(',', ".")
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| format!("Điểm không hợp lệ: '{}'", line))?;
        scores.push(Score { subject: subject.to_string(), value });
    }
    Ok(scores)
}

/// Inverse of `parse_scores`, used to prefill the edit form.
pub fn format_scores(scores: &[Score]) -> String {
    scores
        .iter()
        .map(|s| format!("{}: {}", s.subject, s.value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> StudentForm {
        StudentForm {
            name: "  Trần Thị Bình ".into(),
            dob: "2008-03-14".into(),
            gender: "Nữ".into(),
            school: "THPT Chu Văn An".into(),
            class_id: "c1".into(),
            absence_count: "2".into(),
            teacher_comment: "Chăm chỉ".into(),
            discipline_record: "Đi muộn\n\n  Quên sách  \n".into(),
            scores: "Toán: 8.5\nVăn: 7,25\n".into(),
        }
    }

    #[test]
    fn form_builds_student() {
        let student = form().into_student("s1".into(), Some("u9".into())).unwrap();
        assert_eq!(student.name, "Trần Thị Bình");
        assert_eq!(student.gender, Gender::Female);
        assert_eq!(student.absence_count, 2);
        assert_eq!(student.discipline_record, vec!["Đi muộn", "Quên sách"]);
        assert_eq!(student.scores.len(), 2);
        assert_eq!(student.scores[1].value, 7.25);
        assert_eq!(student.account_id.as_deref(), Some("u9"));
    }

    #[test]
    fn form_rejects_bad_input() {
        let mut bad = form();
        bad.absence_count = "-1".into();
        assert!(bad.into_student("s1".into(), None).is_err());

        let mut bad = form();
        bad.scores = "Toán 8".into();
        assert!(bad.into_student("s1".into(), None).is_err());

        let mut bad = form();
        bad.gender = "X".into();
        assert!(bad.into_student("s1".into(), None).is_err());
    }

    #[test]
    fn scores_format_back_into_form_text() {
        let scores = parse_scores("Toán: 9\nLý: 6.5").unwrap();
        assert_eq!(format_scores(&scores), "Toán: 9\nLý: 6.5");
    }

    #[test]
    fn average_is_none_without_scores() {
        let mut student = form().into_student("s1".into(), None).unwrap();
        assert_eq!(student.average_score(), Some((8.5 + 7.25) / 2.0));
        student.scores.clear();
        assert_eq!(student.average_score(), None);
    }

    #[test]
    fn gender_uses_vietnamese_labels_on_the_wire() {
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"Khác\"");
    }
}
