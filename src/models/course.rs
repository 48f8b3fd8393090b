use serde::{Deserialize, Serialize};

/// A course the student has taken, as returned by `/api/course/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub lecture_id: String,
    pub name: String,
    pub credit: u32,
    pub category: String,
    /// School year the course belongs to (1..=4).
    pub grade: u8,
    pub semester: String,
    #[serde(default)]
    pub received_grade: Option<String>,
}

/// A lecture offered in the catalogue (`/api/lecture/list`, `/api/lecture/standard`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub lecture_id: String,
    pub name: String,
    pub credit: u32,
    pub category: String,
    pub grade: u8,
    pub semester: String,
    #[serde(default)]
    pub professor: Option<String>,
}

impl Lecture {
    pub fn into_record(self, received_grade: Option<String>) -> CourseRecord {
        CourseRecord {
            lecture_id: self.lecture_id,
            name: self.name,
            credit: self.credit,
            category: self.category,
            grade: self.grade,
            semester: self.semester,
            received_grade,
        }
    }
}

/// Which catalogue endpoint a lecture search goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LectureSource {
    #[default]
    List,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LectureFilter {
    pub grade: Option<u8>,
    pub semester: Option<String>,
    pub keyword: Option<String>,
    pub source: LectureSource,
}

impl LectureFilter {
    /// Non-empty query parameters in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(grade) = self.grade {
            pairs.push(("grade", grade.to_string()));
        }
        if let Some(semester) = self.semester.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("semester", semester.to_string()));
        }
        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("keyword", keyword.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCourseRequest {
    pub lecture_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub lecture_id: String,
    pub received_grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
