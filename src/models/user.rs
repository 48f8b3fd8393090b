use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub student_id: String,
    pub major: String,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub english_score: Option<u32>,
    #[serde(default)]
    pub gpa_total: Option<f64>,
    #[serde(default)]
    pub gpa_major: Option<f64>,
    #[serde(default)]
    pub internship_flag: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Result of the login probe (`GET /api/auth/login`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProbe {
    pub logged_in: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
}

/// Sparse edit applied on top of the fetched profile before it is sent back whole.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub major: Option<String>,
    pub track: Option<String>,
    pub english_score: Option<u32>,
    pub internship_flag: Option<bool>,
}

impl ProfileEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.major.is_none()
            && self.track.is_none()
            && self.english_score.is_none()
            && self.internship_flag.is_none()
    }

    pub fn apply(&self, profile: &UserProfile) -> UserProfile {
        let mut next = profile.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(major) = &self.major {
            next.major = major.clone();
        }
        if let Some(track) = &self.track {
            next.track = Some(track.clone());
        }
        if let Some(score) = self.english_score {
            next.english_score = Some(score);
        }
        if let Some(flag) = self.internship_flag {
            next.internship_flag = flag;
        }
        next
    }
}
