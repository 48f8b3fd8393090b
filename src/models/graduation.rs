use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// `/api/graduation/simple`: the headline credit totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationSimple {
    pub student_id: u64,
    pub major_name: String,
    pub current_total: u32,
    pub required_total: u32,
    #[serde(default)]
    pub missing_major: u32,
    #[serde(default)]
    pub missing_general: u32,
}

/// `/api/graduation/my-status`: credits split by area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationStatus {
    pub major_credits: u32,
    pub general_credits: u32,
    pub total_credits: u32,
    pub required_total: u32,
}

/// One requirement category computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationCheckItem {
    pub category: String,
    pub current: u32,
    pub required: u32,
    pub passed: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub courses: Vec<CountedCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountedCourse {
    pub name: String,
    pub grade: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Track {
    #[default]
    MultiMajor,
    BsMs,
    DualDegree,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::MultiMajor, Track::BsMs, Track::DualDegree];

    /// Value sent as the `track` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Track::MultiMajor => "multiMajor",
            Track::BsMs => "bsMs",
            Track::DualDegree => "dualDegree",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Track::MultiMajor => "Multi-major track",
            Track::BsMs => "BS-MS combined track",
            Track::DualDegree => "Overseas dual-degree track",
        }
    }

    pub fn from_param(value: &str) -> Option<Track> {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "multimajor" => Some(Track::MultiMajor),
            "bsms" => Some(Track::BsMs),
            "dualdegree" => Some(Track::DualDegree),
            _ => None,
        }
    }
}

impl FromStr for Track {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Track::from_param(s).ok_or_else(|| {
            format!("Unknown track '{}'; expected multiMajor, bsMs or dualDegree", s)
        })
    }
}
