//! Letter grades on the 4.3 scale.
//!
//! One canonical table is used everywhere: C+ is 2.3, not 2.4.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A0")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B0")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C0")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D0")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    F,
    P,
    NP,
}

/// Descending thresholds; the first entry a point reaches wins.
const POINT_TABLE: [(Grade, f64); 13] = [
    (Grade::APlus, 4.3),
    (Grade::A, 4.0),
    (Grade::AMinus, 3.7),
    (Grade::BPlus, 3.3),
    (Grade::B, 3.0),
    (Grade::BMinus, 2.7),
    (Grade::CPlus, 2.3),
    (Grade::C, 2.0),
    (Grade::CMinus, 1.7),
    (Grade::DPlus, 1.3),
    (Grade::D, 1.0),
    (Grade::DMinus, 0.7),
    (Grade::F, 0.0),
];

const EPSILON: f64 = 1e-9;

impl Grade {
    pub const ALL: [Grade; 15] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::DMinus,
        Grade::F,
        Grade::P,
        Grade::NP,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A0",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B0",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C0",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D0",
            Grade::DMinus => "D-",
            Grade::F => "F",
            Grade::P => "P",
            Grade::NP => "NP",
        }
    }

    /// Grade point, or `None` for pass/non-pass grades.
    pub fn point(&self) -> Option<f64> {
        POINT_TABLE
            .iter()
            .find(|(g, _)| g == self)
            .map(|(_, p)| *p)
    }

    /// Maps a numeric point onto the highest letter whose threshold it reaches.
    pub fn from_point(point: f64) -> Grade {
        if point.is_nan() {
            return Grade::F;
        }
        POINT_TABLE
            .iter()
            .find(|(_, threshold)| point + EPSILON >= *threshold)
            .map(|(g, _)| *g)
            .unwrap_or(Grade::F)
    }

    /// Whether the course's credits count as earned.
    pub fn earns_credit(&self) -> bool {
        !matches!(self, Grade::F | Grade::NP)
    }

    pub fn counts_toward_gpa(&self) -> bool {
        self.point().is_some()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let grade = match normalized.as_str() {
            "A+" => Grade::APlus,
            "A0" | "A" => Grade::A,
            "A-" => Grade::AMinus,
            "B+" => Grade::BPlus,
            "B0" | "B" => Grade::B,
            "B-" => Grade::BMinus,
            "C+" => Grade::CPlus,
            "C0" | "C" => Grade::C,
            "C-" => Grade::CMinus,
            "D+" => Grade::DPlus,
            "D0" | "D" => Grade::D,
            "D-" => Grade::DMinus,
            "F" => Grade::F,
            "P" | "PASS" => Grade::P,
            "NP" | "N" | "FAIL" => Grade::NP,
            _ => return Err(format!("Unknown grade '{}'", s.trim())),
        };
        Ok(grade)
    }
}

pub fn point_to_letter(point: f64) -> &'static str {
    Grade::from_point(point).label()
}

pub fn letter_to_point(letter: &str) -> Option<f64> {
    letter.parse::<Grade>().ok().and_then(|g| g.point())
}
