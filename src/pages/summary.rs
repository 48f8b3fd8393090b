use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::JoluvApi;
use crate::fetch::{FetchController, FetchState, LoadOutcome};
use crate::grade::Grade;
use crate::models::CourseRecord;
use crate::pages::credits::map_state;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreditTally {
    pub courses: usize,
    pub attempted: u32,
    pub earned: u32,
    gpa_points: f64,
    gpa_credits: u32,
}

fn parsed_grade(record: &CourseRecord) -> Option<Grade> {
    record
        .received_grade
        .as_deref()
        .and_then(|g| g.parse::<Grade>().ok())
}

/// Missing or unrecognised grades count as earned; F and NP do not.
fn record_earns_credit(record: &CourseRecord) -> bool {
    parsed_grade(record).is_none_or(|g| g.earns_credit())
}

impl CreditTally {
    pub fn add(&mut self, record: &CourseRecord) {
        let grade = parsed_grade(record);

        self.courses += 1;
        self.attempted += record.credit;
        if record_earns_credit(record) {
            self.earned += record.credit;
        }
        if let Some(point) = grade.and_then(|g| g.point()) {
            self.gpa_points += point * f64::from(record.credit);
            self.gpa_credits += record.credit;
        }
    }

    /// Credit-weighted average over letter-graded courses, rounded to two places.
    pub fn gpa(&self) -> Option<f64> {
        if self.gpa_credits == 0 {
            return None;
        }
        let raw = self.gpa_points / f64::from(self.gpa_credits);
        Some((raw * 100.0).round() / 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemesterSummary {
    pub year: u8,
    pub semester: String,
    pub tally: CreditTally,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryView {
    pub semesters: Vec<SemesterSummary>,
    pub overall: CreditTally,
    pub by_category: Vec<(String, u32)>,
}

/// Orders regular and seasonal terms within a school year.
fn semester_rank(semester: &str) -> u8 {
    let s = semester.to_lowercase();
    if s.contains("summer") || s.contains("여름") {
        2
    } else if s.contains("winter") || s.contains("겨울") {
        4
    } else if s.contains('1') || s.contains("spring") {
        1
    } else if s.contains('2') || s.contains("fall") || s.contains("autumn") {
        3
    } else {
        5
    }
}

pub fn summarize(records: &[CourseRecord]) -> SummaryView {
    let mut semesters: BTreeMap<(u8, u8, String), CreditTally> = BTreeMap::new();
    let mut categories: BTreeMap<String, u32> = BTreeMap::new();
    let mut overall = CreditTally::default();

    for record in records {
        let key = (record.grade, semester_rank(&record.semester), record.semester.clone());
        semesters.entry(key).or_default().add(record);
        overall.add(record);
        if record_earns_credit(record) {
            *categories.entry(record.category.clone()).or_default() += record.credit;
        }
    }

    SummaryView {
        semesters: semesters
            .into_iter()
            .map(|((year, _, semester), tally)| SemesterSummary {
                year,
                semester,
                tally,
            })
            .collect(),
        overall,
        by_category: categories.into_iter().collect(),
    }
}

pub struct SummaryPage {
    api: Arc<dyn JoluvApi>,
    history: FetchController<Vec<CourseRecord>>,
}

impl SummaryPage {
    pub fn new(api: Arc<dyn JoluvApi>) -> Self {
        Self {
            api,
            history: FetchController::new("summary-history"),
        }
    }

    pub async fn mount(&self) -> LoadOutcome {
        self.history.load(self.api.fetch_course_history()).await
    }

    pub fn view(&self) -> FetchState<SummaryView> {
        map_state(self.history.state(), |records| summarize(&records))
    }
}
