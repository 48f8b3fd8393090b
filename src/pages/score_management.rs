use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::api::JoluvApi;
use crate::error::AppResult;
use crate::fetch::{FetchController, FetchState, LoadOutcome};
use crate::grade::Grade;
use crate::models::{CourseRecord, Lecture, LectureFilter, RegisterCourseRequest, UpdateCourseRequest};
use crate::pages::credits::{CreditWidgets, map_state};
use crate::pages::{ActionOutcome, PendingRows, RowAction};
use crate::paging::{MY_COURSES_PAGE_SIZE, PageView, SEARCH_PAGE_SIZE};
use crate::state::AppState;

/// State of the add button on a search-result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowButton {
    Add,
    Added,
    Pending(RowAction),
}

impl RowButton {
    pub fn is_enabled(&self) -> bool {
        matches!(self, RowButton::Add)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LectureRow {
    pub lecture: Lecture,
    pub button: RowButton,
}

pub struct ScoreManagementPage {
    api: Arc<dyn JoluvApi>,
    pub credits: CreditWidgets,
    history: FetchController<Vec<CourseRecord>>,
    results: FetchController<Vec<Lecture>>,
    filter: Mutex<LectureFilter>,
    pending: PendingRows,
}

impl ScoreManagementPage {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            credits: CreditWidgets::new(state.api.clone()),
            history: FetchController::new("course-history"),
            results: FetchController::with_debounce("lecture-search", state.config.search_debounce),
            filter: Mutex::new(LectureFilter::default()),
            pending: PendingRows::default(),
        }
    }

    pub async fn mount(&self) {
        tokio::join!(self.credits.mount(), self.load_history(), self.search());
    }

    pub async fn load_history(&self) -> LoadOutcome {
        self.history.load(self.api.fetch_course_history()).await
    }

    pub fn filter(&self) -> LectureFilter {
        self.filter.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replaces the filter and re-runs the search; older in-flight searches lose.
    pub async fn set_filter(&self, filter: LectureFilter) -> LoadOutcome {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner) = filter;
        self.search().await
    }

    pub async fn search(&self) -> LoadOutcome {
        let filter = self.filter();
        let api = self.api.clone();
        self.results
            .load(async move { api.search_lectures(&filter).await })
            .await
    }

    pub fn history(&self) -> FetchState<Vec<CourseRecord>> {
        self.history.state()
    }

    pub fn results(&self) -> FetchState<Vec<Lecture>> {
        self.results.state()
    }

    pub fn my_courses_page(&self, page: usize) -> FetchState<PageView<CourseRecord>> {
        map_state(self.history.state(), |records| {
            PageView::of(&records, MY_COURSES_PAGE_SIZE, page)
        })
    }

    pub fn results_page(&self, page: usize) -> FetchState<PageView<LectureRow>> {
        map_state(self.results.state(), |lectures| {
            let rows: Vec<LectureRow> = lectures
                .into_iter()
                .map(|lecture| LectureRow {
                    button: self.button_for(&lecture.lecture_id),
                    lecture,
                })
                .collect();
            PageView::of(&rows, SEARCH_PAGE_SIZE, page)
        })
    }

    fn is_added(&self, lecture_id: &str) -> bool {
        self.history
            .data()
            .is_some_and(|records| records.iter().any(|r| r.lecture_id == lecture_id))
    }

    pub fn button_for(&self, lecture_id: &str) -> RowButton {
        if let Some(action) = self.pending.get(lecture_id) {
            RowButton::Pending(action)
        } else if self.is_added(lecture_id) {
            RowButton::Added
        } else {
            RowButton::Add
        }
    }

    /// Registers a lecture. The record the backend returns is appended locally.
    pub async fn add_course(&self, lecture_id: &str, grade: Option<Grade>) -> AppResult<ActionOutcome> {
        if self.is_added(lecture_id) {
            debug!("{} is already registered", lecture_id);
            return Ok(ActionOutcome::Unchanged);
        }
        let Some(_guard) = self.pending.begin(lecture_id, RowAction::Adding) else {
            return Ok(ActionOutcome::Busy);
        };

        let request = RegisterCourseRequest {
            lecture_id: lecture_id.to_string(),
            received_grade: grade.map(|g| g.label().to_string()),
            score: grade.and_then(|g| g.point()),
        };
        let record = self.api.register_course(&request).await?;
        info!("registered course {}", record.lecture_id);
        self.history.modify(|records| {
            if !records.iter().any(|r| r.lecture_id == record.lecture_id) {
                records.push(record);
            }
        });
        Ok(ActionOutcome::Done)
    }

    pub async fn remove_course(&self, lecture_id: &str) -> AppResult<ActionOutcome> {
        if self.history.data().is_some() && !self.is_added(lecture_id) {
            return Ok(ActionOutcome::Unchanged);
        }
        let Some(_guard) = self.pending.begin(lecture_id, RowAction::Removing) else {
            return Ok(ActionOutcome::Busy);
        };

        self.api.delete_course(lecture_id).await?;
        info!("removed course {}", lecture_id);
        self.history
            .modify(|records| records.retain(|r| r.lecture_id != lecture_id));
        Ok(ActionOutcome::Done)
    }

    pub async fn update_grade(&self, lecture_id: &str, grade: Grade) -> AppResult<ActionOutcome> {
        let Some(_guard) = self.pending.begin(lecture_id, RowAction::Updating) else {
            return Ok(ActionOutcome::Busy);
        };

        let request = UpdateCourseRequest {
            lecture_id: lecture_id.to_string(),
            received_grade: grade.label().to_string(),
            score: grade.point(),
        };
        let updated = self.api.update_course(&request).await?;
        self.history.modify(|records| {
            for record in records.iter_mut() {
                if record.lecture_id == updated.lecture_id {
                    *record = updated.clone();
                }
            }
        });
        Ok(ActionOutcome::Done)
    }
}
