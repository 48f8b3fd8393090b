use std::collections::HashSet;
use std::sync::Arc;

use crate::api::JoluvApi;
use crate::fetch::{FetchController, FetchState, LoadOutcome};
use crate::models::{CountedCourse, GraduationCheckItem, Track};
use crate::pages::credits::map_state;
use crate::progress::{CreditProgress, RequirementStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct RequirementRow {
    pub title: String,
    pub progress: String,
    pub status: RequirementStatus,
    pub percentage: f64,
    pub message: Option<String>,
    pub details: Vec<CountedCourse>,
    pub expanded: bool,
}

impl RequirementRow {
    pub fn from_item(item: &GraduationCheckItem, expanded: bool) -> Self {
        let progress = CreditProgress::new(item.current, item.required);
        Self {
            title: item.category.clone(),
            progress: format!("{} / {}", item.current, item.required),
            status: RequirementStatus::of(item),
            percentage: progress.percentage(),
            message: item.message.clone(),
            details: item.courses.clone(),
            expanded: expanded && !item.courses.is_empty(),
        }
    }

    pub fn is_expandable(&self) -> bool {
        !self.details.is_empty()
    }
}

pub struct ChecklistPage {
    api: Arc<dyn JoluvApi>,
    track: Track,
    items: FetchController<Vec<GraduationCheckItem>>,
    expanded: HashSet<String>,
}

impl ChecklistPage {
    pub fn new(api: Arc<dyn JoluvApi>, track: Track) -> Self {
        Self {
            api,
            track,
            items: FetchController::new("graduation-check"),
            expanded: HashSet::new(),
        }
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub async fn mount(&self) -> LoadOutcome {
        self.items.load(self.api.graduation_check(self.track)).await
    }

    /// Switching track re-fetches; expanded rows belong to the old track and are reset.
    pub async fn select_track(&mut self, track: Track) -> LoadOutcome {
        self.track = track;
        self.expanded.clear();
        self.mount().await
    }

    /// Rows without counted courses do not expand.
    pub fn toggle(&mut self, title: &str) -> bool {
        let expandable = self
            .items
            .data()
            .map(|items| items.iter().any(|i| i.category == title && !i.courses.is_empty()))
            .unwrap_or(false);
        if !expandable {
            return false;
        }
        if !self.expanded.remove(title) {
            self.expanded.insert(title.to_string());
        }
        true
    }

    pub fn expand_all(&mut self) {
        if let Some(items) = self.items.data() {
            self.expanded = items
                .iter()
                .filter(|i| !i.courses.is_empty())
                .map(|i| i.category.clone())
                .collect();
        }
    }

    pub fn rows(&self) -> FetchState<Vec<RequirementRow>> {
        map_state(self.items.state(), |items| {
            items
                .iter()
                .map(|item| RequirementRow::from_item(item, self.expanded.contains(&item.category)))
                .collect()
        })
    }
}
