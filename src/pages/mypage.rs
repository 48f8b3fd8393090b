use std::sync::Arc;

use tracing::info;

use crate::api::JoluvApi;
use crate::error::{AppError, AppResult};
use crate::fetch::{FetchController, FetchState, LoadOutcome};
use crate::models::{Activity, ActivityRequest, GraduationCheckItem, ProfileEdit, Track, UserProfile};
use crate::pages::checklist::RequirementRow;
use crate::pages::credits::map_state;
use crate::pages::{ActionOutcome, PendingRows, RowAction};

/// Key under which a create is tracked; new activities have no id yet.
const NEW_ACTIVITY: &str = "__new__";

pub struct MyPage {
    api: Arc<dyn JoluvApi>,
    profile: FetchController<UserProfile>,
    checklist: FetchController<Vec<GraduationCheckItem>>,
    activities: FetchController<Vec<Activity>>,
    pending: PendingRows,
}

impl MyPage {
    pub fn new(api: Arc<dyn JoluvApi>) -> Self {
        Self {
            api,
            profile: FetchController::new("profile"),
            checklist: FetchController::new("profile-checklist"),
            activities: FetchController::new("activities"),
            pending: PendingRows::default(),
        }
    }

    /// Loads the profile first; its track picks which checklist to show.
    pub async fn mount(&self) {
        self.load_profile().await;
        let track = self
            .profile
            .data()
            .and_then(|p| p.track)
            .and_then(|t| Track::from_param(&t))
            .unwrap_or_default();
        tokio::join!(
            self.checklist.load(self.api.graduation_check(track)),
            self.load_activities(),
        );
    }

    pub async fn load_profile(&self) -> LoadOutcome {
        self.profile.load(self.api.fetch_profile()).await
    }

    pub async fn load_activities(&self) -> LoadOutcome {
        self.activities.load(self.api.list_activities()).await
    }

    pub fn profile(&self) -> FetchState<UserProfile> {
        self.profile.state()
    }

    pub fn checklist(&self) -> FetchState<Vec<RequirementRow>> {
        map_state(self.checklist.state(), |items| {
            items
                .iter()
                .map(|item| RequirementRow::from_item(item, false))
                .collect()
        })
    }

    pub fn activities(&self) -> FetchState<Vec<Activity>> {
        self.activities.state()
    }

    pub fn is_pending(&self, activity_id: &str) -> bool {
        self.pending.get(activity_id).is_some()
    }

    /// Creates an activity; the created record comes back with `Done`.
    pub async fn add_activity(
        &self,
        request: &ActivityRequest,
    ) -> AppResult<(ActionOutcome, Option<Activity>)> {
        request.validate().map_err(AppError::Validation)?;
        let Some(_guard) = self.pending.begin(NEW_ACTIVITY, RowAction::Adding) else {
            return Ok((ActionOutcome::Busy, None));
        };

        let created = self.api.create_activity(request).await?;
        info!("created activity {}", created.id);
        self.activities.modify(|list| list.push(created.clone()));
        Ok((ActionOutcome::Done, Some(created)))
    }

    pub async fn edit_activity(&self, id: &str, request: &ActivityRequest) -> AppResult<ActionOutcome> {
        request.validate().map_err(AppError::Validation)?;
        let Some(_guard) = self.pending.begin(id, RowAction::Updating) else {
            return Ok(ActionOutcome::Busy);
        };

        let updated = self.api.update_activity(id, request).await?;
        self.activities.modify(|list| {
            for activity in list.iter_mut() {
                if activity.id == id {
                    *activity = updated.clone();
                }
            }
        });
        Ok(ActionOutcome::Done)
    }

    pub async fn delete_activity(&self, id: &str) -> AppResult<ActionOutcome> {
        let Some(_guard) = self.pending.begin(id, RowAction::Removing) else {
            return Ok(ActionOutcome::Busy);
        };

        self.api.delete_activity(id).await?;
        info!("deleted activity {}", id);
        self.activities.modify(|list| list.retain(|a| a.id != id));
        Ok(ActionOutcome::Done)
    }

    /// Applies `edit` to the loaded profile and submits the whole record.
    pub async fn update_profile(&self, edit: &ProfileEdit) -> AppResult<UserProfile> {
        if edit.is_empty() {
            return Err(AppError::Validation("Nothing to update.".to_string()));
        }
        let current = self
            .profile
            .data()
            .ok_or_else(|| AppError::Validation("Profile is not loaded yet.".to_string()))?;

        let saved = self.api.update_profile(&edit.apply(&current)).await?;
        self.profile.modify(|profile| *profile = saved.clone());
        Ok(saved)
    }
}
