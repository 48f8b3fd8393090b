use std::sync::Arc;

use crate::api::JoluvApi;
use crate::fetch::{FetchController, FetchState};
use crate::models::{GraduationSimple, GraduationStatus};
use crate::progress::CreditProgress;

/// The total-credit bar and the major/general cards shared by home and score management.
pub struct CreditWidgets {
    api: Arc<dyn JoluvApi>,
    simple: FetchController<GraduationSimple>,
    status: FetchController<GraduationStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalCreditsView {
    pub major_name: String,
    pub progress: CreditProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EachCreditsView {
    pub major_credits: u32,
    pub general_credits: u32,
}

impl CreditWidgets {
    pub fn new(api: Arc<dyn JoluvApi>) -> Self {
        Self {
            api,
            simple: FetchController::new("graduation-simple"),
            status: FetchController::new("graduation-status"),
        }
    }

    pub async fn mount(&self) {
        tokio::join!(
            self.simple.load(self.api.graduation_simple()),
            self.status.load(self.api.graduation_status()),
        );
    }

    pub fn total(&self) -> FetchState<TotalCreditsView> {
        map_state(self.simple.state(), |s| TotalCreditsView {
            major_name: s.major_name,
            progress: CreditProgress::new(s.current_total, s.required_total),
        })
    }

    pub fn each(&self) -> FetchState<EachCreditsView> {
        map_state(self.status.state(), |s| EachCreditsView {
            major_credits: s.major_credits,
            general_credits: s.general_credits,
        })
    }
}

pub(crate) fn map_state<T, U>(state: FetchState<T>, f: impl FnOnce(T) -> U) -> FetchState<U> {
    match state {
        FetchState::Idle => FetchState::Idle,
        FetchState::Loading => FetchState::Loading,
        FetchState::Ready(data) => FetchState::Ready(f(data)),
        FetchState::Failed(msg) => FetchState::Failed(msg),
    }
}
