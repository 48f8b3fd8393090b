use crate::fetch::FetchState;
use crate::pages::credits::{CreditWidgets, EachCreditsView, TotalCreditsView};
use crate::router::Route;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavCard {
    pub title: &'static str,
    pub route: Route,
}

pub const NAV_CARDS: [NavCard; 4] = [
    NavCard {
        title: "My courses",
        route: Route::ScoreManagement,
    },
    NavCard {
        title: "Graduation check",
        route: Route::Checklist,
    },
    NavCard {
        title: "Credit records",
        route: Route::Summary,
    },
    NavCard {
        title: "My page",
        route: Route::MyPage,
    },
];

pub struct HomePage {
    state: AppState,
    credits: CreditWidgets,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub cards: Vec<NavCard>,
    /// `None` when logged out; the credit section is only shown with a session.
    pub credits: Option<(FetchState<TotalCreditsView>, FetchState<EachCreditsView>)>,
}

impl HomePage {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            credits: CreditWidgets::new(state.api.clone()),
        }
    }

    pub async fn mount(&self) {
        if self.state.session.is_logged_in() {
            self.credits.mount().await;
        }
    }

    pub fn view(&self) -> HomeView {
        let credits = self
            .state
            .session
            .is_logged_in()
            .then(|| (self.credits.total(), self.credits.each()));
        HomeView {
            cards: NAV_CARDS.to_vec(),
            credits,
        }
    }
}
