use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    Checklist,
    Summary,
    ScoreManagement,
    MyPage,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Login,
        Route::Signup,
        Route::Checklist,
        Route::Summary,
        Route::ScoreManagement,
        Route::MyPage,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Checklist => "/checklist",
            Route::Summary => "/summary",
            Route::ScoreManagement => "/score-management",
            Route::MyPage => "/mypage",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "JOLUV",
            Route::Login => "Log in",
            Route::Signup => "Sign up",
            Route::Checklist => "Graduation checklist",
            Route::Summary => "Credit summary",
            Route::ScoreManagement => "My courses",
            Route::MyPage => "My page",
        }
    }

    /// Pages that call authenticated endpoints sit behind the login guard.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Checklist | Route::Summary | Route::ScoreManagement | Route::MyPage
        )
    }

    pub fn from_path(raw: &str) -> Option<Route> {
        let normalized = normalize(raw);
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

/// Strips query, fragment and trailing slashes; always starts with `/`.
pub fn normalize(raw: &str) -> String {
    let path = raw
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim()
        .trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_ascii_lowercase()
    } else {
        format!("/{}", path.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect { to: Route, from: Route },
    NotFound(String),
}

pub fn resolve(path: &str, session: &Session) -> Resolution {
    match Route::from_path(path) {
        Some(route) if route.is_protected() && !session.is_logged_in => Resolution::Redirect {
            to: Route::Login,
            from: route,
        },
        Some(route) => Resolution::Render(route),
        None => Resolution::NotFound(normalize(path)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, route: Route },
    Logout,
}

/// Header links; the last entry flips between Login and Logout.
pub fn header_links(session: &Session) -> Vec<NavItem> {
    let mut items = vec![
        NavItem::Link {
            label: "My courses",
            route: Route::ScoreManagement,
        },
        NavItem::Link {
            label: "Graduation checklist",
            route: Route::Checklist,
        },
        NavItem::Link {
            label: "Credit summary",
            route: Route::Summary,
        },
        NavItem::Link {
            label: "My page",
            route: Route::MyPage,
        },
    ];
    if session.is_logged_in {
        items.push(NavItem::Logout);
    } else {
        items.push(NavItem::Link {
            label: "Login",
            route: Route::Login,
        });
    }
    items
}
