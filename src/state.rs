use std::sync::Arc;

use crate::api::{HttpApi, JoluvApi};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::session::{SessionFile, SessionStore};

/// Handles every page receives: config, the backend client and the session store.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<dyn JoluvApi>,
    pub session: Arc<SessionStore>,
}

impl AppState {
    /// Hydrates the session from disk, then builds an HTTP client carrying its cookie.
    pub fn bootstrap(config: AppConfig) -> Result<Self, AppError> {
        let session = SessionStore::hydrate(SessionFile::new(config.session_file()));
        let api = HttpApi::new(&config, session.session_id().as_deref())?;
        Ok(Self {
            config,
            api: Arc::new(api),
            session: Arc::new(session),
        })
    }

    pub fn new(config: AppConfig, api: Arc<dyn JoluvApi>, session: SessionStore) -> Self {
        Self {
            config,
            api,
            session: Arc::new(session),
        }
    }
}
