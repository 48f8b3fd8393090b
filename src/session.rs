use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_logged_in: bool,
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub logged_in_at: Option<DateTime<Utc>>,
}

/// On-disk copy of the session.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes through a temp file, then renames it over the old copy.
    pub fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = self.path.with_extension("tmp");
        let mut f = fs::File::create(&temp)?;
        f.write_all(serde_json::to_string_pretty(session)?.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.path)?;
        Ok(())
    }

    pub fn remove(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Sole writer of the login state. Readers subscribe; only `login`/`logout` mutate.
pub struct SessionStore {
    file: SessionFile,
    tx: watch::Sender<Session>,
}

impl SessionStore {
    /// Reads the persisted session once. Missing or unreadable files start logged out.
    pub fn hydrate(file: SessionFile) -> Self {
        let session = match file.load() {
            Ok(Some(s)) if s.is_logged_in && s.user_id.is_some() => s,
            Ok(_) => Session::default(),
            Err(e) => {
                warn!("ignoring unreadable session file {}: {}", file.path().display(), e);
                Session::default()
            }
        };
        let (tx, _) = watch::channel(session);
        Self { file, tx }
    }

    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.tx.borrow().is_logged_in
    }

    pub fn user_id(&self) -> Option<String> {
        self.tx.borrow().user_id.clone()
    }

    pub fn session_id(&self) -> Option<String> {
        self.tx.borrow().session_id.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Saves to disk, then publishes to subscribers.
    pub fn login(&self, user_id: impl Into<String>, session_id: Option<String>) -> Result<(), AppError> {
        let session = Session {
            is_logged_in: true,
            user_id: Some(user_id.into()),
            session_id,
            logged_in_at: Some(Utc::now()),
        };
        self.file.save(&session)?;
        info!("logged in as {}", session.user_id.as_deref().unwrap_or_default());
        self.tx.send_replace(session);
        Ok(())
    }

    /// Always resets the in-memory session; a failed file removal is still returned.
    pub fn logout(&self) -> Result<(), AppError> {
        let removed = self.file.remove();
        self.tx.send_replace(Session::default());
        info!("logged out");
        removed
    }
}
