use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load started first; this result (if any) was dropped.
    Superseded,
}

/// Holds one view's remote data. Only the most recently started load may write it.
pub struct FetchController<T> {
    name: &'static str,
    generation: AtomicU64,
    debounce: Duration,
    state: watch::Sender<FetchState<T>>,
}

impl<T: Clone + Send + Sync> FetchController<T> {
    pub fn new(name: &'static str) -> Self {
        Self::with_debounce(name, Duration::ZERO)
    }

    pub fn with_debounce(name: &'static str, debounce: Duration) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            name,
            generation: AtomicU64::new(0),
            debounce,
            state,
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Runs `request` unless a newer load starts during the debounce window.
    /// Futures are lazy, so a superseded request is never sent.
    pub async fn load<F>(&self, request: F) -> LoadOutcome
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(FetchState::Loading);

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if !self.is_current(ticket) {
                debug!(view = self.name, ticket, "load superseded during debounce");
                return LoadOutcome::Superseded;
            }
        }

        let result = request.await;

        if !self.is_current(ticket) {
            debug!(view = self.name, ticket, "discarding stale response");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(data) => {
                self.state.send_replace(FetchState::Ready(data));
            }
            Err(e) => {
                debug!(view = self.name, "load failed: {}", e);
                self.state.send_replace(FetchState::Failed(e.user_message()));
            }
        }
        LoadOutcome::Applied
    }

    /// Mutates loaded data in place. Returns false when nothing is loaded.
    pub fn modify(&self, f: impl FnOnce(&mut T)) -> bool {
        self.state.send_if_modified(|state| match state {
            FetchState::Ready(data) => {
                f(data);
                true
            }
            _ => false,
        })
    }
}
