//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that turns user intents
//! into store transitions and background work. It is organized into
//! submodules by responsibility:
//!
//! - `effects`: Async routines behind each collection intent
//! - `notifications`: Toast queue with per-entry dismiss timers
//! - `input`: Key event handling

mod effects;
mod input;
mod notifications;

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::error::ApiError;
use crate::model::{AppModel, NotificationId, Song, SongDraft, SongsApi};

/// Start intents accepted by the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    FetchSongs,
    CreateSong(SongDraft),
    UpdateSong { id: String, data: SongDraft },
    /// `song` is only used to word the notification.
    DeleteSong { id: String, song: Song },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::FetchSongs => "fetch_songs",
            Intent::CreateSong(_) => "create_song",
            Intent::UpdateSong { .. } => "update_song",
            Intent::DeleteSong { .. } => "delete_song",
        }
    }
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) api: SongsApi,
    in_flight: Arc<watch::Sender<usize>>,
    timers: Arc<Mutex<HashMap<NotificationId, AbortHandle>>>,
}

/// Decrements the in-flight count when a routine ends, even on panic.
struct InFlightGuard(Arc<watch::Sender<usize>>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl AppController {
    pub fn new(model: AppModel, api: SongsApi) -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            model,
            api,
            in_flight: Arc::new(in_flight),
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Apply the start transition for `intent` and spawn its routine.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, intent: Intent) {
        tracing::debug!(intent = intent.name(), "Dispatching intent");
        let routine = self.start(intent);

        self.in_flight.send_modify(|n| *n += 1);
        let guard = InFlightGuard(self.in_flight.clone());
        let controller = self.clone();
        tokio::spawn(async move {
            let _guard = guard;
            controller.run(routine).await;
        });
    }

    /// Number of routines started but not yet finished
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Wait until every dispatched routine, follow-up fetches included,
    /// has finished.
    pub async fn settle(&self) {
        let mut rx = self.in_flight.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    pub(crate) fn format_error(error: &ApiError) -> String {
        tracing::debug!(kind = error.kind(), "Surfacing API error");
        error.message().to_string()
    }
}
