//! Main application model with state management

use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;

use super::form::SongForm;
use super::notifications::{Notification, NotificationId, NotificationQueue, Severity};
use super::songs_state::{SongsAction, SongsState};
use super::types::Song;

/// View-only state that never reaches the store
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub selected_row: usize,
    pub form: Option<SongForm>,
    pub confirm_delete: Option<Song>,
    pub should_quit: bool,
}

/// Everything the view needs for one frame
#[derive(Clone, Debug)]
pub struct ViewSnapshot {
    pub songs: SongsState,
    pub notifications: Vec<Notification>,
    pub ui: UiState,
}

/// Shared application state. Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct AppModel {
    songs: Arc<Mutex<SongsState>>,
    notifications: Arc<Mutex<NotificationQueue>>,
    ui: Arc<Mutex<UiState>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Song collection
    // ========================================================================

    /// Apply one transition under a single lock acquisition.
    pub fn apply(&self, action: SongsAction) {
        tracing::trace!(action = action.name(), "Applying transition");
        self.songs.lock().reduce(action);
    }

    /// Apply a transition and read the current page under the same lock.
    pub fn apply_and_read_page(&self, action: SongsAction) -> u32 {
        tracing::trace!(action = action.name(), "Applying transition");
        let mut songs = self.songs.lock();
        songs.reduce(action);
        songs.current_page
    }

    pub fn songs(&self) -> SongsState {
        self.songs.lock().clone()
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn enqueue_notification(
        &self,
        severity: Severity,
        title: Option<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> NotificationId {
        self.notifications.lock().enqueue(severity, title, message, duration)
    }

    pub fn dismiss_notification(&self, id: NotificationId) -> bool {
        self.notifications.lock().dismiss(id)
    }

    pub fn clear_notifications(&self) {
        self.notifications.lock().clear_all();
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().newest_first()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.lock().len()
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub fn ui_state(&self) -> UiState {
        self.ui.lock().clone()
    }

    pub fn update_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        f(&mut self.ui.lock())
    }

    pub fn should_quit(&self) -> bool {
        self.ui.lock().should_quit
    }

    pub fn set_should_quit(&self, quit: bool) {
        self.ui.lock().should_quit = quit;
    }

    pub fn move_selection_up(&self) {
        let mut ui = self.ui.lock();
        ui.selected_row = ui.selected_row.saturating_sub(1);
    }

    pub fn move_selection_down(&self) {
        let len = self.songs.lock().songs.len();
        let mut ui = self.ui.lock();
        if ui.selected_row < len.saturating_sub(1) {
            ui.selected_row += 1;
        }
    }

    /// Song under the cursor, clamped to the current page.
    pub fn selected_song(&self) -> Option<Song> {
        let songs = self.songs.lock();
        let row = self.ui.lock().selected_row;
        songs
            .songs
            .get(row.min(songs.songs.len().saturating_sub(1)))
            .cloned()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            songs: self.songs(),
            notifications: self.notifications(),
            ui: self.ui_state(),
        }
    }
}
