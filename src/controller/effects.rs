//! Async routines behind each collection intent

use crate::model::{Severity, Song, SongDraft, SongsAction, ITEMS_PER_PAGE};
use super::{AppController, Intent};

/// Work captured at dispatch time, run later on the runtime
pub(super) enum Routine {
    Fetch { page: u32 },
    Create(SongDraft),
    Update { id: String, data: SongDraft },
    Delete { id: String, song: Song },
}

impl AppController {
    /// Apply the start transition and capture what the routine needs.
    pub(super) fn start(&self, intent: Intent) -> Routine {
        match intent {
            Intent::FetchSongs => {
                let page = self.model.apply_and_read_page(SongsAction::FetchStart);
                Routine::Fetch { page }
            }
            Intent::CreateSong(draft) => {
                self.model.apply(SongsAction::CreateStart);
                Routine::Create(draft)
            }
            Intent::UpdateSong { id, data } => {
                self.model.apply(SongsAction::UpdateStart);
                Routine::Update { id, data }
            }
            Intent::DeleteSong { id, song } => {
                self.model.apply(SongsAction::DeleteStart);
                Routine::Delete { id, song }
            }
        }
    }

    pub(super) async fn run(&self, routine: Routine) {
        match routine {
            Routine::Fetch { page } => self.fetch_songs(page).await,
            Routine::Create(draft) => self.create_song(draft).await,
            Routine::Update { id, data } => self.update_song(id, data).await,
            Routine::Delete { id, song } => self.delete_song(id, song).await,
        }
    }

    async fn fetch_songs(&self, page: u32) {
        match self.api.list(page, ITEMS_PER_PAGE).await {
            Ok(page) => {
                tracing::debug!(page = page.page, count = page.songs.len(), total = page.total, "Songs loaded");
                self.model.apply(SongsAction::FetchSuccess(page));
            }
            Err(e) => {
                self.model.apply(SongsAction::FetchFailure(Self::format_error(&e)));
            }
        }
    }

    async fn create_song(&self, draft: SongDraft) {
        match self.api.create(&draft).await {
            Ok(song) => {
                tracing::info!(id = %song.id, title = %draft.title, "Song created");
                // Worded from what was submitted; the reply may be partial.
                let message = format!(
                    "\"{}\" by {} has been added to your collection.",
                    draft.title, draft.artist
                );
                self.model.apply(SongsAction::CreateSuccess(song));
                self.notify_with_title(Severity::Success, "Song Added!", message);
                self.dispatch(Intent::FetchSongs);
            }
            Err(e) => {
                let message = Self::format_error(&e);
                self.model.apply(SongsAction::CreateFailure(message.clone()));
                self.notify_with_title(
                    Severity::Error,
                    "Failed to Add Song",
                    or_fallback(message, "Unable to add the song. Please try again."),
                );
            }
        }
    }

    async fn update_song(&self, id: String, data: SongDraft) {
        match self.api.update(&id, &data).await {
            Ok(song) => {
                tracing::info!(id = %id, title = %data.title, "Song updated");
                let message = format!("\"{}\" has been successfully updated.", data.title);
                self.model.apply(SongsAction::UpdateSuccess(song));
                self.notify_with_title(Severity::Success, "Song Updated!", message);
                self.dispatch(Intent::FetchSongs);
            }
            Err(e) => {
                let message = Self::format_error(&e);
                self.model.apply(SongsAction::UpdateFailure(message.clone()));
                self.notify_with_title(
                    Severity::Error,
                    "Failed to Update Song",
                    or_fallback(message, "Unable to update the song. Please try again."),
                );
            }
        }
    }

    async fn delete_song(&self, id: String, song: Song) {
        match self.api.delete(&id).await {
            Ok(()) => {
                tracing::info!(id = %id, title = %song.title, "Song deleted");
                self.model.apply(SongsAction::DeleteSuccess(id));
                self.notify_with_title(
                    Severity::Success,
                    "Song Deleted!",
                    format!(
                        "\"{}\" by {} has been removed from your collection.",
                        song.title, song.artist
                    ),
                );
                self.dispatch(Intent::FetchSongs);
            }
            Err(e) => {
                let message = Self::format_error(&e);
                self.model.apply(SongsAction::DeleteFailure(message.clone()));
                self.notify_with_title(
                    Severity::Error,
                    "Failed to Delete Song",
                    or_fallback(message, "Unable to delete the song. Please try again."),
                );
            }
        }
    }
}

fn or_fallback(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
