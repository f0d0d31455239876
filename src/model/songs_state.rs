//! Song collection state and its transitions.
//!
//! `SongsState::reduce` is the only way the collection changes. It performs
//! no I/O: every transition is a function of the prior state and the action.

use super::types::{ModalMode, Song, SongPage};

/// Fixed page size used for both the request limit and `total_pages`
pub const ITEMS_PER_PAGE: u32 = 10;

/// Song modal session. Only `Editing` carries a song, so a selected song
/// exists exactly when the modal is open in edit mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModalSession {
    #[default]
    Closed,
    Creating,
    Editing(Song),
}

/// Transitions accepted by the collection store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SongsAction {
    FetchStart,
    FetchSuccess(SongPage),
    FetchFailure(String),

    CreateStart,
    CreateSuccess(Song),
    CreateFailure(String),

    UpdateStart,
    UpdateSuccess(Song),
    UpdateFailure(String),

    DeleteStart,
    DeleteSuccess(String),
    DeleteFailure(String),

    SetPage(u32),
    OpenModal { mode: ModalMode, song: Option<Song> },
    CloseModal,
    ClearError,
}

impl SongsAction {
    /// Short name used in trace output
    pub fn name(&self) -> &'static str {
        match self {
            SongsAction::FetchStart => "fetch.start",
            SongsAction::FetchSuccess(_) => "fetch.success",
            SongsAction::FetchFailure(_) => "fetch.failure",
            SongsAction::CreateStart => "create.start",
            SongsAction::CreateSuccess(_) => "create.success",
            SongsAction::CreateFailure(_) => "create.failure",
            SongsAction::UpdateStart => "update.start",
            SongsAction::UpdateSuccess(_) => "update.success",
            SongsAction::UpdateFailure(_) => "update.failure",
            SongsAction::DeleteStart => "delete.start",
            SongsAction::DeleteSuccess(_) => "delete.success",
            SongsAction::DeleteFailure(_) => "delete.failure",
            SongsAction::SetPage(_) => "set_page",
            SongsAction::OpenModal { .. } => "open_modal",
            SongsAction::CloseModal => "close_modal",
            SongsAction::ClearError => "clear_error",
        }
    }
}

/// The current page of songs plus pagination, loading and modal state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongsState {
    pub songs: Vec<Song>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_songs: u64,
    pub modal: ModalSession,
}

impl Default for SongsState {
    fn default() -> Self {
        Self {
            songs: Vec::new(),
            loading: false,
            error: None,
            current_page: 1,
            total_pages: 1,
            total_songs: 0,
            modal: ModalSession::Closed,
        }
    }
}

impl SongsState {
    pub fn reduce(&mut self, action: SongsAction) {
        match action {
            SongsAction::FetchStart
            | SongsAction::CreateStart
            | SongsAction::UpdateStart
            | SongsAction::DeleteStart => {
                self.loading = true;
                self.error = None;
            }
            SongsAction::FetchSuccess(page) => {
                self.loading = false;
                self.songs = page.songs;
                self.total_songs = page.total;
                self.total_pages = total_pages_for(page.total);
            }
            // The list is only corrected by the follow-up fetch.
            SongsAction::CreateSuccess(_) => {
                self.loading = false;
                self.modal = ModalSession::Closed;
            }
            SongsAction::UpdateSuccess(_) => {
                self.loading = false;
                self.modal = ModalSession::Closed;
            }
            SongsAction::DeleteSuccess(_) => {
                self.loading = false;
            }
            SongsAction::FetchFailure(message)
            | SongsAction::CreateFailure(message)
            | SongsAction::UpdateFailure(message)
            | SongsAction::DeleteFailure(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            SongsAction::SetPage(page) => {
                self.current_page = page;
            }
            SongsAction::OpenModal { mode, song } => match (mode, song) {
                (ModalMode::Create, _) => self.modal = ModalSession::Creating,
                (ModalMode::Edit, Some(song)) => self.modal = ModalSession::Editing(song),
                // Nothing to edit; leave the session as it was.
                (ModalMode::Edit, None) => {}
            },
            SongsAction::CloseModal => {
                self.modal = ModalSession::Closed;
                self.error = None;
            }
            SongsAction::ClearError => {
                self.error = None;
            }
        }
    }

    pub fn is_modal_open(&self) -> bool {
        !matches!(self.modal, ModalSession::Closed)
    }

    /// Closed modals report `Create`, matching the mode a fresh open uses.
    pub fn modal_mode(&self) -> ModalMode {
        match self.modal {
            ModalSession::Editing(_) => ModalMode::Edit,
            ModalSession::Closed | ModalSession::Creating => ModalMode::Create,
        }
    }

    pub fn selected_song(&self) -> Option<&Song> {
        match &self.modal {
            ModalSession::Editing(song) => Some(song),
            _ => None,
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// `ceil(total / ITEMS_PER_PAGE)`; an empty library has zero pages.
pub fn total_pages_for(total: u64) -> u32 {
    let pages = total.div_ceil(u64::from(ITEMS_PER_PAGE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
