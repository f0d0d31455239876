//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Header with stats and key hints
//! - `song_table`: Song listing and error panel
//! - `pagination`: Page window and pagination bar
//! - `overlays`: Modal overlays (song form, delete confirmation, toasts)

mod utils;
mod layout;
mod song_table;
mod pagination;
mod overlays;

pub use pagination::{visible_pages, PageItem};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::ViewSnapshot;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot) {
        let songs = &snapshot.songs;
        let ui = &snapshot.ui;
        let show_pagination = songs.total_pages > 1;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                   // Header + stats
                Constraint::Min(0),                                      // Songs
                Constraint::Length(if show_pagination { 3 } else { 0 }), // Pagination
                Constraint::Length(1),                                   // Key hints
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], songs);

        // A failed fetch or mutation replaces the table unless the form is
        // showing it inline.
        match songs.error {
            Some(ref error) if !songs.is_modal_open() => {
                song_table::render_error_panel(frame, chunks[1], error);
            }
            _ => song_table::render_song_table(frame, chunks[1], songs, ui.selected_row),
        }

        if show_pagination {
            pagination::render_pagination(frame, chunks[2], songs);
        }

        layout::render_footer(frame, chunks[3], songs, ui.confirm_delete.is_some());

        if songs.is_modal_open() {
            if let Some(ref form) = ui.form {
                overlays::render_song_form(frame, songs, form);
            }
        } else if let Some(ref song) = ui.confirm_delete {
            overlays::render_delete_confirmation(frame, song);
        }

        // Toasts stay on top of everything
        overlays::render_notifications(frame, &snapshot.notifications);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::model::{AppModel, ModalMode, Severity, Song, SongForm, SongPage, SongsAction};

    fn rendered(model: &AppModel) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let snapshot = model.snapshot();
        terminal.draw(|f| AppView::render(f, &snapshot)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn song(n: u32) -> Song {
        Song {
            id: n.to_string(),
            title: format!("Track {n}"),
            artist: "The Band".to_string(),
            album: "Greatest Hits".to_string(),
            year: 2001,
            genre: "Pop".to_string(),
            duration: 185,
        }
    }

    #[test]
    fn renders_songs_and_pagination() {
        let model = AppModel::new();
        model.apply(SongsAction::FetchSuccess(SongPage {
            songs: (1..=3).map(song).collect(),
            total: 23,
            page: 1,
        }));
        let screen = rendered(&model);
        assert!(screen.contains("Track 1"));
        assert!(screen.contains("3:05"));
        assert!(screen.contains("Pages"));
    }

    #[test]
    fn renders_empty_state_without_pagination() {
        let model = AppModel::new();
        let screen = rendered(&model);
        assert!(screen.contains("No songs yet"));
        assert!(!screen.contains("Pages"));
    }

    #[test]
    fn error_panel_replaces_table() {
        let model = AppModel::new();
        model.apply(SongsAction::FetchSuccess(SongPage {
            songs: vec![song(1)],
            total: 1,
            page: 1,
        }));
        model.apply(SongsAction::FetchFailure("Network error".to_string()));
        let screen = rendered(&model);
        assert!(screen.contains("Network error"));
        assert!(!screen.contains("Track 1"));
    }

    #[test]
    fn form_and_toasts_are_drawn_on_top() {
        let model = AppModel::new();
        model.apply(SongsAction::OpenModal { mode: ModalMode::Create, song: None });
        model.update_ui(|ui| ui.form = Some(SongForm::blank(2026)));
        model.enqueue_notification(Severity::Success, Some("Song Added!".to_string()), "Saved", None);
        let screen = rendered(&model);
        assert!(screen.contains("Add New Song"));
        assert!(screen.contains("Song Added!"));
    }
}
