//! Key event handling

use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{FormField, ModalMode, Severity, SongForm, SongsAction};
use super::{AppController, Intent};

fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl AppController {
    pub fn handle_key_event(&self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.model.set_should_quit(true);
            return;
        }

        // Song form (blocks all other interactions)
        if self.model.songs().is_modal_open() {
            self.handle_form_key(key);
            return;
        }

        // Delete confirmation
        if let Some(song) = self.model.ui_state().confirm_delete {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.model.update_ui(|ui| ui.confirm_delete = None);
                    self.dispatch(Intent::DeleteSong { id: song.id.clone(), song });
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.model.update_ui(|ui| ui.confirm_delete = None);
                }
                _ => {}
            }
            return;
        }

        let songs = self.model.songs();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true),
            KeyCode::Up | KeyCode::Char('k') => self.model.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.model.move_selection_down(),
            KeyCode::Left | KeyCode::Char('[') => {
                if songs.has_previous_page() {
                    self.go_to_page(songs.current_page - 1);
                }
            }
            KeyCode::Right | KeyCode::Char(']') => {
                if songs.has_next_page() {
                    self.go_to_page(songs.current_page + 1);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => self.open_create_form(),
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => self.open_edit_form(),
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(song) = self.model.selected_song() {
                    self.model.update_ui(|ui| ui.confirm_delete = Some(song));
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.model.apply(SongsAction::ClearError);
                self.dispatch(Intent::FetchSongs);
            }
            KeyCode::Char('x') => self.dismiss_newest_notification(),
            KeyCode::Char('X') => self.clear_notifications(),
            KeyCode::Char('1') => {
                self.notify(Severity::Success, "This is a success notification.");
            }
            KeyCode::Char('2') => {
                self.notify(Severity::Error, "This is an error notification.");
            }
            KeyCode::Char('3') => {
                self.notify(Severity::Warning, "This is a warning notification.");
            }
            KeyCode::Char('4') => {
                self.notify(Severity::Info, "This is an info notification.");
            }
            _ => {}
        }
    }

    fn handle_form_key(&self, key: KeyEvent) {
        let songs = self.model.songs();

        match key.code {
            KeyCode::Esc => {
                self.model.apply(SongsAction::CloseModal);
                self.model.update_ui(|ui| ui.form = None);
            }
            KeyCode::Enter => {
                // A submit is already on its way.
                if songs.loading {
                    return;
                }
                let year = current_year();
                let Some(draft) = self
                    .model
                    .update_ui(|ui| ui.form.as_mut().and_then(|form| form.submit(year)))
                else {
                    return;
                };
                match songs.selected_song() {
                    Some(song) => self.dispatch(Intent::UpdateSong {
                        id: song.id.clone(),
                        data: draft,
                    }),
                    None => self.dispatch(Intent::CreateSong(draft)),
                }
            }
            code => self.model.update_ui(|ui| {
                let Some(form) = ui.form.as_mut() else {
                    return;
                };
                match code {
                    KeyCode::Tab => form.focus_next(),
                    KeyCode::BackTab => form.focus_prev(),
                    KeyCode::Left if form.focused == FormField::Genre => form.cycle_genre(false),
                    KeyCode::Right if form.focused == FormField::Genre => form.cycle_genre(true),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Char(c) => form.insert_char(c),
                    _ => {}
                }
            }),
        }
    }

    fn go_to_page(&self, page: u32) {
        tracing::debug!(page, "Changing page");
        self.model.apply(SongsAction::SetPage(page));
        self.model.update_ui(|ui| ui.selected_row = 0);
        self.dispatch(Intent::FetchSongs);
    }

    fn open_create_form(&self) {
        self.model.apply(SongsAction::OpenModal {
            mode: ModalMode::Create,
            song: None,
        });
        let form = SongForm::blank(current_year());
        self.model.update_ui(|ui| ui.form = Some(form));
    }

    fn open_edit_form(&self) {
        let Some(song) = self.model.selected_song() else {
            return;
        };
        let form = SongForm::from_song(&song, current_year());
        self.model.apply(SongsAction::OpenModal {
            mode: ModalMode::Edit,
            song: Some(song),
        });
        self.model.update_ui(|ui| ui.form = Some(form));
    }
}
