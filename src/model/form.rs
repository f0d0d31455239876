//! Song form state and field validation

use std::collections::BTreeMap;

use super::types::{Song, SongDraft, GENRES};

pub const MIN_YEAR: i32 = 1900;
pub const MIN_DURATION: u32 = 1;
pub const MAX_DURATION: u32 = 3600;
const DEFAULT_DURATION: u32 = 180;

/// Fields of the song form, in tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FormField {
    #[default]
    Title,
    Artist,
    Album,
    Genre,
    Year,
    Duration,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Artist,
        FormField::Album,
        FormField::Genre,
        FormField::Year,
        FormField::Duration,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Artist,
            Self::Artist => Self::Album,
            Self::Album => Self::Genre,
            Self::Genre => Self::Year,
            Self::Year => Self::Duration,
            Self::Duration => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Duration,
            Self::Artist => Self::Title,
            Self::Album => Self::Artist,
            Self::Genre => Self::Album,
            Self::Year => Self::Genre,
            Self::Duration => Self::Year,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::Album => "Album",
            Self::Genre => "Genre",
            Self::Year => "Year",
            Self::Duration => "Duration (seconds)",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, Self::Year | Self::Duration)
    }
}

pub type FieldErrors = BTreeMap<FormField, String>;

/// Editable text of the song form plus per-field error messages
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongForm {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: String,
    pub duration: String,
    pub focused: FormField,
    pub errors: FieldErrors,
}

impl SongForm {
    pub fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            genre: String::new(),
            year: current_year.to_string(),
            duration: DEFAULT_DURATION.to_string(),
            focused: FormField::Title,
            errors: FieldErrors::new(),
        }
    }

    pub fn from_song(song: &Song, current_year: i32) -> Self {
        let draft = song.to_draft();
        let year = if draft.year == 0 { current_year } else { draft.year };
        let duration = if draft.duration == 0 { DEFAULT_DURATION } else { draft.duration };
        Self {
            title: draft.title,
            artist: draft.artist,
            album: draft.album,
            genre: draft.genre,
            year: year.to_string(),
            duration: duration.to_string(),
            focused: FormField::Title,
            errors: FieldErrors::new(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Artist => &self.artist,
            FormField::Album => &self.album,
            FormField::Genre => &self.genre,
            FormField::Year => &self.year,
            FormField::Duration => &self.duration,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Artist => &mut self.artist,
            FormField::Album => &mut self.album,
            FormField::Genre => &mut self.genre,
            FormField::Year => &mut self.year,
            FormField::Duration => &mut self.duration,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Type into the focused field. Numeric fields only take digits; the
    /// genre field is picked with `cycle_genre` instead.
    pub fn insert_char(&mut self, c: char) {
        let field = self.focused;
        if field == FormField::Genre || (field.is_numeric() && !c.is_ascii_digit()) {
            return;
        }
        self.value_mut(field).push(c);
        self.errors.remove(&field);
    }

    pub fn backspace(&mut self) {
        let field = self.focused;
        self.value_mut(field).pop();
        self.errors.remove(&field);
    }

    /// Step through `GENRES`. A genre outside the list restarts at either end.
    pub fn cycle_genre(&mut self, forward: bool) {
        let next = match GENRES.iter().position(|g| *g == self.genre) {
            Some(i) if forward => (i + 1) % GENRES.len(),
            Some(i) => (i + GENRES.len() - 1) % GENRES.len(),
            None if forward => 0,
            None => GENRES.len() - 1,
        };
        self.genre = GENRES[next].to_string();
        self.errors.remove(&FormField::Genre);
    }

    /// Validate every field, store the messages on the form and return the
    /// draft when there are none.
    pub fn submit(&mut self, current_year: i32) -> Option<SongDraft> {
        match validate(self, current_year) {
            Ok(draft) => {
                self.errors.clear();
                Some(draft)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

pub fn validate(form: &SongForm, current_year: i32) -> Result<SongDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    for (field, message) in [
        (FormField::Title, "Title is required"),
        (FormField::Artist, "Artist is required"),
        (FormField::Album, "Album is required"),
        (FormField::Genre, "Genre is required"),
    ] {
        if form.value(field).trim().is_empty() {
            errors.insert(field, message.to_string());
        }
    }

    let year = form
        .year
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (MIN_YEAR..=current_year).contains(y));
    if year.is_none() {
        errors.insert(
            FormField::Year,
            format!("Year must be between {MIN_YEAR} and {current_year}"),
        );
    }

    let duration = form
        .duration
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|d| (MIN_DURATION..=MAX_DURATION).contains(d));
    if duration.is_none() {
        errors.insert(
            FormField::Duration,
            format!("Duration must be between {MIN_DURATION} and {MAX_DURATION} seconds"),
        );
    }

    match (year, duration) {
        (Some(year), Some(duration)) if errors.is_empty() => Ok(SongDraft {
            title: form.title.trim().to_string(),
            artist: form.artist.trim().to_string(),
            album: form.album.trim().to_string(),
            genre: form.genre.trim().to_string(),
            year,
            duration,
        }),
        _ => Err(errors),
    }
}
