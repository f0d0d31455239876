//! Core type definitions for the application

use serde::{Deserialize, Deserializer, Serialize};

/// Genres offered by the song form
pub const GENRES: [&str; 15] = [
    "Rock",
    "Pop",
    "Jazz",
    "Hip Hop",
    "Electronic",
    "Folk",
    "Classical",
    "R&B",
    "Country",
    "Reggae",
    "Blues",
    "Funk",
    "Metal",
    "Punk",
    "Alternative",
];

/// A song as stored by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub duration: u32,
}

impl Song {
    pub fn from_draft(id: String, draft: SongDraft) -> Self {
        Song {
            id,
            title: draft.title,
            artist: draft.artist,
            album: draft.album,
            year: draft.year,
            genre: draft.genre,
            duration: draft.duration,
        }
    }

    pub fn to_draft(&self) -> SongDraft {
        SongDraft {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            year: self.year,
            genre: self.genre.clone(),
            duration: self.duration,
        }
    }
}

/// Song fields without the server-assigned id (create/update body)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDraft {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: i32,
    pub genre: String,
    pub duration: u32,
}

/// One page of songs as returned by the list endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongPage {
    pub songs: Vec<Song>,
    pub total: u64,
    pub page: u32,
}

/// Whether the song modal creates a new song or edits an existing one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
}

/// Ids come back as strings from most servers but some emit numbers.
pub(super) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
