//! HTTP client for the songs REST resource

use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Deserializer};

use crate::error::{ApiError, ApiResult};
use crate::{log_api_request, log_api_result};
use super::types::{string_or_number, Song, SongDraft, SongPage};

const USER_AGENT: &str = concat!("songshelf/", env!("CARGO_PKG_VERSION"));

/// Songs API client. Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct SongsApi {
    client: reqwest::Client,
    base_url: Url,
}

/// List responses come either paged or as a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Paged {
        songs: Vec<Song>,
        total: Option<u64>,
        page: Option<u32>,
    },
    Bare(Vec<Song>),
}

impl ListBody {
    fn into_page(self, requested_page: u32) -> SongPage {
        match self {
            ListBody::Paged { songs, total, page } => SongPage {
                total: total.unwrap_or(songs.len() as u64),
                page: page.unwrap_or(requested_page),
                songs,
            },
            ListBody::Bare(songs) => SongPage {
                total: songs.len() as u64,
                page: requested_page,
                songs,
            },
        }
    }
}

/// Fields echoed back by create and update. Servers differ in how much
/// they send, so anything missing is taken from the submitted draft.
#[derive(Deserialize)]
struct SongReply {
    #[serde(default, deserialize_with = "optional_id")]
    id: Option<String>,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    year: Option<i32>,
    genre: Option<String>,
    duration: Option<u32>,
}

impl SongReply {
    fn into_song(self, fallback_id: &str, draft: &SongDraft) -> Song {
        Song {
            id: self.id.unwrap_or_else(|| fallback_id.to_string()),
            title: self.title.unwrap_or_else(|| draft.title.clone()),
            artist: self.artist.unwrap_or_else(|| draft.artist.clone()),
            album: self.album.unwrap_or_else(|| draft.album.clone()),
            year: self.year.unwrap_or(draft.year),
            genre: self.genre.unwrap_or_else(|| draft.genre.clone()),
            duration: self.duration.unwrap_or(draft.duration),
        }
    }
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer).map(Some)
}

/// Some servers wrap the resource under its model name.
#[derive(Deserialize)]
#[serde(untagged)]
enum SongBody {
    Wrapped { song: SongReply },
    Bare(SongReply),
}

impl SongBody {
    fn into_song(self, fallback_id: &str, draft: &SongDraft) -> Song {
        match self {
            SongBody::Wrapped { song } | SongBody::Bare(song) => song.into_song(fallback_id, draft),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl SongsApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot have paths appended: {base_url}");
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        tracing::debug!(base_url = %base_url, "SongsApi created");
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<SongPage> {
        log_api_request!("list_songs", page, limit);
        let result = self.try_list(page, limit).await;
        log_api_result!("list_songs", result);
        result
    }

    pub async fn create(&self, draft: &SongDraft) -> ApiResult<Song> {
        log_api_request!("create_song", title = %draft.title, artist = %draft.artist);
        let result = self.try_create(draft).await;
        log_api_result!("create_song", result);
        result
    }

    pub async fn update(&self, id: &str, draft: &SongDraft) -> ApiResult<Song> {
        log_api_request!("update_song", id);
        let result = self.try_update(id, draft).await;
        log_api_result!("update_song", result);
        result
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        log_api_request!("delete_song", id);
        let result = self.try_delete(id).await;
        log_api_result!("delete_song", result);
        result
    }

    async fn try_list(&self, page: u32, limit: u32) -> ApiResult<SongPage> {
        let response = self
            .client
            .get(self.endpoint(&["songs"]))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Network(status_message(status)));
        }

        let body: ListBody = response.json().await.map_err(|e| {
            tracing::debug!(error = ?e, page, "Song list body did not decode");
            e
        })?;
        Ok(body.into_page(page))
    }

    async fn try_create(&self, draft: &SongDraft) -> ApiResult<Song> {
        let response = self
            .client
            .post(self.endpoint(&["songs"]))
            .json(draft)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| status_message(status));
            return Err(ApiError::Validation(message));
        }
        if !status.is_success() {
            return Err(ApiError::Network(status_message(status)));
        }

        Ok(read_song(response, "", draft).await)
    }

    async fn try_update(&self, id: &str, draft: &SongDraft) -> ApiResult<Song> {
        let response = self
            .client
            .put(self.endpoint(&["songs", id]))
            .json(draft)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found(response).await);
        }
        if !status.is_success() {
            return Err(ApiError::Network(status_message(status)));
        }

        Ok(read_song(response, id, draft).await)
    }

    async fn try_delete(&self, id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.endpoint(&["songs", id]))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found(response).await);
        }
        if !status.is_success() {
            return Err(ApiError::Network(status_message(status)));
        }
        Ok(())
    }
}

/// A 2xx means the server stored the song, so an unreadable body falls
/// back to the submitted fields instead of failing the call.
async fn read_song(response: reqwest::Response, fallback_id: &str, draft: &SongDraft) -> Song {
    match response.json::<SongBody>().await {
        Ok(body) => body.into_song(fallback_id, draft),
        Err(e) => {
            tracing::debug!(error = ?e, "Song body did not decode, using submitted fields");
            Song::from_draft(fallback_id.to_string(), draft.clone())
        }
    }
}

fn status_message(status: StatusCode) -> String {
    format!("HTTP error! status: {}", status.as_u16())
}

async fn error_message(response: reqwest::Response) -> Option<String> {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error)
        .filter(|msg| !msg.trim().is_empty())
}

async fn not_found(response: reqwest::Response) -> ApiError {
    let message = error_message(response)
        .await
        .unwrap_or_else(|| "Song not found".to_string());
    ApiError::NotFound(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let api = SongsApi::new("http://localhost:3000/api/").unwrap();
        assert_eq!(
            api.endpoint(&["songs", "42"]).as_str(),
            "http://localhost:3000/api/songs/42"
        );

        let api = SongsApi::new("http://localhost:3000/api").unwrap();
        assert_eq!(api.endpoint(&["songs"]).as_str(), "http://localhost:3000/api/songs");
    }

    #[test]
    fn rejects_bad_base_urls() {
        assert!(SongsApi::new("not a url").is_err());
        assert!(SongsApi::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn bare_list_uses_length_and_requested_page() {
        let body: ListBody = serde_json::from_str(
            r#"[{"id": "1", "title": "Imagine", "artist": "John Lennon"}]"#,
        )
        .unwrap();
        let page = body.into_page(3);
        assert_eq!(page.total, 1);
        assert_eq!(page.page, 3);
    }

    fn draft() -> SongDraft {
        SongDraft {
            title: "Angie".to_string(),
            artist: "The Rolling Stones".to_string(),
            album: "Goats Head Soup".to_string(),
            year: 1973,
            genre: "Rock".to_string(),
            duration: 272,
        }
    }

    #[test]
    fn wrapped_song_body_is_unwrapped() {
        let body: SongBody = serde_json::from_str(
            r#"{"song": {"id": "5", "title": "Angie", "artist": "The Rolling Stones"}}"#,
        )
        .unwrap();
        let song = body.into_song("", &draft());
        assert_eq!(song.id, "5");
        assert_eq!(song.duration, 272);
    }

    #[test]
    fn partial_reply_is_filled_from_draft() {
        let body: SongBody = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        let song = body.into_song("", &draft());
        assert_eq!(song.id, "9");
        assert_eq!(song.to_draft(), draft());
    }

    #[test]
    fn reply_without_id_keeps_fallback_id() {
        let body: SongBody = serde_json::from_str(r#"{"title": "Angie (Remastered)"}"#).unwrap();
        let song = body.into_song("42", &draft());
        assert_eq!(song.id, "42");
        assert_eq!(song.title, "Angie (Remastered)");
    }
}
