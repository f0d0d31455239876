use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use songshelf::controller::{AppController, Intent};
use songshelf::model::{AppModel, ModalMode, Severity, Song, SongDraft, SongsAction, SongsApi};

async fn setup() -> (MockServer, AppController) {
    let server = MockServer::start().await;
    let api = SongsApi::new(&format!("{}/api", server.uri())).unwrap();
    (server, AppController::new(AppModel::new(), api))
}

fn song_json(id: u32, title: &str, artist: &str) -> Value {
    json!({
        "id": id.to_string(),
        "title": title,
        "artist": artist,
        "album": "Album",
        "year": 1999,
        "genre": "Rock",
        "duration": 240
    })
}

fn page_json(ids: std::ops::RangeInclusive<u32>, total: u64, page: u32) -> Value {
    let songs: Vec<Value> = ids.map(|i| song_json(i, &format!("Song {i}"), "Artist")).collect();
    json!({ "songs": songs, "total": total, "page": page })
}

fn draft(title: &str, artist: &str) -> SongDraft {
    SongDraft {
        title: title.to_string(),
        artist: artist.to_string(),
        album: "Album".to_string(),
        year: 1999,
        genre: "Rock".to_string(),
        duration: 240,
    }
}

async fn mount_list(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/songs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn requests(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| (r.method.as_str().to_string(), r.url.path().to_string()))
        .collect()
}

#[tokio::test]
async fn fetch_success_replaces_page() {
    let (server, controller) = setup().await;
    mount_list(&server, page_json(1..=10, 23, 1)).await;

    controller.dispatch(Intent::FetchSongs);
    assert!(controller.model().songs().loading);
    controller.settle().await;

    let songs = controller.model().songs();
    assert_eq!(songs.songs.len(), 10);
    assert_eq!(songs.total_songs, 23);
    assert_eq!(songs.total_pages, 3);
    assert!(!songs.loading);
    assert!(songs.error.is_none());
}

#[tokio::test]
async fn fetch_uses_page_at_dispatch_time() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/songs"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(21..=23, 23, 3)))
        .expect(1)
        .mount(&server)
        .await;

    controller.model().apply(SongsAction::SetPage(3));
    controller.dispatch(Intent::FetchSongs);
    controller.settle().await;

    assert_eq!(controller.model().songs().songs.len(), 3);
}

#[tokio::test]
async fn fetch_failure_keeps_songs_and_sets_error() {
    let (server, controller) = setup().await;
    controller.model().apply(SongsAction::FetchSuccess(songshelf::model::SongPage {
        songs: vec![Song {
            id: "1".to_string(),
            title: "Kept".to_string(),
            artist: "Artist".to_string(),
            album: String::new(),
            year: 0,
            genre: String::new(),
            duration: 0,
        }],
        total: 1,
        page: 1,
    }));
    Mock::given(method("GET"))
        .and(path("/api/songs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    controller.dispatch(Intent::FetchSongs);
    controller.settle().await;

    let songs = controller.model().songs();
    assert!(!songs.loading);
    assert_eq!(songs.error.as_deref(), Some("HTTP error! status: 500"));
    assert_eq!(songs.songs[0].title, "Kept");
    // Fetch failures only surface in the store.
    assert_eq!(controller.model().notification_count(), 0);
}

#[tokio::test]
async fn create_success_closes_modal_notifies_and_refetches() {
    let (server, controller) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/songs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(song_json(99, "X", "Y")))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, page_json(1..=1, 1, 1)).await;

    controller.model().apply(SongsAction::OpenModal { mode: ModalMode::Create, song: None });
    controller.dispatch(Intent::CreateSong(draft("X", "Y")));
    controller.settle().await;

    let songs = controller.model().songs();
    assert!(!songs.is_modal_open());
    assert!(!songs.loading);

    let notifications = controller.model().notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Success);
    assert_eq!(notifications[0].title, "Song Added!");
    assert_eq!(
        notifications[0].message,
        "\"X\" by Y has been added to your collection."
    );

    assert_eq!(
        requests(&server).await,
        vec![
            ("POST".to_string(), "/api/songs".to_string()),
            ("GET".to_string(), "/api/songs".to_string()),
        ]
    );
    assert_eq!(controller.in_flight(), 0);
}

#[tokio::test]
async fn create_failure_keeps_modal_open_with_error() {
    let (server, controller) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/songs"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Title and artist are required fields"})),
        )
        .mount(&server)
        .await;

    controller.model().apply(SongsAction::OpenModal { mode: ModalMode::Create, song: None });
    controller.dispatch(Intent::CreateSong(draft("X", "Y")));
    controller.settle().await;

    let songs = controller.model().songs();
    assert!(songs.is_modal_open());
    assert_eq!(songs.error.as_deref(), Some("Title and artist are required fields"));

    let notifications = controller.model().notifications();
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].title, "Failed to Add Song");
    assert_eq!(notifications[0].message, "Title and artist are required fields");
    assert_eq!(notifications[0].duration, Duration::from_millis(6000));

    // No refetch after a failed mutation.
    assert_eq!(requests(&server).await.len(), 1);
}

#[tokio::test]
async fn create_with_partial_reply_still_succeeds() {
    let (server, controller) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/songs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "9"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, page_json(1..=1, 1, 1)).await;

    controller.model().apply(SongsAction::OpenModal { mode: ModalMode::Create, song: None });
    controller.dispatch(Intent::CreateSong(draft("X", "Y")));
    controller.settle().await;

    let songs = controller.model().songs();
    assert!(!songs.is_modal_open());
    assert!(songs.error.is_none());

    let notifications = controller.model().notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Song Added!");
    assert_eq!(
        notifications[0].message,
        "\"X\" by Y has been added to your collection."
    );

    // The refetch still runs, so the list picks up the stored song.
    assert_eq!(requests(&server).await.len(), 2);
}

#[tokio::test]
async fn update_with_empty_reply_is_worded_from_submitted_data() {
    let (server, controller) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/songs/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, page_json(1..=5, 5, 1)).await;

    controller.dispatch(Intent::UpdateSong {
        id: "5".to_string(),
        data: draft("Renamed", "Artist"),
    });
    controller.settle().await;

    assert!(controller.model().songs().error.is_none());
    let notifications = controller.model().notifications();
    assert_eq!(notifications[0].title, "Song Updated!");
    assert_eq!(notifications[0].message, "\"Renamed\" has been successfully updated.");
    assert_eq!(requests(&server).await.len(), 2);
}

#[tokio::test]
async fn update_not_found_keeps_modal_open() {
    let (server, controller) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/songs/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Song not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let original = Song {
        id: "5".to_string(),
        title: "Old".to_string(),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        year: 1999,
        genre: "Rock".to_string(),
        duration: 240,
    };
    controller.model().apply(SongsAction::OpenModal {
        mode: ModalMode::Edit,
        song: Some(original),
    });
    controller.dispatch(Intent::UpdateSong {
        id: "5".to_string(),
        data: draft("Renamed", "Artist"),
    });
    controller.settle().await;

    let songs = controller.model().songs();
    assert!(songs.is_modal_open());
    assert_eq!(songs.modal_mode(), ModalMode::Edit);
    assert_eq!(songs.error.as_deref(), Some("Song not found"));
    assert!(!songs.loading);

    let notifications = controller.model().notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].title, "Failed to Update Song");
    assert_eq!(notifications[0].message, "Song not found");
    assert_eq!(notifications[0].duration, Duration::from_millis(6000));

    // No refetch after a failed update.
    assert_eq!(requests(&server).await.len(), 1);
}

#[tokio::test]
async fn update_success_clears_selection_and_notifies() {
    let (server, controller) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/songs/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(song_json(5, "Renamed", "Artist")))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, page_json(1..=5, 5, 1)).await;

    let original = Song {
        id: "5".to_string(),
        title: "Old".to_string(),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        year: 1999,
        genre: "Rock".to_string(),
        duration: 240,
    };
    controller.model().apply(SongsAction::OpenModal {
        mode: ModalMode::Edit,
        song: Some(original),
    });
    controller.dispatch(Intent::UpdateSong {
        id: "5".to_string(),
        data: draft("Renamed", "Artist"),
    });
    controller.settle().await;

    let songs = controller.model().songs();
    assert!(!songs.is_modal_open());
    assert!(songs.selected_song().is_none());
    assert_eq!(songs.songs.len(), 5);

    let notifications = controller.model().notifications();
    assert_eq!(notifications[0].title, "Song Updated!");
    assert_eq!(notifications[0].message, "\"Renamed\" has been successfully updated.");
}

#[tokio::test]
async fn delete_success_notifies_and_refetches() {
    let (server, controller) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/songs/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, json!({"songs": [], "total": 0, "page": 1})).await;

    let song = Song {
        id: "1".to_string(),
        title: "A".to_string(),
        artist: "B".to_string(),
        album: String::new(),
        year: 0,
        genre: String::new(),
        duration: 0,
    };
    controller.dispatch(Intent::DeleteSong { id: "1".to_string(), song });
    controller.settle().await;

    let songs = controller.model().songs();
    assert!(songs.songs.is_empty());
    assert_eq!(songs.total_pages, 0);

    let notifications = controller.model().notifications();
    assert_eq!(notifications[0].title, "Song Deleted!");
    assert_eq!(
        notifications[0].message,
        "\"A\" by B has been removed from your collection."
    );
}

#[tokio::test]
async fn delete_not_found_surfaces_server_message() {
    let (server, controller) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/songs/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Song not found"})))
        .mount(&server)
        .await;

    let song = Song {
        id: "1".to_string(),
        title: "A".to_string(),
        artist: "B".to_string(),
        album: String::new(),
        year: 0,
        genre: String::new(),
        duration: 0,
    };
    controller.dispatch(Intent::DeleteSong { id: "1".to_string(), song });
    controller.settle().await;

    assert_eq!(controller.model().songs().error.as_deref(), Some("Song not found"));
    let notifications = controller.model().notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].title, "Failed to Delete Song");
    assert_eq!(notifications[0].message, "Song not found");
}

#[tokio::test]
async fn overlapping_fetches_last_response_wins() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/songs"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(1..=10, 20, 1))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/songs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(11..=20, 20, 2)))
        .mount(&server)
        .await;

    controller.dispatch(Intent::FetchSongs);
    controller.model().apply(SongsAction::SetPage(2));
    controller.dispatch(Intent::FetchSongs);
    controller.settle().await;

    // The slow page 1 response lands after page 2 and is applied as-is.
    let songs = controller.model().songs();
    assert_eq!(songs.current_page, 2);
    assert_eq!(songs.songs[0].id, "1");
    assert!(!songs.loading);
}
