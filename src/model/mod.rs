//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (songs, drafts, pages)
//! - `songs_state`: Song collection state and its transitions
//! - `notifications`: Notification queue
//! - `form`: Song form editing and validation
//! - `songs_api`: HTTP client for the songs resource
//! - `app_model`: Shared application model handed to the controller and view

mod types;
mod songs_state;
mod notifications;
mod form;
mod songs_api;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ModalMode, Song, SongDraft, SongPage, GENRES};

pub use songs_state::{total_pages_for, ModalSession, SongsAction, SongsState, ITEMS_PER_PAGE};

pub use notifications::{Notification, NotificationId, NotificationQueue, Severity};

pub use form::{validate, FieldErrors, FormField, SongForm, MAX_DURATION, MIN_DURATION, MIN_YEAR};

pub use songs_api::SongsApi;

pub use app_model::{AppModel, UiState, ViewSnapshot};
