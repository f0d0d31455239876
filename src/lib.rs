//! songshelf: a terminal manager for a songs REST API.
//!
//! The crate is split the same way the binary runs it:
//!
//! - `model`: collection store, notification queue, form and API client
//! - `controller`: intent dispatch, async effects and key handling
//! - `view`: ratatui rendering of a model snapshot

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;
