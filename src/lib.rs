//! SwipeRS: swipe through Spotify recommendations one card at a time.
//!
//! Layers, leaves first: `utils` (key-value store, token store, OAuth),
//! `api` (catalog client), `data` (recommendation pipeline), `state`
//! (ledger, queue, gesture engine), `services` (playlist sync) and `app`
//! (the session aggregate the UI drives).

pub mod api;
pub mod app;
pub mod config;
pub mod constants;
pub mod data;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub const APP_NAME: &str = "SwipeRS";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
