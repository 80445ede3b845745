//! # Playtime
//!
//! Adds up the running time of a YouTube playlist.
//!
//! ## Architecture
//!
//! - **models**: Playlist IDs, video records and playlist summaries
//! - **duration**: Duration code parsing and human-readable formatting
//! - **fetch**: Video metadata API client
//! - **aggregate**: Paginated collection of a playlist's videos
//! - **calculate**: Averages, speed-adjusted totals and chart data
//! - **api**: HTTP form page and JSON endpoint
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod api;
pub mod calculate;
pub mod config;
pub mod duration;
pub mod fetch;
pub mod models;

pub use models::*;
