//! Video metadata API client.
//!
//! The aggregator talks to the video platform through the `PlaylistSource`
//! trait. `YouTubeClient` is the HTTP implementation: it lists the items of
//! a playlist one page at a time and looks up titles and duration codes for
//! a batch of video IDs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::YouTubeConfig;
use crate::models::PlaylistId;

/// Errors that can occur while talking to the video API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One page of playlist items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItemsPage {
    pub video_ids: Vec<String>,
    /// Continuation token; `None` on the last page
    pub next_page_token: Option<String>,
}

/// Title and duration code for a single video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    /// Compact duration, e.g. "PT4M13S"
    pub duration_code: String,
}

/// Source of playlist and video metadata.
///
/// Implementations are shared across concurrent requests and must not
/// hold per-request state.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Fetch one page of a playlist's items.
    async fn list_playlist_items(
        &self,
        playlist_id: &PlaylistId,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, FetchError>;

    /// Fetch details for a batch of videos in one call.
    async fn list_videos(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>, FetchError>;
}

// ── Wire format ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    #[serde(default)]
    id: String,
    snippet: VideoSnippet,
    content_details: VideoContentDetails,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    #[serde(default)]
    duration: String,
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: Option<u16>,
    message: String,
}

impl From<PlaylistItemsResponse> for PlaylistItemsPage {
    fn from(resp: PlaylistItemsResponse) -> Self {
        Self {
            video_ids: resp
                .items
                .into_iter()
                .map(|item| item.content_details.video_id)
                .collect(),
            next_page_token: resp.next_page_token.filter(|t| !t.is_empty()),
        }
    }
}

impl From<VideoItem> for VideoDetails {
    fn from(item: VideoItem) -> Self {
        Self {
            id: item.id,
            title: item.snippet.title,
            duration_code: item.content_details.duration,
        }
    }
}

// ── HTTP client ──────────────────────────────────────────────────

/// HTTP client for the YouTube Data API.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_version: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client from configuration.
    pub fn new(config: &YouTubeConfig) -> Result<Self, FetchError> {
        Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("playtime/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build the URL for an API resource, e.g. `playlistItems`.
    fn endpoint(&self, resource: &str) -> Result<Url, FetchError> {
        let raw = format!("{}/{}/{}", self.base_url, self.api_version, resource);
        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint(resource)?;
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(err) => FetchError::Api {
                    status: err.error.code.unwrap_or(status.as_u16()),
                    message: err.error.message,
                },
                Err(_) => FetchError::HttpStatus {
                    status: status.as_u16(),
                    message: status.canonical_reason().unwrap_or("Unknown").to_string(),
                },
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PlaylistSource for YouTubeClient {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &PlaylistId,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, FetchError> {
        let max_results = page_size.to_string();
        let mut query = vec![
            ("part", "contentDetails"),
            ("fields", "items/contentDetails/videoId,nextPageToken"),
            ("maxResults", max_results.as_str()),
            ("playlistId", playlist_id.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let resp: PlaylistItemsResponse = self.get_json("playlistItems", &query).await?;
        Ok(resp.into())
    }

    async fn list_videos(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>, FetchError> {
        let ids = video_ids.join(",");
        let query = [("part", "contentDetails,snippet"), ("id", ids.as_str())];

        let resp: VideosResponse = self.get_json("videos", &query).await?;
        Ok(resp.items.into_iter().map(VideoDetails::from).collect())
    }
}

/// Scripted source for testing.
///
/// Serves `pages` in order, chaining them with `page-N` tokens, and can be
/// told to fail when a given page is requested.
#[cfg(test)]
pub struct MockSource {
    pages: Vec<Vec<VideoDetails>>,
    fail_at_page: Option<usize>,
    requested_tokens: std::sync::Mutex<Vec<Option<String>>>,
}

#[cfg(test)]
impl MockSource {
    pub fn new(pages: Vec<Vec<VideoDetails>>) -> Self {
        Self {
            pages,
            fail_at_page: None,
            requested_tokens: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing_at(mut self, page: usize) -> Self {
        self.fail_at_page = Some(page);
        self
    }

    pub fn video(id: &str, title: &str, duration_code: &str) -> VideoDetails {
        VideoDetails {
            id: id.to_string(),
            title: title.to_string(),
            duration_code: duration_code.to_string(),
        }
    }

    pub fn requested_tokens(&self) -> Vec<Option<String>> {
        self.requested_tokens.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl PlaylistSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_playlist_items(
        &self,
        _playlist_id: &PlaylistId,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, FetchError> {
        self.requested_tokens
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));

        let index = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| FetchError::Api {
                    status: 400,
                    message: format!("invalid page token {}", token),
                })?,
        };

        if self.fail_at_page == Some(index) {
            return Err(FetchError::Api {
                status: 404,
                message: "The playlist identified with the request's playlistId parameter cannot be found.".to_string(),
            });
        }

        let videos = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(PlaylistItemsPage {
            video_ids: videos.into_iter().map(|v| v.id).collect(),
            next_page_token,
        })
    }

    async fn list_videos(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>, FetchError> {
        Ok(video_ids
            .iter()
            .filter_map(|id| self.pages.iter().flatten().find(|v| &v.id == id).cloned())
            .collect())
    }
}
