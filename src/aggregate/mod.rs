//! Playlist aggregation.
//!
//! Walks every page of a playlist, looks up each page's videos in one
//! batched call, and accumulates a `PlaylistSummary`. Either the whole
//! playlist is summarised or an error is returned; partial results are
//! never surfaced.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::duration::parse_duration_code;
use crate::fetch::{FetchError, PlaylistSource};
use crate::models::{InvalidPlaylistReference, PlaylistId, PlaylistSummary, VideoRecord};

/// Errors from analysing a playlist.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error(transparent)]
    InvalidReference(#[from] InvalidPlaylistReference),

    #[error("Failed to fetch playlist {playlist_id}: {source}")]
    Fetch {
        playlist_id: PlaylistId,
        #[source]
        source: FetchError,
    },
}

/// Collects the videos of a playlist from a `PlaylistSource`.
#[derive(Clone)]
pub struct PlaylistAggregator {
    source: Arc<dyn PlaylistSource>,
    page_size: u32,
}

impl PlaylistAggregator {
    pub fn new(source: Arc<dyn PlaylistSource>, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch every video in the playlist, in the order the API returns them.
    pub async fn aggregate(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<PlaylistSummary, PlaylistError> {
        self.collect(playlist_id)
            .await
            .map_err(|source| PlaylistError::Fetch {
                playlist_id: playlist_id.clone(),
                source,
            })
    }

    async fn collect(&self, playlist_id: &PlaylistId) -> Result<PlaylistSummary, FetchError> {
        let mut summary = PlaylistSummary::new();
        let mut page_token: Option<String> = None;
        let mut page = 1u32;

        loop {
            let items = self
                .source
                .list_playlist_items(playlist_id, self.page_size, page_token.as_deref())
                .await?;

            debug!(
                "{} page {} of {}: {} items",
                self.source.name(),
                page,
                playlist_id,
                items.video_ids.len()
            );

            if !items.video_ids.is_empty() {
                for video in self.source.list_videos(&items.video_ids).await? {
                    let seconds = parse_duration_code(&video.duration_code);
                    summary.push(VideoRecord::new(video.title, seconds));
                }
            }

            match items.next_page_token {
                Some(token) => {
                    page_token = Some(token);
                    page += 1;
                }
                None => break,
            }
        }

        info!(
            "Playlist {}: {} videos, {:.0}s total across {} pages",
            playlist_id,
            summary.video_count(),
            summary.total_seconds(),
            page
        );

        Ok(summary)
    }
}
