//! Per-video records and the playlist totals built from them.

use serde::{Deserialize, Serialize};

/// A single video's title and length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    pub duration_seconds: f64,
}

impl VideoRecord {
    pub fn new(title: impl Into<String>, duration_seconds: f64) -> Self {
        Self {
            title: title.into(),
            duration_seconds: duration_seconds.max(0.0),
        }
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }
}

/// Videos of one playlist in API order, with their summed length.
///
/// Only grows through [`PlaylistSummary::push`], so the count and total
/// always agree with `videos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaylistSummary {
    videos: Vec<VideoRecord>,
    total_seconds: f64,
}

impl PlaylistSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, video: VideoRecord) {
        self.total_seconds += video.duration_seconds;
        self.videos.push(video);
    }

    pub fn video_count(&self) -> usize {
        self.videos.len()
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Mean video length, or `None` for an empty playlist.
    pub fn average_seconds(&self) -> Option<f64> {
        if self.videos.is_empty() {
            None
        } else {
            Some(self.total_seconds / self.videos.len() as f64)
        }
    }
}

impl FromIterator<VideoRecord> for PlaylistSummary {
    fn from_iter<I: IntoIterator<Item = VideoRecord>>(iter: I) -> Self {
        let mut summary = Self::new();
        for video in iter {
            summary.push(video);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_totals() {
        let mut summary = PlaylistSummary::new();
        summary.push(VideoRecord::new("a", 60.0));
        summary.push(VideoRecord::new("b", 90.0));

        assert_eq!(summary.video_count(), 2);
        assert_eq!(summary.total_seconds(), 150.0);
        assert_eq!(summary.videos()[1].title, "b");
    }

    #[test]
    fn test_average() {
        let summary: PlaylistSummary = vec![
            VideoRecord::new("a", 100.0),
            VideoRecord::new("b", 200.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(summary.average_seconds(), Some(150.0));
    }

    #[test]
    fn test_empty_has_no_average() {
        let summary = PlaylistSummary::new();
        assert!(summary.is_empty());
        assert_eq!(summary.total_seconds(), 0.0);
        assert_eq!(summary.average_seconds(), None);
    }

    #[test]
    fn test_negative_duration_clamped() {
        let video = VideoRecord::new("odd", -3.0);
        assert_eq!(video.duration_seconds, 0.0);
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(VideoRecord::new("a", 90.0).duration_minutes(), 1.5);
    }
}
