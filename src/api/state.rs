use crate::aggregate::{PlaylistAggregator, PlaylistError};
use crate::calculate::PlaylistReport;
use crate::models::PlaylistId;

/// Shared by every request. Holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: PlaylistAggregator,
}

impl AppState {
    pub fn new(aggregator: PlaylistAggregator) -> Self {
        Self { aggregator }
    }

    /// Resolve a user-supplied link or ID and build its report.
    pub async fn analyze(&self, reference: &str) -> Result<PlaylistReport, PlaylistError> {
        let playlist_id = PlaylistId::extract(reference)?;
        let summary = self.aggregator.aggregate(&playlist_id).await?;
        Ok(PlaylistReport::from_summary(&summary))
    }
}
