//! Report calculation.
//!
//! Turns a `PlaylistSummary` into what the user sees:
//! - video count, average and total length
//! - total length at faster playback speeds
//! - per-video chart series (titles and minutes)

use serde::{Deserialize, Serialize};

use crate::duration::format_duration;
use crate::models::PlaylistSummary;

/// Playback speeds the total is reported at.
pub const SPEED_MULTIPLIERS: [f64; 4] = [1.25, 1.50, 1.75, 2.00];

/// Two parallel series for the per-video chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub titles: Vec<String>,
    pub minutes: Vec<f64>,
}

/// Total length at a given playback speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTotal {
    pub multiplier: f64,
    pub seconds: f64,
    pub formatted: String,
}

/// Everything rendered for an analysed playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistReport {
    pub video_count: usize,
    pub total_seconds: f64,
    /// `None` for an empty playlist
    pub average_seconds: Option<f64>,
    pub speeds: Vec<SpeedTotal>,
    pub display_text: Vec<String>,
    pub chart: ChartData,
}

/// Total length when played back `multiplier` times faster.
pub fn calculate_speed_adjusted(total_seconds: f64, multiplier: f64) -> f64 {
    if multiplier <= 0.0 {
        total_seconds
    } else {
        total_seconds / multiplier
    }
}

impl PlaylistReport {
    pub fn from_summary(summary: &PlaylistSummary) -> Self {
        let total_seconds = summary.total_seconds();
        let average_seconds = summary.average_seconds();

        let speeds: Vec<SpeedTotal> = SPEED_MULTIPLIERS
            .iter()
            .map(|&multiplier| {
                let seconds = calculate_speed_adjusted(total_seconds, multiplier);
                SpeedTotal {
                    multiplier,
                    seconds,
                    formatted: format_duration(seconds),
                }
            })
            .collect();

        let mut display_text = vec![
            format!("No of videos: {}", summary.video_count()),
            format!(
                "Average length of a video: {}",
                format_duration(average_seconds.unwrap_or(0.0))
            ),
            format!("Total length of playlist: {}", format_duration(total_seconds)),
        ];
        display_text.extend(
            speeds
                .iter()
                .map(|s| format!("At {:.2}x: {}", s.multiplier, s.formatted)),
        );

        let chart = ChartData {
            titles: summary.videos().iter().map(|v| v.title.clone()).collect(),
            minutes: summary.videos().iter().map(|v| v.duration_minutes()).collect(),
        };

        Self {
            video_count: summary.video_count(),
            total_seconds,
            average_seconds,
            speeds,
            display_text,
            chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoRecord;
    use pretty_assertions::assert_eq;

    fn summary(durations: &[(&str, f64)]) -> PlaylistSummary {
        durations
            .iter()
            .map(|(title, secs)| VideoRecord::new(*title, *secs))
            .collect()
    }

    #[test]
    fn test_speed_adjusted() {
        assert_eq!(calculate_speed_adjusted(3600.0, 2.0), 1800.0);
        assert_eq!(calculate_speed_adjusted(3600.0, 1.25), 2880.0);
        assert_eq!(calculate_speed_adjusted(3600.0, 0.0), 3600.0);
    }

    #[test]
    fn test_report_display_text() {
        let report = PlaylistReport::from_summary(&summary(&[("a", 3600.0), ("b", 3600.0)]));

        assert_eq!(
            report.display_text,
            vec![
                "No of videos: 2",
                "Average length of a video: 1 Hours, 0 Minutes, 0 Seconds",
                "Total length of playlist: 2 Hours, 0 Minutes, 0 Seconds",
                "At 1.25x: 1 Hours, 36 Minutes, 0 Seconds",
                "At 1.50x: 1 Hours, 20 Minutes, 0 Seconds",
                "At 1.75x: 1 Hours, 8 Minutes, 34 Seconds",
                "At 2.00x: 1 Hours, 0 Minutes, 0 Seconds",
            ]
        );
    }

    #[test]
    fn test_report_chart() {
        let report = PlaylistReport::from_summary(&summary(&[("first", 90.0), ("second", 30.0)]));

        assert_eq!(report.chart.titles, vec!["first", "second"]);
        assert_eq!(report.chart.minutes, vec![1.5, 0.5]);
    }

    #[test]
    fn test_report_empty_playlist() {
        let report = PlaylistReport::from_summary(&PlaylistSummary::new());

        assert_eq!(report.video_count, 0);
        assert_eq!(report.average_seconds, None);
        assert_eq!(report.display_text[0], "No of videos: 0");
        assert_eq!(report.display_text[1], "Average length of a video: 0 Seconds");
        assert!(report.chart.titles.is_empty());
    }

    #[test]
    fn test_report_speeds() {
        let report = PlaylistReport::from_summary(&summary(&[("a", 700.0)]));

        let multipliers: Vec<f64> = report.speeds.iter().map(|s| s.multiplier).collect();
        assert_eq!(multipliers, SPEED_MULTIPLIERS.to_vec());
        assert_eq!(report.speeds[3].seconds, 350.0);
        assert_eq!(report.speeds[3].formatted, "5 Minutes, 50 Seconds");
    }
}
