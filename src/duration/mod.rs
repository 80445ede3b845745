//! Duration codes and human-readable durations.
//!
//! The video API reports lengths as compact codes such as `PT1H2M10S`.
//! These are reduced to a count of seconds, summed, and rendered back as
//! `"1 Hours, 2 Minutes, 10 Seconds"` style text.

use std::sync::LazyLock;

use regex::Regex;

static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)H").expect("valid regex"));
static MINUTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)M").expect("valid regex"));
static SECONDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)S").expect("valid regex"));

/// Parse a duration code (e.g. "PT1H30M45S") into seconds.
///
/// Each of the hour, minute and second markers is looked up independently;
/// a missing component counts as zero. Input with none of the markers
/// yields `0.0` rather than an error.
pub fn parse_duration_code(code: &str) -> f64 {
    let hours = component(&HOURS, code);
    let minutes = component(&MINUTES, code);
    let seconds = component(&SECONDS, code);

    hours * 3600.0 + minutes * 60.0 + seconds
}

fn component(pattern: &Regex, code: &str) -> f64 {
    pattern
        .captures(code)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Format a number of seconds as days, hours, minutes and seconds.
///
/// Leading zero units are left out, but once a unit is shown every smaller
/// unit follows it, even when zero. Fractional seconds are truncated.
/// Labels are always plural ("1 Seconds").
pub fn format_duration(seconds: f64) -> String {
    // NaN and negatives saturate to zero
    let total = seconds.max(0.0) as u64;

    let (minutes, secs) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    let (days, hours) = (hours / 24, hours % 24);

    if days > 0 {
        format!(
            "{} Days, {} Hours, {} Minutes, {} Seconds",
            days, hours, minutes, secs
        )
    } else if hours > 0 {
        format!("{} Hours, {} Minutes, {} Seconds", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{} Minutes, {} Seconds", minutes, secs)
    } else {
        format!("{} Seconds", secs)
    }
}
