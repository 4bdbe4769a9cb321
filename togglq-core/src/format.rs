//! Formatting helpers for report output.

/// Format a number of seconds as `H:MM:SS`. Negative input renders as zero.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
