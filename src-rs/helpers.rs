use chrono::Duration;

/// Renders a whole-second count as a compact elapsed-time summary:
/// "42s", "2m30s", "1h0m5s".
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Rounds a wall-clock interval to whole seconds, half up.
pub fn elapsed_seconds(elapsed: Duration) -> u64 {
    let millis = elapsed.num_milliseconds().max(0);
    ((millis + 500) / 1000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_seconds_minutes_hours() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(60), "1m0s");
        assert_eq!(format_duration(150), "2m30s");
        assert_eq!(format_duration(3600), "1h0m0s");
        assert_eq!(format_duration(3725), "1h2m5s");
    }

    #[test]
    fn rounds_to_whole_seconds() {
        assert_eq!(elapsed_seconds(Duration::milliseconds(0)), 0);
        assert_eq!(elapsed_seconds(Duration::milliseconds(499)), 0);
        assert_eq!(elapsed_seconds(Duration::milliseconds(500)), 1);
        assert_eq!(elapsed_seconds(Duration::milliseconds(4600)), 5);
        assert_eq!(elapsed_seconds(Duration::milliseconds(-250)), 0);
    }
}
