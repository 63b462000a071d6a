//! Time conversion and formatting utilities

/// Seconds to whole milliseconds, rounded; negative and non-finite input gives 0
pub fn seconds_to_millis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

/// Format milliseconds as an SRT timestamp `HH:MM:SS,mmm`
pub fn format_srt_timestamp(millis: u64) -> String {
    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let ms = millis % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, ms)
}

/// Seconds as passed to ffmpeg `-ss`/`-t`
pub fn ffmpeg_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds.max(0.0))
}

/// Short human form used in log lines, e.g. `12.5s`
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.1}s", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_millis_rounds() {
        assert_eq!(seconds_to_millis(1.2345), 1235);
        assert_eq!(seconds_to_millis(0.0004), 0);
        assert_eq!(seconds_to_millis(-3.0), 0);
        assert_eq!(seconds_to_millis(f64::NAN), 0);
    }

    #[test]
    fn test_format_srt_timestamp() {
        assert_eq!(format_srt_timestamp(0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(2_500), "00:00:02,500");
        assert_eq!(format_srt_timestamp(3_723_004), "01:02:03,004");
        assert_eq!(format_srt_timestamp(100 * 3_600_000), "100:00:00,000");
    }

    #[test]
    fn test_ffmpeg_seconds() {
        assert_eq!(ffmpeg_seconds(12.0), "12.000");
        assert_eq!(ffmpeg_seconds(1.23456), "1.235");
        assert_eq!(ffmpeg_seconds(-1.0), "0.000");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(10.0), "10.0s");
        assert_eq!(format_seconds(42.26), "42.3s");
    }
}
