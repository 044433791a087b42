/// Utility helpers for maxplayer

/// Format seconds as `m:ss`. Non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let total = seconds.floor().max(0.0) as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", mins, secs)
}

/// Playback progress as a percentage in `[0, 100]`; zero while the duration
/// is unknown.
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    let current = finite_or_zero(current);
    let duration = finite_or_zero(duration);
    if duration <= 0.0 {
        return 0.0;
    }
    let ratio = current / duration * 100.0;
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 100.0)
    }
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds_and_floors() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn format_time_handles_negative_and_non_finite() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn progress_is_zero_without_duration() {
        assert_eq!(progress_percent(12.0, 0.0), 0.0);
        assert_eq!(progress_percent(12.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn progress_stays_within_bounds() {
        assert_eq!(progress_percent(50.0, 200.0), 25.0);
        assert_eq!(progress_percent(250.0, 200.0), 100.0);
        assert_eq!(progress_percent(-5.0, 200.0), 0.0);
        assert_eq!(progress_percent(10.0, f64::INFINITY), 0.0);
    }
}
