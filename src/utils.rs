//! Utility functions

/// Format a duration in seconds as `m:ss` for the player's position labels
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(9.7), "0:09");
        assert_eq!(format_duration(65.0), "1:05");
        assert_eq!(format_duration(600.0), "10:00");
    }

    #[test]
    fn test_format_duration_clamps_negative() {
        assert_eq!(format_duration(-3.0), "0:00");
    }
}
