use chrono::{DateTime, Local};
use std::time::Duration;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Human-readable size with two decimals above one kilobyte.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Elapsed wall-clock time, in milliseconds below one second and in the two
/// largest units above it.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs == 0 {
        return format!("{} ms", elapsed.subsec_millis());
    }
    match (secs / 3600, secs % 3600 / 60) {
        (0, 0) => format!("{}.{}s", secs, elapsed.subsec_millis() / 100),
        (0, minutes) => format!("{}m {:02}s", minutes, secs % 60),
        (hours, minutes) => format!("{}h {:02}m", hours, minutes),
    }
}

pub fn format_timestamp(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(500), "500 bytes");
        assert_eq!(format_bytes(1023), "1023 bytes");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(5_000_000), "4.77 MB");
        assert_eq!(format_bytes(3_221_225_472), "3.00 GB");
        assert_eq!(format_bytes(1024_u64.pow(4)), "1.00 TB");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(0)), "0 ms");
        assert_eq!(format_elapsed(Duration::from_millis(250)), "250 ms");
        assert_eq!(format_elapsed(Duration::from_millis(45_380)), "45.3s");
        assert_eq!(format_elapsed(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_elapsed(Duration::from_secs(3665)), "1h 01m");
    }

    #[test]
    fn test_format_timestamp() {
        let dt = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_timestamp(&dt), "2024-03-07 09:05:01");
    }

    proptest! {
        #[test]
        fn small_sizes_are_plain_bytes(n in 0u64..1024) {
            prop_assert_eq!(format_bytes(n), format!("{} bytes", n));
        }

        #[test]
        fn larger_sizes_have_two_decimals(n in 1024u64..u64::MAX / 2) {
            let formatted = format_bytes(n);
            let number = formatted.split(' ').next().unwrap();
            prop_assert_eq!(number.split('.').nth(1).map(str::len), Some(2));
        }
    }
}
