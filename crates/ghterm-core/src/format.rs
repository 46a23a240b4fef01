//! Display formatting for sizes.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const BASE: f64 = 1024.0;

/// Format a byte count with base-1024 units and one decimal place.
///
/// Trailing `.0` is dropped, so `1024` renders as `1KB` and `1536` as
/// `1.5KB`. Values beyond the gigabyte range stay in `GB`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= BASE && unit < UNITS.len() - 1 {
        value /= BASE;
        unit += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}{}", rounded as u64, UNITS[unit])
    } else {
        format!("{rounded:.1}{}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(10), "10B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1KB");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(2048), "2KB");
        assert_eq!(format_size(1_048_576), "1MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5GB");
    }

    #[test]
    fn test_format_size_rounding() {
        // 1.04 KB rounds down, 1.06 KB rounds up.
        assert_eq!(format_size(1065), "1KB");
        assert_eq!(format_size(1085), "1.1KB");
        assert_eq!(format_size(4 * 1024_u64.pow(4)), "4096GB");
    }
}
