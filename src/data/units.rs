//! Unit conversions used by the cards.

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn bytes_to_gigabytes(bytes: f64) -> f64 {
    bytes / 1e9
}

pub fn bytes_to_terabytes(bytes: f64) -> f64 {
    bytes / 1e12
}

/// Speed-test figures arrive in bits per second; shown as Mbit/s rounded to
/// two decimals.
pub fn bits_to_megabits(bits_per_sec: f64) -> f64 {
    (bits_per_sec / 1e6 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_fixed_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn test_bytes() {
        assert_eq!(bytes_to_gigabytes(1e9), 1.0);
        assert_eq!(bytes_to_terabytes(1e12), 1.0);
        assert_eq!(bytes_to_terabytes(2.5e12), 2.5);
    }

    #[test]
    fn test_megabits_rounding() {
        assert_eq!(bits_to_megabits(94_123_456.0), 94.12);
        assert_eq!(bits_to_megabits(0.0), 0.0);
    }
}
