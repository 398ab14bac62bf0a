//! Common utilities and helpers

pub mod logging;

/// Utility functions for ClipGate
pub struct Utils;

impl Utils {
    /// Human-readable size using binary units rounded to a whole number, e.g. `2 MB`.
    /// Zero renders as `0 Bytes`.
    pub fn format_file_size(size: u64) -> String {
        const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
        if size == 0 {
            return "0 Bytes".to_string();
        }

        let mut value = size as f64;
        let mut unit_index = 0;
        while value >= 1024.0 && unit_index < UNITS.len() - 1 {
            value /= 1024.0;
            unit_index += 1;
        }

        format!("{} {}", value.round() as u64, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(Utils::format_file_size(0), "0 Bytes");
        assert_eq!(Utils::format_file_size(512), "512 Bytes");
        assert_eq!(Utils::format_file_size(1536), "2 KB");
        assert_eq!(Utils::format_file_size(1400), "1 KB");
        assert_eq!(Utils::format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(Utils::format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }
}
