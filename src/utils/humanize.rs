use humansize::{BINARY, format_size};

/// Format a byte count for display, e.g. `1.5 MiB`
pub fn format_file_size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_binary_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1536), "1.50 KiB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MiB");
    }
}
