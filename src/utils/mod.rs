// Sat Oct 17 2026 - Alex

pub mod counter;
pub mod logging;

pub use counter::{Count, Tally};

pub fn hex_string_spaced(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}

/// Human-readable size of a scanned region, in binary units.
pub fn format_size(len: usize) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if len < 1024 {
        return format!("{} B", len);
    }
    let mut size = len as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// Bytes of `region` covered by a match reported at `position`, clamped to
/// the region.
pub fn window(region: &[u8], position: isize, len: usize) -> &[u8] {
    if position < 0 {
        return &[];
    }
    let start = (position as usize).min(region.len());
    let end = start.saturating_add(len).min(region.len());
    &region[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_string_spaced() {
        assert_eq!(hex_string_spaced(&[0x55, 0x8B, 0xEC]), "55 8B EC");
        assert_eq!(hex_string_spaced(&[]), "");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MiB");
    }

    #[test]
    fn test_window_clamps() {
        let region = [1, 2, 3, 4];
        assert_eq!(window(&region, 1, 2), &[2, 3]);
        assert_eq!(window(&region, 3, 5), &[4]);
        assert_eq!(window(&region, 9, 2), &[] as &[u8]);
        assert_eq!(window(&region, -1, 2), &[] as &[u8]);
    }
}
