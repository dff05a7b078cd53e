//! Deterministic username colours for chat rendering

/// Palette a display name is hashed onto
pub const USERNAME_COLORS: [&str; 20] = [
    "#FF69B4", "#1E90FF", "#32CD32", "#FFD700", "#FF4500", "#8A2BE2", "#00CED1", "#FF6347",
    "#00FF7F", "#FFB6C1", "#20B2AA", "#FF8C00", "#7FFF00", "#DC143C", "#00BFFF", "#ADFF2F",
    "#FF00FF", "#40E0D0", "#FF1493", "#00FA9A",
];

/// Pick the palette colour for `name`.
///
/// Rolling hash over UTF-16 code units, `h = c + ((h << 5) - h)`, where the
/// shift operates on `h` truncated to 32 bits. The browser client computes
/// the same function, so both sides agree on every name.
pub fn username_color(name: &str) -> &'static str {
    let hash = name.encode_utf16().fold(0_i64, |h, unit| {
        let shifted = i64::from((h as i32).wrapping_shl(5));
        i64::from(unit) + shifted - h
    });

    USERNAME_COLORS[(hash.unsigned_abs() % USERNAME_COLORS.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        // 'a' hashes to 97
        assert_eq!(username_color("a"), "#40E0D0");
        // 'ab' hashes to 3105
        assert_eq!(username_color("ab"), "#8A2BE2");
        assert_eq!(username_color(""), "#FF69B4");
    }

    #[test]
    fn test_is_deterministic() {
        for name in ["Alice", "Bob", "李雷", "🦀 crab"] {
            assert_eq!(username_color(name), username_color(name));
            assert!(USERNAME_COLORS.contains(&username_color(name)));
        }
    }

    #[test]
    fn test_long_names_stay_in_palette() {
        let name = "z".repeat(10_000);
        assert!(USERNAME_COLORS.contains(&username_color(&name)));
    }
}
