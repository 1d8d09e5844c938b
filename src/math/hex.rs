use crate::types::Color;

/// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
/// Returns None on malformed input.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let raw = hex.strip_prefix('#').unwrap_or(hex);
    if !raw.is_ascii() {
        return None;
    }
    let expanded: String = match raw.len() {
        3 | 4 => raw.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => raw.to_string(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    let a = if expanded.len() == 8 { byte(6)? } else { 255 };
    Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
}

/// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn to_hex(color: Color) -> String {
    if color.a < 255 {
        format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
    } else {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    }
}
