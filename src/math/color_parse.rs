use crate::types::Color;

/// Resolve any CSS color value to a [`Color`].
/// Handles: hex, rgb(), hsl(), hwb(), oklch(), named colors.
/// Returns None for: transparent, inherit, currentColor, unrecognized.
pub fn resolve_color(value: &str) -> Option<Color> {
    let trimmed = value.trim();

    match trimmed.to_lowercase().as_str() {
        "transparent" | "inherit" | "currentcolor" | "initial" | "unset" | "none" | "" => {
            return None
        }
        _ => {}
    }

    if trimmed.starts_with('#') {
        return super::hex::parse_hex(trimmed);
    }

    match trimmed.parse::<csscolorparser::Color>() {
        Ok(color) => {
            let [r, g, b, a] = color.to_rgba8();
            Some(Color::rgba(r, g, b, a))
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_passthrough() {
        assert_eq!(resolve_color("#1e293b"), Some(Color::rgb(30, 41, 59)));
        assert_eq!(resolve_color("  #F00 "), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn rgb_comma_format() {
        assert_eq!(resolve_color("rgb(255, 0, 128)"), Some(Color::rgb(255, 0, 128)));
    }

    #[test]
    fn rgba_keeps_alpha() {
        let c = resolve_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!((c.r, c.g, c.b), (0, 0, 0));
        assert!((127..=128).contains(&c.a), "alpha {}", c.a);
    }

    #[test]
    fn hsl_red() {
        assert_eq!(resolve_color("hsl(0, 100%, 50%)"), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn named_color() {
        assert_eq!(resolve_color("white"), Some(Color::WHITE));
    }

    #[test]
    fn special_values_are_unresolvable() {
        assert_eq!(resolve_color("transparent"), None);
        assert_eq!(resolve_color("currentColor"), None);
        assert_eq!(resolve_color(""), None);
        assert_eq!(resolve_color("definitely-not-a-color"), None);
    }
}
