use crate::types::Color;

/// AA threshold for normal-size text.
pub const AA_NORMAL: f64 = 4.5;
/// AA threshold for large text.
pub const AA_LARGE: f64 = 3.0;

/// CSS px per typographic point.
pub const PX_PER_PT: f64 = 1.333333333;

/// Convert sRGB channel (0-255) to linear light value.
/// sRGB -> linear: if V <= 0.03928: V/12.92, else ((V+0.055)/1.055)^2.4
fn srgb_to_linear(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.0. Alpha is ignored.
/// L = 0.2126 * R + 0.7152 * G + 0.0722 * B (linear channels)
pub fn luminance(color: Color) -> f64 {
    0.2126 * srgb_to_linear(color.r)
        + 0.7152 * srgb_to_linear(color.g)
        + 0.0722 * srgb_to_linear(color.b)
}

/// WCAG contrast ratio between two luminances, in either order.
/// ratio = (L1 + 0.05) / (L2 + 0.05) where L1 >= L2
pub fn contrast_ratio(lum_a: f64, lum_b: f64) -> f64 {
    let (lighter, darker) = if lum_a > lum_b { (lum_a, lum_b) } else { (lum_b, lum_a) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Large text is >= 18pt, or >= 14pt when bold.
pub fn is_large_text(font_size_px: f64, is_bold: bool) -> bool {
    let point_size = font_size_px / PX_PER_PT;
    point_size >= 18.0 || (is_bold && point_size >= 14.0)
}

/// Minimum AA ratio a text element must reach.
pub fn passing_threshold(font_size_px: f64, is_bold: bool) -> f64 {
    if is_large_text(font_size_px, is_bold) {
        AA_LARGE
    } else {
        AA_NORMAL
    }
}
