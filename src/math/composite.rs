use crate::types::Color;

/// Linearly interpolate r, g, b from `background` toward `foreground`.
///
/// `amount_percent` of exactly 0 keeps the background; `None` or NaN means 50%.
/// Values outside 0-100 extrapolate linearly, then each channel saturates at
/// 0 or 255, so extrapolated results stop being linear at the gamut edge.
/// Alpha is not interpolated: the result is always opaque, callers fold the
/// foreground alpha into `amount_percent` instead.
pub fn mix(background: Color, foreground: Color, amount_percent: Option<f64>) -> Color {
    let percent = match amount_percent {
        Some(p) if p.is_nan() => 50.0,
        Some(p) => p,
        None => 50.0,
    };
    let t = percent / 100.0;

    let blend = |b: u8, f: u8| -> u8 {
        let result = b as f64 + (f as f64 - b as f64) * t;
        result.round().clamp(0.0, 255.0) as u8
    };

    Color::rgb(
        blend(background.r, foreground.r),
        blend(background.g, foreground.g),
        blend(background.b, foreground.b),
    )
}
