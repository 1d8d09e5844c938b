use serde::{Deserialize, Serialize};

fn opaque() -> u8 {
    255
}

/// An sRGB color with 8-bit channels. Alpha defaults to fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::math::hex::to_hex(*self))
    }
}

/// Axis-aligned rectangle in raster pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Pixel span `(x0, y0, x1, y1)` of this rectangle inside a `width` x `height`
    /// image, end-exclusive. Empty when the rectangle misses the image.
    pub fn clip_to(self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let clip = |start: i32, len: i32, max: u32| {
            let max = i64::from(max);
            let lo = i64::from(start).clamp(0, max);
            let hi = (i64::from(start) + i64::from(len)).clamp(lo, max);
            (lo as u32, hi as u32)
        };
        let (x0, x1) = clip(self.x, self.w, width);
        let (y0, y1) = clip(self.y, self.h, height);
        (x0, y0, x1, y1)
    }
}

/// Everything the rater needs to know about one text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElementInfo {
    /// `None` when no fill or tint could be resolved for the layer.
    pub text_color: Option<Color>,
    /// Product of the element's own opacity and all ancestor opacities (0.0-1.0).
    pub effective_opacity: f64,
    pub rectangle: Rectangle,
    pub font_size_px: f64,
    #[serde(default)]
    pub is_bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingStatus {
    Pass,
    Fail,
    Mixed,
    Unknown,
}

impl RatingStatus {
    pub fn label(self) -> &'static str {
        match self {
            RatingStatus::Pass => "PASS",
            RatingStatus::Fail => "FAIL",
            RatingStatus::Mixed => "MIXED",
            RatingStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Outcome of rating one text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub status: RatingStatus,
    /// Minimum observed ratio. `None` (NA) when the text color was unresolvable,
    /// `Some(0.0)` when no sample landed inside the raster.
    pub contrast_ratio: Option<f64>,
    /// "min:1 - max:1" range, only set for [`RatingStatus::Mixed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RatingResult {
    pub fn display_ratio(&self) -> String {
        crate::rater::format_ratio(self.contrast_ratio.unwrap_or(f64::NAN))
    }
}

/// Caller-supplied knobs for rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateOptions {
    pub sample_policy: SamplePolicy,
}

/// Which four points of a text rectangle get sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SamplePolicy {
    /// Top-left, top-right, bottom-left, then `(x+h-1, y+h-1)`.
    #[default]
    Corners,
    /// Same as `Corners` but the 4th point is the true bottom-right corner.
    CornersCorrected,
}
