use napi::bindgen_prelude::Buffer;
use serde::Deserialize;

use crate::engine::{audit_document, rate_all};
use crate::error::ContrastError;
use crate::layers::Layer;
use crate::math::color_parse::resolve_color;
use crate::report::{OverlayCollector, ReportOptions};
use crate::sampler::PixelBuffer;
use crate::types::{RateOptions, RatingResult, Rectangle, SamplePolicy, TextElementInfo};

/// Text element as passed from JS. `color` is any CSS color string.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct TextElementJs {
    pub color: Option<String>,
    pub effective_opacity: f64,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub font_size_px: f64,
    pub is_bold: Option<bool>,
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct RatingResultJs {
    /// "pass" | "fail" | "mixed" | "unknown"
    pub status: String,
    /// "NA" or "X.XX:1"
    pub contrast_ratio: String,
    pub ratio_value: Option<f64>,
    pub note: Option<String>,
}

impl From<RatingResult> for RatingResultJs {
    fn from(result: RatingResult) -> Self {
        Self {
            status: result.status.label().to_lowercase(),
            contrast_ratio: result.display_ratio(),
            ratio_value: result.contrast_ratio,
            note: result.note,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AuditOptions {
    rate: RateOptions,
    report: ReportOptions,
}

fn to_napi(err: ContrastError) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

#[napi]
pub fn health_check() -> String {
    "text-contrast-native ok".to_string()
}

/// Rate text elements against a raw RGBA8 raster of `width` x `height`.
#[napi]
pub fn rate_text_elements(
    elements: Vec<TextElementJs>,
    width: u32,
    height: u32,
    pixels: Buffer,
    corrected_samples: Option<bool>,
) -> napi::Result<Vec<RatingResultJs>> {
    let raster = PixelBuffer::new(width, height, pixels.to_vec()).map_err(to_napi)?;
    let options = RateOptions {
        sample_policy: if corrected_samples.unwrap_or(false) {
            SamplePolicy::CornersCorrected
        } else {
            SamplePolicy::Corners
        },
    };
    let infos: Vec<TextElementInfo> = elements
        .into_iter()
        .map(|e| TextElementInfo {
            text_color: e.color.as_deref().and_then(resolve_color),
            effective_opacity: e.effective_opacity,
            rectangle: Rectangle::new(e.x, e.y, e.w, e.h),
            font_size_px: e.font_size_px,
            is_bold: e.is_bold.unwrap_or(false),
        })
        .collect();

    Ok(rate_all(&infos, &raster, &options)
        .into_iter()
        .map(RatingResultJs::from)
        .collect())
}

/// Audit a JSON layer tree against its rasterized region.
/// Returns `{"report": AuditReport, "overlay": [ReportPrimitive]}` as JSON.
#[napi]
pub fn audit_document_json(
    document: String,
    width: u32,
    height: u32,
    pixels: Buffer,
    options_json: Option<String>,
) -> napi::Result<String> {
    let root = Layer::from_json(&document).map_err(to_napi)?;
    let options: AuditOptions = match options_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(ContrastError::from)
            .map_err(to_napi)?,
        None => AuditOptions::default(),
    };
    let raster = PixelBuffer::new(width, height, pixels.to_vec()).map_err(to_napi)?;

    let report = audit_document(&root, &raster, &options.rate);
    let mut overlay = OverlayCollector::new();
    report.render(&options.report, &mut overlay);

    serde_json::to_string(&serde_json::json!({
        "report": report,
        "overlay": overlay.primitives,
    }))
    .map_err(ContrastError::from)
    .map_err(to_napi)
}
