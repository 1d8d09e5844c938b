use std::path::Path;

use image::{Rgba, RgbaImage};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::ContrastResult;
use crate::types::{Color, Rectangle, RatingResult, RatingStatus};

pub const PASS_COLOR: Color = Color::rgb(0x2e, 0x7d, 0x32);
pub const FAIL_COLOR: Color = Color::rgb(0xc6, 0x28, 0x28);
pub const MIXED_COLOR: Color = Color::rgb(0xef, 0x6c, 0x00);
pub const UNKNOWN_COLOR: Color = Color::rgb(0x75, 0x75, 0x75);

pub fn status_color(status: RatingStatus) -> Color {
    match status {
        RatingStatus::Pass => PASS_COLOR,
        RatingStatus::Fail => FAIL_COLOR,
        RatingStatus::Mixed => MIXED_COLOR,
        RatingStatus::Unknown => UNKNOWN_COLOR,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    /// Alpha of the status rectangles drawn over each text element.
    pub overlay_alpha: u8,
    pub show_labels: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            overlay_alpha: 96,
            show_labels: true,
        }
    }
}

/// Shapes a host places back into its document, or an exporter draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReportPrimitive {
    Rect { rect: Rectangle, fill: Color },
    Label { x: i32, y: i32, text: String, color: Color },
}

/// Receives report primitives in drawing order.
pub trait ReportSink {
    fn add_rect(&mut self, rect: Rectangle, fill: Color);
    fn add_label(&mut self, x: i32, y: i32, text: &str, color: Color);
}

/// "PASS 21.00:1", "MIXED 2.10:1 - 5.00:1", "UNKNOWN NA".
pub fn label_text(result: &RatingResult) -> String {
    let ratio = match (&result.status, &result.note) {
        (RatingStatus::Mixed, Some(note)) => note.clone(),
        _ => result.display_ratio(),
    };
    format!("{} {}", result.status.label(), ratio)
}

/// Emit one status rectangle (and optionally a label) per rated element.
pub fn render_report<'a, I, S>(items: I, options: &ReportOptions, sink: &mut S)
where
    I: IntoIterator<Item = (Rectangle, &'a RatingResult)>,
    S: ReportSink + ?Sized,
{
    for (rect, result) in items {
        let color = status_color(result.status);
        sink.add_rect(rect, color.with_alpha(options.overlay_alpha));
        if options.show_labels {
            sink.add_label(rect.x, rect.y, &label_text(result), color);
        }
    }
}

/// Collects primitives for the host to insert into its document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayCollector {
    pub primitives: Vec<ReportPrimitive>,
}

impl OverlayCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> ContrastResult<String> {
        Ok(serde_json::to_string(&self.primitives)?)
    }
}

impl ReportSink for OverlayCollector {
    fn add_rect(&mut self, rect: Rectangle, fill: Color) {
        self.primitives.push(ReportPrimitive::Rect { rect, fill });
    }

    fn add_label(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.primitives.push(ReportPrimitive::Label {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

/// Non-premultiplied source-over of `src` onto `dst`.
fn source_over(src: Color, dst: Rgba<u8>) -> Rgba<u8> {
    let [dr, dg, db, da] = dst.0;
    let sa = src.a as f64 / 255.0;
    let da = da as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| -> u8 {
        let c = (s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src.r, dr),
        channel(src.g, dg),
        channel(src.b, db),
        (out_a * 255.0).round() as u8,
    ])
}

/// Draws the report over a copy of the background for image export.
/// Labels are not rasterized.
pub struct ImageCanvas {
    image: RgbaImage,
}

impl ImageCanvas {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ContrastResult<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(Into::into)
    }
}

impl ReportSink for ImageCanvas {
    fn add_rect(&mut self, rect: Rectangle, fill: Color) {
        let (width, height) = self.image.dimensions();
        let (x0, y0, x1, y1) = rect.clip_to(width, height);
        for y in y0..y1 {
            for x in x0..x1 {
                let px = self.image.get_pixel_mut(x, y);
                *px = source_over(fill, *px);
            }
        }
    }

    fn add_label(&mut self, x: i32, y: i32, text: &str, _color: Color) {
        trace!("label '{}' at ({}, {}) not rasterized", text, x, y);
    }
}
