use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layers::{self, collector::CollectedText, Layer};
use crate::rater::rate_with;
use crate::report::{render_report, ReportOptions, ReportSink};
use crate::sampler::RasterSource;
use crate::types::{RateOptions, RatingResult, RatingStatus, Rectangle, TextElementInfo};

/// Run `f` and log how long it took.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    debug!("{} took {:?}", label, start.elapsed());
    out
}

/// Rate many text elements in parallel against one background.
///
/// Uses Rayon's `par_iter()`; ratings share nothing but the read-only raster.
/// Results are returned in input order.
pub fn rate_all<R>(
    elements: &[TextElementInfo],
    background: &R,
    options: &RateOptions,
) -> Vec<RatingResult>
where
    R: RasterSource + Sync + ?Sized,
{
    elements
        .par_iter()
        .map(|element| rate_with(element, background, options))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub name: String,
    pub rectangle: Rectangle,
    pub result: RatingResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub pass: u32,
    pub fail: u32,
    pub mixed: u32,
    pub unknown: u32,
}

impl AuditSummary {
    fn count(&mut self, status: RatingStatus) {
        match status {
            RatingStatus::Pass => self.pass += 1,
            RatingStatus::Fail => self.fail += 1,
            RatingStatus::Mixed => self.mixed += 1,
            RatingStatus::Unknown => self.unknown += 1,
        }
    }
}

/// Ratings for every text layer of one region, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub entries: Vec<AuditEntry>,
    pub summary: AuditSummary,
}

impl AuditReport {
    pub fn render<S: ReportSink + ?Sized>(&self, options: &ReportOptions, sink: &mut S) {
        render_report(
            self.entries.iter().map(|e| (e.rectangle, &e.result)),
            options,
            sink,
        );
    }
}

/// Rate already-collected text layers.
pub fn audit<R>(texts: Vec<CollectedText>, background: &R, options: &RateOptions) -> AuditReport
where
    R: RasterSource + Sync + ?Sized,
{
    let infos: Vec<TextElementInfo> = texts.iter().map(|t| t.info.clone()).collect();
    let results = timed("rate_all", || rate_all(&infos, background, options));

    let mut summary = AuditSummary::default();
    let entries = texts
        .into_iter()
        .zip(results)
        .map(|(text, result)| {
            summary.count(result.status);
            AuditEntry {
                name: text.name,
                rectangle: text.info.rectangle,
                result,
            }
        })
        .collect();

    AuditReport { entries, summary }
}

/// Walk a layer tree, then rate every visible text layer against `background`.
pub fn audit_document<R>(root: &Layer, background: &R, options: &RateOptions) -> AuditReport
where
    R: RasterSource + Sync + ?Sized,
{
    let texts = timed("collect_text", || layers::collect_text(root));
    debug!("collected {} text layers from '{}'", texts.len(), root.name);
    audit(texts, background, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{OverlayCollector, ReportPrimitive};
    use crate::sampler::PixelBuffer;
    use crate::types::Color;

    fn element(color: Color, x: i32) -> TextElementInfo {
        TextElementInfo {
            text_color: Some(color),
            effective_opacity: 1.0,
            rectangle: Rectangle::new(x, 0, 4, 4),
            font_size_px: 16.0,
            is_bold: false,
        }
    }

    #[test]
    fn timed_returns_value() {
        assert_eq!(timed("answer", || 42), 42);
    }

    #[test]
    fn rate_all_keeps_input_order() {
        // even indices black (pass), odd indices light gray (fail)
        let raster = PixelBuffer::filled(8, 8, Color::WHITE);
        let elements: Vec<_> = (0..50)
            .map(|i| {
                let color = if i % 2 == 0 { Color::BLACK } else { Color::rgb(220, 220, 220) };
                element(color, 0)
            })
            .collect();
        let results = rate_all(&elements, &raster, &RateOptions::default());
        assert_eq!(results.len(), 50);
        for (i, r) in results.iter().enumerate() {
            let expected = if i % 2 == 0 { RatingStatus::Pass } else { RatingStatus::Fail };
            assert_eq!(r.status, expected, "element {i}");
        }
    }

    #[test]
    fn rate_all_empty() {
        let raster = PixelBuffer::filled(1, 1, Color::WHITE);
        assert!(rate_all(&[], &raster, &RateOptions::default()).is_empty());
    }

    const DOC: &str = r##"{
        "name": "board", "kind": "group", "frame": {"x": 0, "y": 0, "w": 20, "h": 10},
        "children": [
            {"name": "title", "kind": "text", "frame": {"x": 0, "y": 0, "w": 4, "h": 4},
             "text": {"color": "#000000", "fontSizePx": 16}},
            {"name": "faint", "kind": "text", "frame": {"x": 5, "y": 0, "w": 4, "h": 4},
             "text": {"color": "#dddddd", "fontSizePx": 16}},
            {"name": "ghost", "kind": "text", "frame": {"x": 0, "y": 5, "w": 4, "h": 4},
             "text": {"fontSizePx": 16}},
            {"name": "offscreen", "kind": "text", "frame": {"x": 50, "y": 50, "w": 4, "h": 4},
             "text": {"color": "black", "fontSizePx": 16}},
            {"name": "straddle", "kind": "group", "frame": {"x": 8, "y": 2, "w": 10, "h": 10},
             "children": [
                {"name": "split", "kind": "text", "frame": {"x": 0, "y": 0, "w": 4, "h": 4},
                 "text": {"color": "black", "fontSizePx": 16}}
            ]}
        ]
    }"##;

    fn board_raster() -> PixelBuffer {
        // white with a black stripe starting at x = 11
        let mut raster = PixelBuffer::filled(20, 10, Color::WHITE);
        raster.fill_rect(Rectangle::new(11, 0, 9, 10), Color::BLACK);
        raster
    }

    #[test]
    fn audit_document_end_to_end() {
        let root = Layer::from_json(DOC).unwrap();
        let report = audit_document(&root, &board_raster(), &RateOptions::default());

        let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["title", "faint", "ghost", "offscreen", "split"]);

        let statuses: Vec<_> = report.entries.iter().map(|e| e.result.status).collect();
        assert_eq!(
            statuses,
            [
                RatingStatus::Pass,
                RatingStatus::Fail,
                RatingStatus::Unknown,
                RatingStatus::Unknown,
                RatingStatus::Mixed,
            ]
        );
        assert_eq!(report.entries[2].result.contrast_ratio, None);
        assert_eq!(report.entries[3].result.contrast_ratio, Some(0.0));
        assert_eq!(report.entries[4].rectangle, Rectangle::new(8, 2, 4, 4));
        assert_eq!(
            report.summary,
            AuditSummary { pass: 1, fail: 1, mixed: 1, unknown: 2 }
        );
    }

    #[test]
    fn audit_report_renders_overlay() {
        let root = Layer::from_json(DOC).unwrap();
        let report = audit_document(&root, &board_raster(), &RateOptions::default());
        let mut overlay = OverlayCollector::new();
        report.render(&ReportOptions::default(), &mut overlay);

        assert_eq!(overlay.primitives.len(), report.entries.len() * 2);
        match &overlay.primitives[9] {
            ReportPrimitive::Label { text, .. } => assert_eq!(text, "MIXED 1.00:1 - 21.00:1"),
            other => panic!("expected label, got {other:?}"),
        }
    }
}
