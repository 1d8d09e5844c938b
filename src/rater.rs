use log::{debug, trace};

use crate::math::composite::mix;
use crate::math::wcag::{contrast_ratio, luminance, passing_threshold};
use crate::sampler::{sample, sample_points, RasterSource};
use crate::types::{RateOptions, RatingResult, RatingStatus, TextElementInfo};

/// Format a contrast ratio for display: `NaN -> "NA"`, else `"X.XX:1"`.
pub fn format_ratio(value: f64) -> String {
    if value.is_nan() {
        "NA".to_string()
    } else {
        format!("{:.2}:1", value)
    }
}

/// Running pass/fail counts and ratio range over in-bounds samples.
#[derive(Debug, Default)]
struct SampleTally {
    passed: u32,
    failed: u32,
    min: f64,
    max: f64,
}

impl SampleTally {
    fn record(&mut self, ratio: f64, threshold: f64) {
        if self.passed + self.failed == 0 {
            self.min = ratio;
            self.max = ratio;
        } else {
            self.min = self.min.min(ratio);
            self.max = self.max.max(ratio);
        }
        if ratio >= threshold {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    fn into_result(self) -> RatingResult {
        let (status, note) = match (self.passed, self.failed) {
            (0, 0) => {
                return RatingResult {
                    status: RatingStatus::Unknown,
                    contrast_ratio: Some(0.0),
                    note: None,
                }
            }
            (_, 0) => (RatingStatus::Pass, None),
            (0, _) => (RatingStatus::Fail, None),
            _ => (
                RatingStatus::Mixed,
                Some(format!("{} - {}", format_ratio(self.min), format_ratio(self.max))),
            ),
        };
        RatingResult {
            status,
            contrast_ratio: Some(self.min),
            note,
        }
    }
}

/// Rate one text element against the background raster with default options.
pub fn rate<R: RasterSource + ?Sized>(element: &TextElementInfo, background: &R) -> RatingResult {
    rate_with(element, background, &RateOptions::default())
}

/// Rate one text element against the background raster.
///
/// Each in-bounds sample composites the text color over the sampled pixel,
/// using the text alpha times the effective opacity as blend amount, and is
/// classified against the AA threshold for the element's font. Samples off
/// the raster are skipped. Never fails: missing data yields `Unknown`.
pub fn rate_with<R: RasterSource + ?Sized>(
    element: &TextElementInfo,
    background: &R,
    options: &RateOptions,
) -> RatingResult {
    let Some(text_color) = element.text_color else {
        debug!("rating unknown: text color unresolvable for {:?}", element.rectangle);
        return RatingResult {
            status: RatingStatus::Unknown,
            contrast_ratio: None,
            note: None,
        };
    };

    let threshold = passing_threshold(element.font_size_px, element.is_bold);
    let amount = (text_color.a as f64 * element.effective_opacity / 255.0) * 100.0;

    let mut tally = SampleTally::default();
    for point in sample_points(element.rectangle, options.sample_policy) {
        let Some(bg) = sample(background, point) else {
            trace!("sample {:?} out of bounds", point);
            continue;
        };
        let blended = mix(bg, text_color, Some(amount));
        let ratio = contrast_ratio(luminance(blended), luminance(bg));
        trace!("sample {:?}: bg {} blended {} ratio {:.3}", point, bg, blended, ratio);
        tally.record(ratio, threshold);
    }

    if tally.passed + tally.failed == 0 {
        debug!("rating unknown: all samples out of bounds for {:?}", element.rectangle);
    }
    tally.into_result()
}
