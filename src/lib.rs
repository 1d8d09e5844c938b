#[cfg(feature = "napi")]
#[macro_use]
extern crate napi_derive;

pub mod engine;
pub mod error;
pub mod layers;
pub mod math;
pub mod rater;
pub mod report;
pub mod sampler;
pub mod types;

#[cfg(feature = "napi")]
pub mod binding;

pub use error::{ContrastError, ContrastResult};
pub use rater::{format_ratio, rate, rate_with};
pub use sampler::{PixelBuffer, RasterSource};
pub use types::{
    Color, RateOptions, RatingResult, RatingStatus, Rectangle, SamplePolicy, TextElementInfo,
};
