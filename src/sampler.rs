use image::RgbaImage;

use crate::error::{ContrastError, ContrastResult};
use crate::types::{Color, Rectangle, SamplePolicy};

/// A rasterized background that can be probed pixel by pixel.
///
/// `pixel` returns `None` outside the image bounds. That is an expected
/// outcome and callers skip the sample.
pub trait RasterSource {
    fn pixel(&self, x: i32, y: i32) -> Option<Color>;
}

impl RasterSource for RgbaImage {
    fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        let [r, g, b, a] = self.get_pixel_checked(x, y)?.0;
        Some(Color::rgba(r, g, b, a))
    }
}

/// Row-major RGBA8 buffer, as handed over by a host that already rasterized
/// the region.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ContrastResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ContrastError::InvalidBuffer {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let data = [color.r, color.g, color.b, color.a].repeat(width as usize * height as usize);
        Self { width, height, data }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Paint `rect` (clipped to the buffer) with `color`.
    pub fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        let (x0, y0, x1, y1) = rect.clip_to(self.width, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let i = self.offset(x, y);
                self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        }
    }
}

impl RasterSource for PixelBuffer {
    fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        let i = self.offset(x, y);
        let px = &self.data[i..i + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }
}

/// Background color at `(x, y)`, or `None` when the point is off the raster.
pub fn sample<R: RasterSource + ?Sized>(image: &R, point: (i32, i32)) -> Option<Color> {
    image.pixel(point.0, point.1)
}

/// The four sample points of a text rectangle, in rating order:
/// top-left, top-right, bottom-left, then `(x+h-1, y+h-1)`.
///
/// The 4th x-offset reuses the height. Existing reports depend on exactly
/// these pixels; see [`sample_points`] for the corrected variant.
pub fn corner_sample_points(rect: Rectangle) -> [(i32, i32); 4] {
    let Rectangle { x, y, w, h } = rect;
    let right = x.saturating_add(w).saturating_sub(1);
    let bottom = y.saturating_add(h).saturating_sub(1);
    let quirk_x = x.saturating_add(h).saturating_sub(1);
    [(x, y), (right, y), (x, bottom), (quirk_x, bottom)]
}

pub fn sample_points(rect: Rectangle, policy: SamplePolicy) -> [(i32, i32); 4] {
    match policy {
        SamplePolicy::Corners => corner_sample_points(rect),
        SamplePolicy::CornersCorrected => {
            let [top_left, top_right, bottom_left, _] = corner_sample_points(rect);
            [top_left, top_right, bottom_left, (top_right.0, bottom_left.1)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_points_keep_height_quirk() {
        let pts = corner_sample_points(Rectangle::new(10, 20, 30, 5));
        assert_eq!(pts, [(10, 20), (39, 20), (10, 24), (14, 24)]);
    }

    #[test]
    fn corrected_points_use_width() {
        let pts = sample_points(Rectangle::new(10, 20, 30, 5), SamplePolicy::CornersCorrected);
        assert_eq!(pts[3], (39, 24));
        let pts = sample_points(Rectangle::new(10, 20, 30, 5), SamplePolicy::Corners);
        assert_eq!(pts[3], (14, 24));
    }

    #[test]
    fn corner_points_saturate_for_extreme_rects() {
        let pts = corner_sample_points(Rectangle::new(i32::MAX - 2, 0, 10, 10));
        let edge = i32::MAX - 1;
        assert_eq!(pts, [(i32::MAX - 2, 0), (edge, 0), (i32::MAX - 2, 9), (edge, 9)]);
        let buf = PixelBuffer::filled(2, 2, Color::WHITE);
        assert!(pts.iter().all(|&p| sample(&buf, p).is_none()));
    }

    #[test]
    fn buffer_offsets_are_computed_in_usize() {
        // 65_536 rows of 70_000 pixels overflow u32; the index math must not.
        let wide = PixelBuffer { width: 70_000, height: 1, data: Vec::new() };
        assert_eq!(wide.offset(69_999, 65_536), (65_536usize * 70_000 + 69_999) * 4);
    }

    #[test]
    fn buffer_rejects_wrong_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, ContrastError::InvalidBuffer { width: 2, height: 2, len: 15 }));
    }

    #[test]
    fn buffer_lookup_and_bounds() {
        let mut buf = PixelBuffer::filled(4, 3, Color::WHITE);
        buf.fill_rect(Rectangle::new(2, 0, 10, 10), Color::rgb(1, 2, 3));
        assert_eq!(sample(&buf, (0, 0)), Some(Color::WHITE));
        assert_eq!(sample(&buf, (3, 2)), Some(Color::rgb(1, 2, 3)));
        assert_eq!(sample(&buf, (4, 0)), None);
        assert_eq!(sample(&buf, (0, 3)), None);
        assert_eq!(sample(&buf, (-1, 0)), None);
    }

    #[test]
    fn rgba_image_lookup_and_bounds() {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([9, 8, 7, 255]));
        assert_eq!(sample(&img, (1, 1)), Some(Color::rgb(9, 8, 7)));
        assert_eq!(sample(&img, (2, 0)), None);
        assert_eq!(sample(&img, (0, -5)), None);
    }
}
