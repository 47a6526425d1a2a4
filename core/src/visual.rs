//! Pixel-level visual page comparison.
//!
//! Compares aligned rasterized pages through the opaque [`PixelBuffer`]
//! capability and builds a marker overlay for downstream presentation. The
//! overlay is a diagnostic artifact: bitmap A on a white background with a
//! fixed marker color written over every differing pixel; any softer
//! highlighting is left to the presentation layer.

use crate::config::CompareConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Marker written over differing pixels in the overlay.
    pub const MARKER: Rgba = Rgba {
        r: 255,
        g: 69,
        b: 0,
        a: 255,
    };

    /// Summed per-channel RGB distance; alpha is ignored.
    pub fn channel_distance(self, other: Rgba) -> u32 {
        let dr = (self.r as i32 - other.r as i32).unsigned_abs();
        let dg = (self.g as i32 - other.g as i32).unsigned_abs();
        let db = (self.b as i32 - other.b as i32).unsigned_abs();
        dr + dg + db
    }
}

/// Capability over a rasterized page. Keeps the differ independent of any
/// concrete graphics-library type.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at (x, y); callers stay within `width × height`.
    fn get(&self, x: u32, y: u32) -> Rgba;
    fn set(&mut self, x: u32, y: u32, pixel: Rgba);
}

/// Owned RGBA bitmap; backs overlay construction and carries pages whose
/// counterpart is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Bitmap {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as u64 * height as u64) {
            data.extend_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }
        Bitmap {
            width,
            height,
            data,
        }
    }

    pub fn from_pixel_buffer(source: &dyn PixelBuffer) -> Bitmap {
        let mut bitmap = Bitmap::filled(source.width(), source.height(), Rgba::WHITE);
        for y in 0..source.height() {
            for x in 0..source.width() {
                bitmap.set(x, y, source.get(x, y));
            }
        }
        bitmap
    }

    /// Raw RGBA bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl PixelBuffer for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get(&self, x: u32, y: u32) -> Rgba {
        let i = self.index(x, y);
        Rgba {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    fn set(&mut self, x: u32, y: u32, pixel: Rgba) {
        let i = self.index(x, y);
        self.data[i] = pixel.r;
        self.data[i + 1] = pixel.g;
        self.data[i + 2] = pixel.b;
        self.data[i + 3] = pixel.a;
    }
}

#[cfg(feature = "image-buffers")]
impl PixelBuffer for image::RgbaImage {
    fn width(&self) -> u32 {
        image::RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbaImage::height(self)
    }

    fn get(&self, x: u32, y: u32) -> Rgba {
        let pixel = self.get_pixel(x, y);
        Rgba {
            r: pixel[0],
            g: pixel[1],
            b: pixel[2],
            a: pixel[3],
        }
    }

    fn set(&mut self, x: u32, y: u32, pixel: Rgba) {
        self.put_pixel(x, y, image::Rgba([pixel.r, pixel.g, pixel.b, pixel.a]));
    }
}

/// Result for one aligned page index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualPageResult {
    /// 1-based page number.
    pub page_number: u32,
    pub difference_percentage: f64,
    pub has_differences: bool,
    #[serde(skip)]
    pub overlay: Option<Bitmap>,
}

/// Share of differing pixels over the overlapping region of the two buffers,
/// as a percentage (0 when the overlap is empty).
pub fn pixel_difference_percentage(
    a: &dyn PixelBuffer,
    b: &dyn PixelBuffer,
    threshold: u32,
) -> f64 {
    let min_w = a.width().min(b.width());
    let min_h = a.height().min(b.height());
    if min_w == 0 || min_h == 0 {
        return 0.0;
    }

    let mut different: u64 = 0;
    for y in 0..min_h {
        for x in 0..min_w {
            if a.get(x, y).channel_distance(b.get(x, y)) > threshold {
                different += 1;
            }
        }
    }
    different as f64 / (min_w as f64 * min_h as f64) * 100.0
}

/// Build the overlay: a `max × max` buffer filled white, bitmap A drawn at
/// the origin at full opacity, and the marker color written over every pixel
/// of the overlapping region whose channel distance exceeds `threshold`.
pub fn build_overlay(a: &dyn PixelBuffer, b: &dyn PixelBuffer, threshold: u32) -> Bitmap {
    let width = a.width().max(b.width());
    let height = a.height().max(b.height());
    let mut overlay = Bitmap::filled(width, height, Rgba::WHITE);

    for y in 0..a.height() {
        for x in 0..a.width() {
            overlay.set(x, y, a.get(x, y));
        }
    }

    let min_w = a.width().min(b.width());
    let min_h = a.height().min(b.height());
    for y in 0..min_h {
        for x in 0..min_w {
            if a.get(x, y).channel_distance(b.get(x, y)) > threshold {
                overlay.set(x, y, Rgba::MARKER);
            }
        }
    }
    overlay
}

/// Compare one aligned page pair. A page absent on one side (never extracted,
/// or its rasterization failed) makes the pair fully different, with the
/// surviving bitmap as the overlay.
pub fn diff_page_pair(
    page_number: u32,
    a: Option<&dyn PixelBuffer>,
    b: Option<&dyn PixelBuffer>,
    config: &CompareConfig,
) -> VisualPageResult {
    match (a, b) {
        (None, None) => VisualPageResult {
            page_number,
            difference_percentage: 0.0,
            has_differences: false,
            overlay: None,
        },
        (Some(present), None) | (None, Some(present)) => VisualPageResult {
            page_number,
            difference_percentage: 100.0,
            has_differences: true,
            overlay: Some(Bitmap::from_pixel_buffer(present)),
        },
        (Some(a), Some(b)) => {
            let difference_percentage =
                pixel_difference_percentage(a, b, config.pixel_threshold);
            VisualPageResult {
                page_number,
                difference_percentage,
                has_differences: difference_percentage > config.visual_difference_threshold,
                overlay: Some(build_overlay(a, b, config.pixel_threshold)),
            }
        }
    }
}

/// Compare two ordered page sets. Results are produced for every index
/// present in at least one input; `None` marks a page that could not be
/// rasterized on that side.
pub fn compare_page_bitmaps(
    pages_a: &[Option<Bitmap>],
    pages_b: &[Option<Bitmap>],
    config: &CompareConfig,
) -> Vec<VisualPageResult> {
    let page_count = pages_a.len().max(pages_b.len());
    let mut results = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let a = pages_a.get(index).and_then(Option::as_ref);
        let b = pages_b.get(index).and_then(Option::as_ref);
        results.push(diff_page_pair(
            index as u32 + 1,
            a.map(|bitmap| bitmap as &dyn PixelBuffer),
            b.map(|bitmap| bitmap as &dyn PixelBuffer),
            config,
        ));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_distance_ignores_alpha() {
        let a = Rgba {
            r: 10,
            g: 20,
            b: 30,
            a: 0,
        };
        let b = Rgba {
            r: 15,
            g: 10,
            b: 30,
            a: 255,
        };
        assert_eq!(a.channel_distance(b), 15);
    }

    #[test]
    fn filled_bitmap_reads_back_its_fill() {
        let bitmap = Bitmap::filled(3, 2, Rgba::MARKER);
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.get(2, 1), Rgba::MARKER);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut bitmap = Bitmap::filled(2, 2, Rgba::WHITE);
        let pixel = Rgba {
            r: 1,
            g: 2,
            b: 3,
            a: 4,
        };
        bitmap.set(1, 0, pixel);
        assert_eq!(bitmap.get(1, 0), pixel);
        assert_eq!(bitmap.get(0, 0), Rgba::WHITE);
    }
}
