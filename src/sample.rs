//! Image sampling - resizes a decoded image down to one pixel per grid cell.

use crate::pixel::{ImageData, Pixel};
use crate::{PixtextError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// Largest grid a single image may be sampled into.
pub const MAX_GRID_CELLS: u64 = 1_000_000;
/// Largest intermediate image drawn while supersampling.
pub const MAX_SAMPLED_PIXELS: u64 = 64 * MAX_GRID_CELLS;

/// Grid height for `target_width` columns, keeping the image's aspect ratio.
pub fn grid_height(image_width: u32, image_height: u32, target_width: u32) -> u32 {
    let aspect = image_height as f64 / image_width as f64;
    let height = (target_width as f64 * aspect).floor() as u32;
    if height == 0 {
        log::warn!("{image_width}x{image_height} image is too wide for {target_width} columns, using one row");
    }
    height.max(1)
}

/// Samples `image` into `target_width` columns.
///
/// The image is first drawn at `scale_factor` times the target size and then
/// reduced, which averages more source pixels into each cell than a single
/// resize would.
pub fn sample_image(image: &DynamicImage, target_width: u32, scale_factor: f32) -> Result<ImageData> {
    if target_width == 0 {
        return Err(PixtextError::InvalidConfig("target width must be at least 1".into()));
    }
    let (img_w, img_h) = (image.width(), image.height());
    if img_w == 0 || img_h == 0 {
        return Err(PixtextError::EmptyImage);
    }

    let scale = if scale_factor.is_finite() { scale_factor.max(1.0) } else { 1.0 };
    let sampled_w = ((target_width as f32 * scale).round() as u32).max(target_width);
    let sampled_h = grid_height(img_w, img_h, sampled_w);
    let height = grid_height(img_w, img_h, target_width);

    let cells = target_width as u64 * height as u64;
    if cells > MAX_GRID_CELLS {
        return Err(PixtextError::InvalidConfig(format!(
            "{img_w}x{img_h} image at {target_width} columns needs {cells} cells, limit is {MAX_GRID_CELLS}"
        )));
    }
    let sampled = sampled_w as u64 * sampled_h as u64;
    if sampled > MAX_SAMPLED_PIXELS {
        return Err(PixtextError::InvalidConfig(format!(
            "scale factor {scale_factor} needs a {sampled_w}x{sampled_h} intermediate image, \
             limit is {MAX_SAMPLED_PIXELS} pixels"
        )));
    }

    let rgba = image.to_rgba8();
    let supersampled: RgbaImage = imageops::resize(&rgba, sampled_w, sampled_h, FilterType::Lanczos3);
    let reduced = if (sampled_w, sampled_h) == (target_width, height) {
        supersampled
    } else {
        imageops::resize(&supersampled, target_width, height, FilterType::Lanczos3)
    };

    log::debug!(
        "sampled {img_w}x{img_h} image via {sampled_w}x{sampled_h} down to {target_width}x{height}"
    );
    let pixels = reduced
        .pixels()
        .map(|Rgba([r, g, b, a])| Pixel::over_black(*r, *g, *b, *a))
        .collect();
    ImageData::new(pixels, target_width, height)
}

/// Decodes the image at `path` and samples it.
pub fn load_image(path: impl AsRef<Path>, target_width: u32, scale_factor: f32) -> Result<ImageData> {
    let path = path.as_ref();
    let image = image::open(path).inspect_err(|e| log::error!("Error processing image {}: {e}", path.display()))?;
    sample_image(&image, target_width, scale_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    #[test]
    fn test_grid_height_keeps_aspect() {
        assert_eq!(grid_height(200, 100, 40), 20);
        assert_eq!(grid_height(100, 150, 10), 15);
        assert_eq!(grid_height(3, 2, 10), 6);
    }

    #[test]
    fn test_grid_height_never_zero() {
        assert_eq!(grid_height(1000, 1, 10), 1);
    }

    #[test]
    fn test_sample_dimensions() {
        let data = sample_image(&solid(64, 32, [255, 0, 0, 255]), 16, 2.0).unwrap();
        assert_eq!((data.width, data.height), (16, 8));
        assert_eq!(data.pixels.len(), 128);
    }

    #[test]
    fn test_sample_solid_color() {
        let data = sample_image(&solid(50, 50, [10, 120, 230, 255]), 5, 1.0).unwrap();
        assert!(data.pixels.iter().all(|p| *p == Pixel::new(10, 120, 230)));
    }

    #[test]
    fn test_transparent_becomes_black() {
        let data = sample_image(&solid(8, 8, [200, 200, 200, 0]), 4, 1.0).unwrap();
        assert!(data.pixels.iter().all(|p| *p == Pixel::BLACK));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            sample_image(&solid(8, 8, [0, 0, 0, 255]), 0, 1.0),
            Err(PixtextError::InvalidConfig(_))
        ));
        assert!(matches!(
            sample_image(&DynamicImage::new_rgba8(0, 0), 4, 1.0),
            Err(PixtextError::EmptyImage)
        ));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        // 1000 columns of a 1x100000 strip would be 10^8 cells
        let strip = solid(1, 100_000, [0, 0, 0, 255]);
        assert!(matches!(sample_image(&strip, 1000, 1.0), Err(PixtextError::InvalidConfig(_))));
        assert!(sample_image(&strip, 1, 1.0).is_ok());
    }

    #[test]
    fn test_rejects_oversized_supersample() {
        let tall = solid(1, 1000, [0, 0, 0, 255]);
        assert!(sample_image(&tall, 1, 1.0).is_ok());
        // 300 x 300_000 intermediate exceeds the sampling limit
        assert!(matches!(sample_image(&tall, 1, 300.0), Err(PixtextError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_image("does/not/exist.png", 10, 1.0).is_err());
    }
}
