//! A 2D debug image represented as a flat array of RGBA pixels.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

/// Errors from writing a debug image to disk.
#[derive(Debug, Error)]
pub enum DebugImageError {
    #[error("failed to create image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// A 2D debug image for terrain visualization, stored as row-major RGBA pixels.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new black, fully transparent image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Set a single pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Count the number of unique colors (ignoring alpha) in the image.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = hashbrown::HashSet::new();
        for px in self.pixels.chunks_exact(4) {
            colors.insert((px[0], px[1], px[2]));
        }
        colors.len()
    }

    /// Places `images` side by side, top-aligned.
    ///
    /// The result is as tall as the tallest input. Uncovered pixels stay transparent.
    pub fn hstack(images: &[DebugImage]) -> DebugImage {
        let width = images.iter().map(|i| i.width).sum();
        let height = images.iter().map(|i| i.height).max().unwrap_or(0);
        let mut out = DebugImage::new(width, height);

        let mut x_offset = 0;
        for image in images {
            let row_bytes = (image.width * 4) as usize;
            for y in 0..image.height {
                let src = (y * image.width * 4) as usize;
                let dst = ((y * width + x_offset) * 4) as usize;
                out.pixels[dst..dst + row_bytes]
                    .copy_from_slice(&image.pixels[src..src + row_bytes]);
            }
            x_offset += image.width;
        }
        out
    }

    /// Writes the image as an 8-bit RGBA PNG.
    pub fn write_png(&self, path: &Path) -> Result<(), DebugImageError> {
        let file = File::create(path)?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        tracing::debug!(path = %path.display(), width = self.width, height = self.height, "wrote debug image");
        Ok(())
    }
}
