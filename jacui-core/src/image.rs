// SPDX-License-Identifier: MIT

//! Decoded raster images.

use std::path::Path;

use crate::color::Color;
use crate::surface::{Canvas, Surface};
use crate::types::Size2d;
use crate::Result;

/// A read-only surface holding a decoded image file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    canvas: Canvas,
}

impl Image {
    /// Decode an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading image {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_memory(&data)
    }

    /// Decode an image from memory. The format is guessed from the data.
    pub fn from_memory(data: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(data)?;
        let alpha = decoded.color().has_alpha();
        let rgba = decoded.to_rgba8();
        let size = Size2d::new(rgba.width(), rgba.height());
        let pixels = bytemuck::cast_slice::<u8, Color>(rgba.as_raw()).to_vec();

        Ok(Self {
            canvas: Canvas::from_pixels(size, pixels, alpha)?,
        })
    }

    /// Replace the image with the contents of `path`. On error the image is left unchanged.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = Self::open(path)?;
        Ok(())
    }

    /// Replace the image with data decoded from memory. On error the image is left unchanged.
    pub fn load_memory(&mut self, data: &[u8]) -> Result<()> {
        *self = Self::from_memory(data)?;
        Ok(())
    }

    /// Exchange two images.
    pub fn swap(&mut self, other: &mut Image) {
        std::mem::swap(self, other);
    }

    /// Copy the image into an editable canvas.
    pub fn to_canvas(&self) -> Canvas {
        self.canvas.clone()
    }
}

impl Surface for Image {
    fn size(&self) -> Size2d {
        self.canvas.size()
    }

    fn pixels(&self) -> &[Color] {
        self.canvas.pixels()
    }

    fn has_alpha(&self) -> bool {
        self.canvas.has_alpha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point2d;
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png_with_alpha() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(1, 1, Rgba([10, 20, 30, 40]));
        let image = Image::from_memory(&encode_png(&img)).unwrap();

        assert_eq!(image.size(), Size2d::new(3, 2));
        assert!(image.has_alpha());
        assert_eq!(image.pixel(Point2d::new(1, 1)), Some(Color::rgba(10, 20, 30, 40)));
        assert_eq!(image.pixel(Point2d::new(0, 0)), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_failed_load_keeps_image() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]));
        let mut image = Image::from_memory(&encode_png(&img)).unwrap();

        assert!(image.load_memory(b"not an image").is_err());
        assert_eq!(image.size(), Size2d::new(1, 1));
    }
}
