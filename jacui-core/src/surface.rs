// SPDX-License-Identifier: MIT

//! Pixel surfaces: filling, clipping and blitting.
//!
//! Every surface stores row-major [Color] pixels. A surface that [has_alpha](Surface::has_alpha)
//! is blended onto the destination when blitted, every other surface is copied verbatim.

use crate::color::Color;
use crate::types::{Point2d, Rect2d, Size2d};

/// Read access to a pixel surface.
pub trait Surface {
    /// The size of the surface.
    fn size(&self) -> Size2d;

    /// All pixels, row by row.
    fn pixels(&self) -> &[Color];

    /// Whether the surface carries per-pixel alpha that should be blended when blitting.
    fn has_alpha(&self) -> bool {
        false
    }

    /// The width in pixels.
    fn width(&self) -> u32 {
        self.size().width
    }

    /// The height in pixels.
    fn height(&self) -> u32 {
        self.size().height
    }

    /// Whether the surface has no pixels.
    fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// The pixel at `p`, or [None] outside of the surface.
    fn pixel(&self, p: Point2d) -> Option<Color> {
        let size = self.size();
        if !Rect2d::from(size).includes(p) {
            return None;
        }
        self.pixels()
            .get(p.y as usize * size.width as usize + p.x as usize)
            .copied()
    }
}

/// Write access to a pixel surface.
///
/// All drawing is restricted to the clip rectangle.
pub trait SurfaceMut: Surface {
    /// Mutable access to all pixels, row by row.
    fn pixels_mut(&mut self) -> &mut [Color];

    /// The current clip rectangle.
    fn clip(&self) -> Rect2d;

    /// Store an already validated clip rectangle.
    fn store_clip(&mut self, clip: Rect2d);

    /// Set the clip rectangle and return the effective one.
    ///
    /// The rectangle is intersected with the surface bounds. An empty rectangle resets
    /// the clip to the whole surface.
    fn set_clip(&mut self, rect: Rect2d) -> Rect2d {
        let bounds = Rect2d::from(self.size());
        let clip = if rect.is_empty() {
            bounds
        } else {
            bounds.intersect(&rect)
        };
        self.store_clip(clip);
        clip
    }

    /// Fill the clip rectangle.
    fn fill(&mut self, color: Color) {
        let rect = Rect2d::from(self.size());
        self.fill_rect(color, rect);
    }

    /// Fill `rect` (restricted to the clip rectangle).
    fn fill_rect(&mut self, color: Color, rect: Rect2d) {
        let area = self.clip().intersect(&rect);
        if area.is_empty() {
            return;
        }

        let color = if self.has_alpha() { color } else { color.with_alpha(0xff) };
        let stride = self.width() as usize;
        let pixels = self.pixels_mut();
        for row in area.y as usize..area.y as usize + area.height as usize {
            let start = row * stride + area.x as usize;
            pixels[start..start + area.width as usize].fill(color);
        }
    }

    /// Blit the whole of `src` to the origin.
    fn blit<S: Surface + ?Sized>(&mut self, src: &S) {
        self.blit_rect(src, Rect2d::from(src.size()), Point2d::default());
    }

    /// Blit the whole of `src` with its top-left corner at `dst`.
    fn blit_at<S: Surface + ?Sized>(&mut self, src: &S, dst: Point2d) {
        self.blit_rect(src, Rect2d::from(src.size()), dst);
    }

    /// Blit the whole of `src` into `dst`. Nothing outside `dst` is touched.
    fn blit_into<S: Surface + ?Sized>(&mut self, src: &S, dst: Rect2d) {
        self.blit_rect_into(src, Rect2d::from(src.size()), dst);
    }

    /// Blit the `src_rect` part of `src` with its top-left corner at `dst`.
    fn blit_rect<S: Surface + ?Sized>(&mut self, src: &S, src_rect: Rect2d, dst: Point2d) {
        let bounds = self.clip();
        blit_clipped(self, src, src_rect, dst, bounds);
    }

    /// Blit the `src_rect` part of `src` into `dst`. There is no scaling: `dst` only bounds
    /// the copied region.
    fn blit_rect_into<S: Surface + ?Sized>(&mut self, src: &S, src_rect: Rect2d, dst: Rect2d) {
        let bounds = self.clip().intersect(&dst);
        blit_clipped(self, src, src_rect, dst.offset(), bounds);
    }
}

fn blit_clipped<D, S>(dst: &mut D, src: &S, src_rect: Rect2d, at: Point2d, bounds: Rect2d)
where
    D: SurfaceMut + ?Sized,
    S: Surface + ?Sized,
{
    let src_rect = Rect2d::from(src.size()).intersect(&src_rect);
    if src_rect.is_empty() || bounds.is_empty() {
        return;
    }

    // shift the destination by however much the source rect was clipped on the left/top
    let target = Rect2d::new(at, src_rect.size()).intersect(&bounds);
    if target.is_empty() {
        return;
    }
    let dx = target.x as i64 - at.x as i64;
    let dy = target.y as i64 - at.y as i64;
    let sx = (src_rect.x as i64 + dx) as usize;
    let sy = (src_rect.y as i64 + dy) as usize;

    let blend = src.has_alpha();
    let src_stride = src.width() as usize;
    let dst_stride = dst.width() as usize;
    let src_pixels = src.pixels();
    let dst_pixels = dst.pixels_mut();

    for row in 0..target.height as usize {
        let s = (sy + row) * src_stride + sx;
        let d = (target.y as usize + row) * dst_stride + target.x as usize;
        let width = target.width as usize;
        let from = &src_pixels[s..s + width];
        let to = &mut dst_pixels[d..d + width];

        if blend {
            for (t, f) in to.iter_mut().zip(from) {
                *t = f.over(*t);
            }
        } else {
            to.copy_from_slice(from);
        }
    }
}

/// An owned, resizable drawing surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    size: Size2d,
    pixels: Vec<Color>,
    clip: Rect2d,
    alpha: bool,
}

impl Canvas {
    /// Create an opaque canvas filled with black.
    pub fn new(size: Size2d) -> Self {
        Self::with_fill(size, Color::rgb(0, 0, 0), false)
    }

    /// Create a canvas with per-pixel alpha, initially fully transparent.
    pub fn with_alpha(size: Size2d) -> Self {
        Self::with_fill(size, Color::TRANSPARENT, true)
    }

    /// Create a canvas from existing pixels. Fails if the pixel count doesn't match `size`.
    pub fn from_pixels(size: Size2d, pixels: Vec<Color>, alpha: bool) -> crate::Result<Self> {
        if pixels.len() != size.area() {
            return Err(crate::Error::Surface(format!(
                "expected {} pixels for {}x{}, got {}",
                size.area(),
                size.width,
                size.height,
                pixels.len()
            )));
        }
        Ok(Self {
            size,
            pixels,
            clip: Rect2d::from(size),
            alpha,
        })
    }

    fn with_fill(size: Size2d, color: Color, alpha: bool) -> Self {
        Self {
            size,
            pixels: vec![color; size.area()],
            clip: Rect2d::from(size),
            alpha,
        }
    }

    /// Resize the canvas and reset the clip.
    ///
    /// The previous contents stay at the top-left corner, cropped to the new size. Added area
    /// is black, or transparent for a canvas with alpha.
    pub fn resize(&mut self, size: Size2d) {
        let fill = if self.alpha { Color::TRANSPARENT } else { Color::rgb(0, 0, 0) };
        let mut resized = Self::with_fill(size, fill, self.alpha);

        // a plain copy, alpha canvases keep their pixels unblended
        let width = self.size.width.min(size.width) as usize;
        let height = self.size.height.min(size.height) as usize;
        if width > 0 {
            let old = self.pixels.chunks_exact(self.size.width as usize);
            let new = resized.pixels.chunks_exact_mut(size.width as usize);
            for (to, from) in new.zip(old).take(height) {
                to[..width].copy_from_slice(&from[..width]);
            }
        }

        *self = resized;
    }

    /// Whether blits from this canvas blend.
    pub fn set_alpha(&mut self, alpha: bool) {
        self.alpha = alpha;
    }

    /// Exchange the contents of two canvases.
    pub fn swap(&mut self, other: &mut Canvas) {
        std::mem::swap(self, other);
    }

    /// The pixels as raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl Surface for Canvas {
    fn size(&self) -> Size2d {
        self.size
    }

    fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn has_alpha(&self) -> bool {
        self.alpha
    }
}

impl SurfaceMut for Canvas {
    fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    fn clip(&self) -> Rect2d {
        self.clip
    }

    fn store_clip(&mut self, clip: Rect2d) {
        self.clip = clip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::colors;

    fn checker(size: Size2d) -> Canvas {
        let mut c = Canvas::new(size);
        for y in 0..size.height as i32 {
            for x in 0..size.width as i32 {
                if (x + y) % 2 == 0 {
                    c.fill_rect(colors::WHITE, Rect2d::from_xywh(x, y, 1, 1));
                }
            }
        }
        c
    }

    #[test]
    fn test_default_canvas_is_empty() {
        let c = Canvas::default();
        assert!(c.is_empty());
        assert_eq!(c.pixels().len(), 0);
    }

    #[test]
    fn test_fill_respects_clip() {
        let mut c = Canvas::new(Size2d::new(4, 4));
        let clip = c.set_clip(Rect2d::from_xywh(2, 2, 10, 10));
        assert_eq!(clip, Rect2d::from_xywh(2, 2, 2, 2));

        c.fill(colors::RED);
        assert_eq!(c.pixel(Point2d::new(3, 3)), Some(colors::RED));
        assert_eq!(c.pixel(Point2d::new(1, 1)), Some(colors::BLACK));

        let reset = c.set_clip(Rect2d::default());
        assert_eq!(reset, Rect2d::from_xywh(0, 0, 4, 4));
    }

    #[test]
    fn test_fill_on_opaque_canvas_ignores_alpha() {
        let mut c = Canvas::new(Size2d::new(2, 2));
        c.fill(Color::rgba(10, 20, 30, 0));
        assert_eq!(c.pixel(Point2d::new(0, 0)), Some(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn test_blit_copies_and_clips() {
        let src = checker(Size2d::new(3, 3));
        let mut dst = Canvas::new(Size2d::new(4, 4));
        dst.fill(colors::BLUE);
        dst.blit_at(&src, Point2d::new(2, -1));

        // only the lower-left 2x2 of the source lands on the destination
        assert_eq!(dst.pixel(Point2d::new(2, 0)), src.pixel(Point2d::new(0, 1)));
        assert_eq!(dst.pixel(Point2d::new(3, 1)), src.pixel(Point2d::new(1, 2)));
        assert_eq!(dst.pixel(Point2d::new(1, 0)), Some(colors::BLUE));
        assert_eq!(dst.pixel(Point2d::new(2, 2)), Some(colors::BLUE));
    }

    #[test]
    fn test_blit_rect_into_bounds_region() {
        let mut src = Canvas::new(Size2d::new(5, 5));
        src.fill(colors::LIME);
        let mut dst = Canvas::new(Size2d::new(6, 6));
        dst.blit_rect_into(&src, Rect2d::from_xywh(1, 1, 4, 4), Rect2d::from_xywh(1, 1, 2, 2));

        assert_eq!(dst.pixel(Point2d::new(1, 1)), Some(colors::LIME));
        assert_eq!(dst.pixel(Point2d::new(2, 2)), Some(colors::LIME));
        assert_eq!(dst.pixel(Point2d::new(3, 3)), Some(colors::BLACK));
    }

    #[test]
    fn test_alpha_source_blends() {
        let mut src = Canvas::with_alpha(Size2d::new(2, 1));
        src.fill_rect(Color::rgba(255, 255, 255, 128), Rect2d::from_xywh(0, 0, 1, 1));

        let mut dst = Canvas::new(Size2d::new(2, 1));
        dst.fill(colors::BLACK);
        dst.blit(&src);

        assert_eq!(dst.pixel(Point2d::new(0, 0)), Some(Color::rgb(128, 128, 128)));
        // transparent pixel leaves the destination alone
        assert_eq!(dst.pixel(Point2d::new(1, 0)), Some(colors::BLACK));
    }

    #[test]
    fn test_resize_keeps_contents() {
        let mut c = Canvas::new(Size2d::new(2, 2));
        c.fill(colors::RED);
        c.set_clip(Rect2d::from_xywh(0, 0, 1, 1));
        c.resize(Size2d::new(3, 3));

        assert_eq!(c.size(), Size2d::new(3, 3));
        assert_eq!(c.clip(), Rect2d::from_xywh(0, 0, 3, 3));
        assert_eq!(c.pixel(Point2d::new(0, 0)), Some(colors::RED));
        assert_eq!(c.pixel(Point2d::new(1, 1)), Some(colors::RED));
        assert_eq!(c.pixel(Point2d::new(2, 0)), Some(colors::BLACK));
        assert_eq!(c.pixel(Point2d::new(0, 2)), Some(colors::BLACK));

        c.resize(Size2d::new(1, 2));
        assert_eq!(c.pixels(), &[colors::RED, colors::RED]);

        c.resize(Size2d::default());
        assert!(c.is_empty());
        c.resize(Size2d::new(1, 1));
        assert_eq!(c.pixels(), &[colors::BLACK]);
    }

    #[test]
    fn test_resize_alpha_canvas() {
        let half = Color::rgba(0, 0, 0xff, 0x80);
        let mut c = Canvas::with_alpha(Size2d::new(1, 1));
        c.fill(half);
        c.resize(Size2d::new(2, 1));
        assert_eq!(c.pixels(), &[half, Color::TRANSPARENT]);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Canvas::from_pixels(Size2d::new(2, 2), vec![Color::TRANSPARENT; 3], true).is_err());
        assert!(Canvas::from_pixels(Size2d::new(2, 2), vec![Color::TRANSPARENT; 4], true).is_ok());
    }
}
