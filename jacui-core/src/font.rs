// SPDX-License-Identifier: MIT

//! TrueType/OpenType text rendering.
//!
//! Glyphs are rasterized with swash and laid out along the baseline by their advances.
//! Sizes are in points, rendered at 72 dpi (one point per pixel).

use std::cell::RefCell;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use lru::LruCache;
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::{CacheKey, FontRef, StringId};

use crate::color::Color;
use crate::error::Error;
use crate::surface::{Canvas, Surface, SurfaceMut};
use crate::types::{Point2d, Size2d};
use crate::Result;

const GLYPH_CACHE_SIZE: usize = 256;

/// A rasterized glyph.
#[derive(Debug, Default)]
struct Glyph {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    coverage: Vec<u8>,
    advance: f32,
}

/// A font face at a given point size.
pub struct Font {
    data: Arc<Vec<u8>>,
    offset: u32,
    key: CacheKey,
    size: u32,
    context: RefCell<ScaleContext>,
    glyphs: RefCell<LruCache<u16, Arc<Glyph>>>,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family())
            .field("style", &self.style())
            .field("size", &self.size)
            .finish()
    }
}

impl Clone for Font {
    fn clone(&self) -> Self {
        self.with_data(self.size)
    }
}

fn glyph_cache() -> LruCache<u16, Arc<Glyph>> {
    LruCache::new(NonZeroUsize::new(GLYPH_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN))
}

fn check_size(ptsize: u32) -> Result<()> {
    if ptsize == 0 {
        return Err(Error::Font("invalid font size".to_string()));
    }
    Ok(())
}

impl Font {
    /// Load the first face of a font file.
    pub fn open<P: AsRef<Path>>(path: P, ptsize: u32) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading font {:?} at {}pt", path, ptsize);
        Self::from_bytes(std::fs::read(path)?, ptsize)
    }

    /// Load the first face of an in-memory font file.
    pub fn from_bytes(data: Vec<u8>, ptsize: u32) -> Result<Self> {
        check_size(ptsize)?;
        let face = FontRef::from_index(&data, 0)
            .ok_or_else(|| Error::Font("unsupported font data".to_string()))?;
        let (offset, key) = (face.offset, face.key);

        Ok(Self {
            data: Arc::new(data),
            offset,
            key,
            size: ptsize,
            context: RefCell::new(ScaleContext::new()),
            glyphs: RefCell::new(glyph_cache()),
        })
    }

    /// The same face at another size.
    pub fn with_size(&self, ptsize: u32) -> Result<Self> {
        check_size(ptsize)?;
        Ok(self.with_data(ptsize))
    }

    fn with_data(&self, ptsize: u32) -> Self {
        Self {
            data: self.data.clone(),
            offset: self.offset,
            key: self.key,
            size: ptsize,
            context: RefCell::new(ScaleContext::new()),
            glyphs: RefCell::new(glyph_cache()),
        }
    }

    fn face(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }

    /// Change the point size.
    pub fn resize(&mut self, ptsize: u32) -> Result<()> {
        check_size(ptsize)?;
        if ptsize != self.size {
            self.size = ptsize;
            self.glyphs.get_mut().clear();
        }
        Ok(())
    }

    /// The point size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The family name, e.g. "DejaVu Sans".
    pub fn family(&self) -> Option<String> {
        self.name(StringId::Family)
    }

    /// The style name, e.g. "Bold".
    pub fn style(&self) -> Option<String> {
        self.name(StringId::SubFamily)
    }

    fn name(&self, id: StringId) -> Option<String> {
        self.face()
            .localized_strings()
            .find_by_id(id, None)
            .map(|s| s.chars().collect())
    }

    fn metrics(&self) -> swash::Metrics {
        self.face().metrics(&[]).scale(self.size as f32)
    }

    /// Distance from the baseline to the top of the tallest glyph.
    pub fn ascent(&self) -> i32 {
        self.metrics().ascent.abs().ceil() as i32
    }

    /// Distance from the baseline to the bottom of the lowest glyph (positive).
    pub fn descent(&self) -> i32 {
        self.metrics().descent.abs().ceil() as i32
    }

    /// Recommended distance between two baselines.
    pub fn height(&self) -> i32 {
        let metrics = self.metrics();
        let line_skip = (metrics.ascent.abs() + metrics.descent.abs() + metrics.leading).round() as i32;
        line_skip.max(self.ascent() + self.descent())
    }

    /// Extra space between two lines.
    pub fn leading(&self) -> i32 {
        (self.height() - (self.ascent() + self.descent())).max(0)
    }

    fn glyph(&self, id: u16) -> Arc<Glyph> {
        if let Some(glyph) = self.glyphs.borrow_mut().get(&id) {
            return glyph.clone();
        }

        let face = self.face();
        let size = self.size as f32;
        let advance = face.glyph_metrics(&[]).scale(size).advance_width(id);

        let mut context = self.context.borrow_mut();
        let mut scaler = context.builder(face).size(size).hint(true).build();
        let image = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ])
        .format(Format::Alpha)
        .render(&mut scaler, id);

        let glyph = Arc::new(match image {
            Some(image) => Glyph {
                left: image.placement.left,
                top: image.placement.top,
                width: image.placement.width,
                height: image.placement.height,
                coverage: match image.content {
                    Content::Mask => image.data,
                    // color bitmaps carry their coverage in the alpha channel
                    Content::Color | Content::SubpixelMask => {
                        image.data.chunks_exact(4).map(|px| px[3]).collect()
                    }
                },
                advance,
            },
            // whitespace has no outline
            None => Glyph {
                advance,
                ..Default::default()
            },
        });
        self.glyphs.borrow_mut().put(id, glyph.clone());
        glyph
    }

    fn glyphs(&self, text: &str) -> Vec<Arc<Glyph>> {
        let charmap = self.face().charmap();
        text.chars().map(|c| self.glyph(charmap.map(c))).collect()
    }

    /// The size of the rendered `text`. Empty text has no size.
    pub fn text_size(&self, text: &str) -> Size2d {
        if text.is_empty() {
            return Size2d::default();
        }
        let width: f32 = self.glyphs(text).iter().map(|g| g.advance).sum();
        Size2d::new(width.ceil() as u32, self.height() as u32)
    }

    /// Invoke `plot(x, y, coverage)` for every covered pixel of `text`, with the baseline
    /// at `ascent()`.
    fn rasterize(&self, text: &str, mut plot: impl FnMut(i32, i32, u8)) {
        let baseline = self.ascent();
        let mut pen = 0.0f32;
        for glyph in self.glyphs(text) {
            let x0 = pen.round() as i32 + glyph.left;
            let y0 = baseline - glyph.top;
            for row in 0..glyph.height as i32 {
                for col in 0..glyph.width as i32 {
                    let index = (row * glyph.width as i32 + col) as usize;
                    let coverage = glyph.coverage.get(index).copied().unwrap_or(0);
                    if coverage != 0 {
                        plot(x0 + col, y0 + row, coverage);
                    }
                }
            }
            pen += glyph.advance;
        }
    }

    /// Render `text` in `fg` on an opaque `bg` background.
    pub fn render(&self, text: &str, fg: Color, bg: Color) -> Canvas {
        let size = self.text_size(text);
        let mut canvas = Canvas::new(size);
        canvas.fill(bg);

        let fg = fg.with_alpha(0xff);
        let stride = size.width as i32;
        let pixels = canvas.pixels_mut();
        self.rasterize(text, |x, y, coverage| {
            if x < 0 || y < 0 || x >= stride || y >= size.height as i32 {
                return;
            }
            let pixel = &mut pixels[(y * stride + x) as usize];
            *pixel = fg.with_alpha(coverage).over(*pixel);
        });
        canvas
    }

    /// Render `text` in `fg` on a transparent background.
    pub fn render_blended(&self, text: &str, fg: Color) -> Canvas {
        let size = self.text_size(text);
        let mut canvas = Canvas::with_alpha(size);

        let stride = size.width as i32;
        let pixels = canvas.pixels_mut();
        self.rasterize(text, |x, y, coverage| {
            if x < 0 || y < 0 || x >= stride || y >= size.height as i32 {
                return;
            }
            let alpha = (coverage as u32 * fg.a as u32 / 255) as u8;
            let pixel = &mut pixels[(y * stride + x) as usize];
            // overlapping glyphs keep the stronger coverage
            if alpha > pixel.a {
                *pixel = fg.with_alpha(alpha);
            }
        });
        canvas
    }

    /// Draw `text` onto `surface` with the baseline starting at `point`.
    pub fn draw<S: SurfaceMut + ?Sized>(&self, surface: &mut S, text: &str, color: Color, point: Point2d) {
        if text.is_empty() {
            return;
        }
        let canvas = self.render_blended(text, color);
        surface.blit_at(&canvas, Point2d::new(point.x, point.y - self.ascent()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::colors;

    const SYSTEM_FONTS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    /// `JACUI_TEST_FONT` names a font file to use instead of the well-known system paths.
    fn system_font(ptsize: u32) -> Option<Font> {
        let font = std::env::var("JACUI_TEST_FONT")
            .ok()
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(|path| path.to_string()))
            .find_map(|path| Font::open(&path, ptsize).ok());
        if font.is_none() {
            eprintln!("skipped: no TrueType font found, set JACUI_TEST_FONT to run this test");
        }
        font
    }

    #[test]
    fn test_invalid_data() {
        let err = Font::from_bytes(b"definitely not a font".to_vec(), 12).unwrap_err();
        assert_eq!(err.to_string(), "font error: unsupported font data");
        assert!(Font::from_bytes(Vec::new(), 12).is_err());
        assert!(Font::open("/nonexistent/font.ttf", 12).is_err());
    }

    #[test]
    fn test_size_checked_first() {
        let err = Font::from_bytes(Vec::new(), 0).unwrap_err();
        assert_eq!(err.to_string(), "font error: invalid font size");
        assert!(Font::open("/nonexistent/font.ttf", 0).is_err());
    }

    #[test]
    fn test_metrics() {
        let Some(font) = system_font(24) else {
            return;
        };
        assert!(font.family().is_some());
        assert!(font.ascent() > 0);
        assert!(font.descent() >= 0);
        assert!(font.height() >= font.ascent() + font.descent());
        assert_eq!(font.leading(), font.height() - font.ascent() - font.descent());

        let bigger = font.with_size(48).unwrap();
        assert!(bigger.ascent() > font.ascent());
        assert!(font.with_size(0).is_err());
    }

    #[test]
    fn test_text_size() {
        let Some(mut font) = system_font(16) else {
            return;
        };
        assert_eq!(font.text_size(""), Size2d::default());

        let short = font.text_size("ab");
        let long = font.text_size("abab");
        assert!(long.width > short.width);
        assert_eq!(short.height as i32, font.height());

        font.resize(32).unwrap();
        assert!(font.text_size("ab").width > short.width);
    }

    #[test]
    fn test_render() {
        let Some(font) = system_font(20) else {
            return;
        };
        let shaded = font.render("Hi", colors::WHITE, colors::BLUE);
        assert!(!shaded.has_alpha());
        assert!(shaded.pixels().iter().all(|p| p.is_opaque()));
        assert!(shaded.pixels().contains(&colors::WHITE));

        let blended = font.render_blended("Hi", colors::RED);
        assert!(blended.has_alpha());
        assert!(blended.pixels().contains(&Color::TRANSPARENT));
        assert!(blended.pixels().iter().any(|p| p.a != 0 && p.r == 0xff));
    }

    #[test]
    fn test_draw_on_baseline() {
        let Some(font) = system_font(20) else {
            return;
        };
        let mut canvas = Canvas::new(Size2d::new(100, 60));
        font.draw(&mut canvas, "", colors::WHITE, Point2d::new(10, 40));
        assert!(canvas.pixels().iter().all(|p| *p == colors::BLACK));

        font.draw(&mut canvas, "H", colors::WHITE, Point2d::new(10, 40));
        // nothing of an 'H' reaches below the baseline
        let below = (41..60).all(|y| (0..100).all(|x| canvas.pixel(Point2d::new(x, y)) == Some(colors::BLACK)));
        assert!(below);
        assert!(canvas.pixels().iter().any(|p| *p != colors::BLACK));
    }
}
