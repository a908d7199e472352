// SPDX-License-Identifier: MIT

//! Monochrome mouse cursors.

use crate::color::Color;
use crate::error::Error;
use crate::types::{Point2d, Size2d};
use crate::xpm::XpmHeader;
use crate::Result;

/// A 1-bit cursor bitmap with a transparency mask and a hotspot.
///
/// Both bitmaps hold `width / 8` bytes per row, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    data: Vec<u8>,
    mask: Vec<u8>,
    size: Size2d,
    hotspot: Point2d,
}

fn check_geometry(size: Size2d, hotspot: Point2d) -> Result<()> {
    if size.width < 8 || size.height < 8 || size.width % 8 != 0 {
        return Err(Error::Cursor("invalid cursor size".to_string()));
    }
    if hotspot.x < 0
        || hotspot.y < 0
        || hotspot.x as u32 >= size.width
        || hotspot.y as u32 >= size.height
    {
        return Err(Error::Cursor("invalid cursor point".to_string()));
    }
    Ok(())
}

impl Cursor {
    /// Create a cursor from raw data and mask bitmaps.
    pub fn new(data: &[u8], mask: &[u8], size: Size2d, hotspot: Point2d) -> Result<Self> {
        check_geometry(size, hotspot)?;
        let len = (size.width / 8) as usize * size.height as usize;
        if data.len() != len || mask.len() != len {
            return Err(Error::Cursor("invalid cursor size".to_string()));
        }

        Ok(Self {
            data: data.to_vec(),
            mask: mask.to_vec(),
            size,
            hotspot,
        })
    }

    /// Create a cursor from a two or three color XPM with one character per pixel.
    ///
    /// `X` and `+` are black, `.` is white and a space is transparent.
    pub fn from_xpm<S: AsRef<str>>(xpm: &[S], hot_x: u32, hot_y: u32) -> Result<Self> {
        let header = xpm
            .first()
            .ok_or_else(|| Error::Cursor("invalid cursor xpm format".to_string()))
            .and_then(|h| XpmHeader::parse(h.as_ref()))?;
        let size = header.size;
        check_geometry(size, Point2d::new(hot_x as i32, hot_y as i32))?;
        if !(2..=3).contains(&header.colors) || header.chars_per_pixel != 1 {
            return Err(Error::Cursor("invalid cursor xpm format".to_string()));
        }
        if xpm.len() < 1 + header.colors + size.height as usize {
            return Err(Error::Cursor("invalid cursor xpm".to_string()));
        }

        let pitch = (size.width / 8) as usize;
        let mut data = vec![0u8; pitch * size.height as usize];
        let mut mask = vec![0u8; pitch * size.height as usize];

        let rows = xpm.iter().skip(1 + header.colors);
        let mut count = 0;
        for (row, line) in rows.take(size.height as usize).enumerate() {
            let line = line.as_ref().as_bytes();
            if line.len() < size.width as usize {
                return Err(Error::Cursor("invalid cursor xpm".to_string()));
            }
            for col in 0..size.width as usize {
                let index = row * pitch + col / 8;
                let bit = 1u8 << (7 - col % 8);
                match line[col] {
                    b'X' | b'+' => {
                        data[index] |= bit;
                        mask[index] |= bit;
                    }
                    b'.' => mask[index] |= bit,
                    b' ' => {}
                    _ => return Err(Error::Cursor("invalid cursor xpm".to_string())),
                }
            }
            count += 1;
        }
        if count != size.height as usize {
            return Err(Error::Cursor("invalid cursor xpm".to_string()));
        }

        Ok(Self {
            data,
            mask,
            size,
            hotspot: Point2d::new(hot_x as i32, hot_y as i32),
        })
    }

    /// The data bitmap.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The mask bitmap.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// The bitmap size.
    pub fn size(&self) -> Size2d {
        self.size
    }

    /// The hotspot, relative to the top-left corner.
    pub fn hotspot(&self) -> Point2d {
        self.hotspot
    }

    /// Exchange two cursors.
    pub fn swap(&mut self, other: &mut Cursor) {
        std::mem::swap(self, other);
    }

    /// Expand the bitmaps to RGBA pixels.
    ///
    /// Data without mask (an inverted pixel on some platforms) is rendered black.
    pub fn to_rgba(&self) -> Vec<Color> {
        let pitch = (self.size.width / 8) as usize;
        let mut pixels = Vec::with_capacity(self.size.area());
        for row in 0..self.size.height as usize {
            for col in 0..self.size.width as usize {
                let index = row * pitch + col / 8;
                let bit = 1u8 << (7 - col % 8);
                let d = self.data[index] & bit != 0;
                let m = self.mask[index] & bit != 0;
                pixels.push(match (d, m) {
                    (false, false) => Color::TRANSPARENT,
                    (false, true) => Color::rgb(0xff, 0xff, 0xff),
                    (true, _) => Color::rgb(0, 0, 0),
                });
            }
        }
        pixels
    }
}

/// Built-in cursors.
pub mod cursors {
    use super::Cursor;
    use once_cell::sync::Lazy;

    const ARROW: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "..              ",
        ".X.             ",
        ".XX.            ",
        ".XXX.           ",
        ".XXXX.          ",
        ".XXXXX.         ",
        ".XXXXXX.        ",
        ".XXXXXXX.       ",
        ".XXXXXXXX.      ",
        ".XXXXX.....     ",
        ".XX.XX.         ",
        ".X. .XX.        ",
        "..  .XX.        ",
        ".    .XX.       ",
        "     .XX.       ",
        "      ..        ",
    ];

    const CROSSHAIR: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "                ",
        "      .X.       ",
        "      .X.       ",
        "      .X.       ",
        "      .X.       ",
        "      .X.       ",
        " ......X......  ",
        " XXXXXXXXXXXXX  ",
        " ......X......  ",
        "      .X.       ",
        "      .X.       ",
        "      .X.       ",
        "      .X.       ",
        "      .X.       ",
        "                ",
        "                ",
    ];

    const N_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        " .............. ",
        " .XXXXXXXXXXXX. ",
        " .XXXXXXXXXXXX. ",
        " .............. ",
        "      .XX.      ",
        "     .XXXX.     ",
        "    .XXXXXX.    ",
        "   .XX.XX.XX.   ",
        "  .XX..XX..XX.  ",
        "  .X. .XX. .X.  ",
        "   .  .XX.  .   ",
        "      .XX.      ",
        "      .XX.      ",
        "      .XX.      ",
        "      .XX.      ",
        "      ....      ",
    ];

    const S_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "      ....      ",
        "      .XX.      ",
        "      .XX.      ",
        "      .XX.      ",
        "      .XX.      ",
        "   .  .XX.  .   ",
        "  .X. .XX. .X.  ",
        "  .XX..XX..XX.  ",
        "   .XX.XX.XX.   ",
        "    .XXXXXX.    ",
        "     .XXXX.     ",
        "      .XX.      ",
        " .............. ",
        " .XXXXXXXXXXXX. ",
        " .XXXXXXXXXXXX. ",
        " .............. ",
    ];

    const E_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "                ",
        "            ....",
        "      ..    .XX.",
        "     .XX.   .XX.",
        "      .XX.  .XX.",
        "       .XX. .XX.",
        ".........XX..XX.",
        ".XXXXXXXXXXX.XX.",
        ".XXXXXXXXXXX.XX.",
        ".........XX..XX.",
        "       .XX. .XX.",
        "      .XX.  .XX.",
        "     .XX.   .XX.",
        "      ..    .XX.",
        "            ....",
        "                ",
    ];

    const W_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "                ",
        "....            ",
        ".XX.    ..      ",
        ".XX.   .XX.     ",
        ".XX.  .XX.      ",
        ".XX. .XX.       ",
        ".XX..XX.........",
        ".XX.XXXXXXXXXXX.",
        ".XX.XXXXXXXXXXX.",
        ".XX..XX.........",
        ".XX. .XX.       ",
        ".XX.  .XX.      ",
        ".XX.   .XX.     ",
        ".XX.    ..      ",
        "....            ",
        "                ",
    ];

    const NW_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "..............  ",
        ".XXXXXXXXXXXX.  ",
        ".XXXXXXXXXXXX.  ",
        ".XX...........  ",
        ".XX.XXXXXXXX.   ",
        ".XX.XXX......   ",
        ".XX.XXXX.       ",
        ".XX.X.XXX.      ",
        ".XX.X..XXX.     ",
        ".XX.X. .XXX.    ",
        ".XX.X.  .XXX.   ",
        ".XX.X.   .XX.   ",
        ".XX...    ...   ",
        "....            ",
        "                ",
        "                ",
    ];

    const NE_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "  ..............",
        "  .XXXXXXXXXXXX.",
        "  .XXXXXXXXXXXX.",
        "  ...........XX.",
        "   .XXXXXXXX.XX.",
        "   ......XXX.XX.",
        "       .XXXX.XX.",
        "      .XXX.X.XX.",
        "     .XXX..X.XX.",
        "    .XXX. .X.XX.",
        "   .XXX.  .X.XX.",
        "   .XX.   .X.XX.",
        "   ...    ...XX.",
        "            ....",
        "                ",
        "                ",
    ];

    const SE_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "                ",
        "                ",
        "            ....",
        "   ...    ...XX.",
        "   .XX.   .X.XX.",
        "   .XXX.  .X.XX.",
        "    .XXX. .X.XX.",
        "     .XXX..X.XX.",
        "      .XXX.X.XX.",
        "       .XXXX.XX.",
        "   ......XXX.XX.",
        "   .XXXXXXXX.XX.",
        "  ...........XX.",
        "  .XXXXXXXXXXXX.",
        "  .XXXXXXXXXXXX.",
        "  ..............",
    ];

    const SW_RESIZE: [&str; 20] = [
        "   16   16   3  1",
        "X c #000000",
        ". c #ffffff",
        "  c None",
        "                ",
        "                ",
        "....            ",
        ".XX...    ...   ",
        ".XX.X.   .XX.   ",
        ".XX.X.  .XXX.   ",
        ".XX.X. .XXX.    ",
        ".XX.X..XXX.     ",
        ".XX.X.XXX.      ",
        ".XX.XXXX.       ",
        ".XX.XXX......   ",
        ".XX.XXXXXXXX.   ",
        ".XX...........  ",
        ".XXXXXXXXXXXX.  ",
        ".XXXXXXXXXXXX.  ",
        "..............  ",
    ];

    fn builtin(xpm: &[&str], x: u32, y: u32) -> Cursor {
        // the tables above are fixed, so this can only fail if one of them is edited badly
        Cursor::from_xpm(xpm, x, y).expect("built-in cursor table is malformed")
    }

    static ARROW_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&ARROW, 0, 0));
    static CROSSHAIR_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&CROSSHAIR, 7, 7));
    static N_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&N_RESIZE, 7, 0));
    static S_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&S_RESIZE, 7, 15));
    static E_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&E_RESIZE, 15, 7));
    static W_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&W_RESIZE, 0, 7));
    static NE_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&NE_RESIZE, 15, 0));
    static NW_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&NW_RESIZE, 0, 0));
    static SE_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&SE_RESIZE, 15, 15));
    static SW_RESIZE_CURSOR: Lazy<Cursor> = Lazy::new(|| builtin(&SW_RESIZE, 0, 15));

    /// The default arrow pointer.
    pub fn arrow() -> &'static Cursor {
        &ARROW_CURSOR
    }

    /// A crosshair centered on the hotspot.
    pub fn crosshair() -> &'static Cursor {
        &CROSSHAIR_CURSOR
    }

    /// Resize towards the top edge.
    pub fn n_resize() -> &'static Cursor {
        &N_RESIZE_CURSOR
    }

    /// Resize towards the bottom edge.
    pub fn s_resize() -> &'static Cursor {
        &S_RESIZE_CURSOR
    }

    /// Resize towards the right edge.
    pub fn e_resize() -> &'static Cursor {
        &E_RESIZE_CURSOR
    }

    /// Resize towards the left edge.
    pub fn w_resize() -> &'static Cursor {
        &W_RESIZE_CURSOR
    }

    /// Resize towards the top-right corner.
    pub fn ne_resize() -> &'static Cursor {
        &NE_RESIZE_CURSOR
    }

    /// Resize towards the top-left corner.
    pub fn nw_resize() -> &'static Cursor {
        &NW_RESIZE_CURSOR
    }

    /// Resize towards the bottom-right corner.
    pub fn se_resize() -> &'static Cursor {
        &SE_RESIZE_CURSOR
    }

    /// Resize towards the bottom-left corner.
    pub fn sw_resize() -> &'static Cursor {
        &SW_RESIZE_CURSOR
    }
}
