// SPDX-License-Identifier: MIT

//! XPM pixmap parsing and XPM based window icons.

use std::collections::HashMap;

use crate::color::Color;
use crate::error::Error;
use crate::surface::{Canvas, Surface};
use crate::types::{Point2d, Size2d};
use crate::Result;

/// The header line of an XPM image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpmHeader {
    /// Image size.
    pub size: Size2d,
    /// Number of color definitions following the header.
    pub colors: usize,
    /// Characters per pixel.
    pub chars_per_pixel: usize,
    /// Optional hotspot.
    pub hotspot: Option<Point2d>,
}

impl XpmHeader {
    /// Parse `width height ncolors chars_per_pixel [x_hot y_hot]`.
    pub fn parse(line: &str) -> Result<Self> {
        let fields = line
            .split_whitespace()
            .map(|f| f.parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::Xpm(format!("invalid header: {:?}", line)))?;

        let (width, height, colors, cpp) = match fields[..] {
            [w, h, n, c] | [w, h, n, c, _, _] => (w, h, n, c),
            _ => return Err(Error::Xpm(format!("invalid header: {:?}", line))),
        };
        if cpp == 0 {
            return Err(Error::Xpm("zero characters per pixel".to_string()));
        }
        let hotspot = match fields[..] {
            [_, _, _, _, x, y] => Some(Point2d::new(x as i32, y as i32)),
            _ => None,
        };

        Ok(Self {
            size: Size2d::new(width, height),
            colors: colors as usize,
            chars_per_pixel: cpp as usize,
            hotspot,
        })
    }
}

/// A decoded XPM image.
#[derive(Debug, Clone, PartialEq)]
pub struct Xpm {
    /// Parsed header.
    pub header: XpmHeader,
    /// Decoded pixels, `None` colors are transparent.
    pub pixels: Vec<Color>,
}

impl Xpm {
    /// Parse XPM data given as the list of strings of the C array.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let header = XpmHeader::parse(lines.first().ok_or_else(|| missing("header"))?.as_ref())?;

        // the header counts are untrusted, size nothing from them before the lines exist
        let rest = lines.len() - 1;
        if header.colors > rest {
            return Err(missing("color"));
        }
        if header.size.height as usize > rest - header.colors {
            return Err(missing("pixel row"));
        }
        let mut lines = lines[1..].iter().map(|l| l.as_ref());

        let mut table = HashMap::with_capacity(header.colors);
        for _ in 0..header.colors {
            let line = lines.next().ok_or_else(|| missing("color"))?;
            let (key, color) = parse_color_line(line, header.chars_per_pixel)?;
            table.insert(key, color);
        }

        let width = header.size.width as usize;
        let row_len = width.saturating_mul(header.chars_per_pixel);
        let mut pixels = Vec::new();
        for row in 0..header.size.height {
            let line = lines.next().ok_or_else(|| missing("pixel row"))?;
            let chars: Vec<char> = line.chars().collect();
            if chars.len() < row_len {
                return Err(Error::Xpm(format!("row {} is too short", row)));
            }
            for key in chars[..row_len].chunks(header.chars_per_pixel) {
                let key: String = key.iter().collect();
                let color = table
                    .get(&key)
                    .ok_or_else(|| Error::Xpm(format!("undefined pixel {:?} in row {}", key, row)))?;
                pixels.push(*color);
            }
        }

        Ok(Self { header, pixels })
    }

    /// Parse the text of an `.xpm` file, i.e. the quoted strings of its C array.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_lines(&quoted_strings(text))
    }

    /// Image size.
    pub fn size(&self) -> Size2d {
        self.header.size
    }
}

fn missing(what: &str) -> Error {
    Error::Xpm(format!("missing {} line", what))
}

fn parse_color_line(line: &str, cpp: usize) -> Result<(String, Color)> {
    let key: String = line.chars().take(cpp).collect();
    if key.chars().count() != cpp {
        return Err(Error::Xpm(format!("invalid color line: {:?}", line)));
    }
    let rest: String = line.chars().skip(cpp).collect();

    // key/value pairs, only the color visual ("c") is used
    let mut words = rest.split_whitespace();
    while let Some(visual) = words.next() {
        let value = words
            .next()
            .ok_or_else(|| Error::Xpm(format!("invalid color line: {:?}", line)))?;
        if visual == "c" {
            let color = if value.eq_ignore_ascii_case("none") {
                Color::TRANSPARENT
            } else {
                value
                    .parse::<Color>()
                    .map_err(|_| Error::Xpm(format!("unknown color {:?}", value)))?
            };
            return Ok((key, color));
        }
    }

    Err(Error::Xpm(format!("no color visual in {:?}", line)))
}

fn quoted_strings(text: &str) -> Vec<String> {
    let mut strings = Vec::new();
    let mut buf = String::new();
    let mut quoted = false;
    let mut comment = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' => {
                    strings.push(std::mem::take(&mut buf));
                    quoted = false;
                }
                '\\' => buf.extend(chars.next()),
                c => buf.push(c),
            }
        } else if comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                comment = false;
            }
        } else if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            comment = true;
        } else if c == '"' {
            quoted = true;
        }
    }

    strings
}

/// A surface created from an XPM image, e.g. a window icon.
#[derive(Debug, Clone, PartialEq)]
pub struct XpmIcon {
    canvas: Canvas,
}

impl XpmIcon {
    /// Create an icon from the lines of an XPM C array.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        Self::from_xpm(Xpm::from_lines(lines)?)
    }

    /// Create an icon from the text of an `.xpm` file.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_xpm(Xpm::parse(text)?)
    }

    fn from_xpm(xpm: Xpm) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::from_pixels(xpm.size(), xpm.pixels, true)?,
        })
    }

    /// Exchange two icons.
    pub fn swap(&mut self, other: &mut XpmIcon) {
        std::mem::swap(self, other);
    }
}

impl Surface for XpmIcon {
    fn size(&self) -> Size2d {
        self.canvas.size()
    }

    fn pixels(&self) -> &[Color] {
        self.canvas.pixels()
    }

    fn has_alpha(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::colors;

    const SMILEY: &[&str] = &[
        "4 3 3 1",
        "X c #ff0000",
        ". c white",
        "  c None",
        "X.X ",
        " .. ",
        "XXXX",
    ];

    #[test]
    fn test_header() {
        let h = XpmHeader::parse("  16 16 3 1 7 7 ").unwrap();
        assert_eq!(h.size, Size2d::new(16, 16));
        assert_eq!(h.colors, 3);
        assert_eq!(h.hotspot, Some(Point2d::new(7, 7)));
        assert!(XpmHeader::parse("16 16 3").is_err());
        assert!(XpmHeader::parse("16 x 3 1").is_err());
    }

    #[test]
    fn test_decode_lines() {
        let xpm = Xpm::from_lines(SMILEY).unwrap();
        assert_eq!(xpm.size(), Size2d::new(4, 3));
        assert_eq!(xpm.pixels[0], colors::RED);
        assert_eq!(xpm.pixels[1], colors::WHITE);
        assert_eq!(xpm.pixels[3], Color::TRANSPARENT);
        assert_eq!(xpm.pixels[11], colors::RED);
    }

    #[test]
    fn test_multi_char_pixels() {
        let lines = ["2 1 2 2", "aa c #000000", "bb c #0000ff", "aabb"];
        let xpm = Xpm::from_lines(&lines).unwrap();
        assert_eq!(xpm.pixels, vec![colors::BLACK, colors::BLUE]);
    }

    #[test]
    fn test_parse_file_text() {
        let text = r##"/* XPM */
static char *icon[] = {
/* columns rows colors chars-per-pixel */
"2 2 2 1",
"# c #000",
"- c None",
/* pixels */
"#-",
"-#"
};"##;
        let icon = XpmIcon::parse(text).unwrap();
        assert_eq!(icon.size(), Size2d::new(2, 2));
        assert_eq!(icon.pixel(Point2d::new(0, 0)), Some(colors::BLACK));
        assert_eq!(icon.pixel(Point2d::new(1, 0)), Some(Color::TRANSPARENT));
        assert!(icon.has_alpha());
    }

    #[test]
    fn test_errors() {
        assert!(Xpm::from_lines(&["2 1 1 1", "X c #000", "X"]).is_err());
        assert!(Xpm::from_lines(&["1 1 1 1", "X c #000", "Y"]).is_err());
        assert!(Xpm::from_lines(&["1 1 1 1", "X c bogus", "X"]).is_err());
        assert!(Xpm::from_lines(&["1 2 1 1", "X c #000", "X"]).is_err());
    }

    #[test]
    fn test_oversized_header_is_rejected() {
        let err = Xpm::from_lines(&["60000 60000 1 1", "X c #000"]).unwrap_err();
        assert_eq!(err.to_string(), Error::Xpm("missing pixel row line".to_string()).to_string());

        let err = Xpm::from_lines(&["1 1 4000000000 1", "X c #000"]).unwrap_err();
        assert_eq!(err.to_string(), Error::Xpm("missing color line".to_string()).to_string());

        assert!(XpmIcon::from_lines(&["60000 60000 1 1", "X c #000"]).is_err());
        assert!(XpmIcon::parse("\"1 1 4000000000 1\", \"X c #000\"").is_err());
    }

    #[test]
    fn test_wide_rows_need_their_pixels() {
        // a huge width with one short row fails on the row, not on allocation
        let err = Xpm::from_lines(&["4000000000 1 1 1", "X c #000", "XX"]).unwrap_err();
        assert!(err.to_string().contains("row 0 is too short"));
    }
}
