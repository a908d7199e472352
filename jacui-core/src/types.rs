// SPDX-License-Identifier: MIT

//! Geometry primitives.

/// A point in surface coordinates. May lie outside the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point2d {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point2d {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size2d {
    /// The width in pixels.
    pub width: u32,
    /// The height in pixels.
    pub height: u32,
}

impl Size2d {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect2d {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// The width in pixels.
    pub width: u32,
    /// The height in pixels.
    pub height: u32,
}

impl Rect2d {
    /// Create a rectangle at `offset` with the given `size`.
    pub const fn new(offset: Point2d, size: Size2d) -> Self {
        Self {
            x: offset.x,
            y: offset.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Create a rectangle from its components.
    pub const fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The size of the rectangle.
    pub const fn size(&self) -> Size2d {
        Size2d::new(self.width, self.height)
    }

    /// The top-left corner.
    pub const fn offset(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    /// One past the right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// One past the bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Whether `p` lies inside the rectangle. The right and bottom edges are exclusive.
    pub fn includes(&self, p: Point2d) -> bool {
        p.x >= self.x && p.y >= self.y && (p.x as i64) < self.right() && (p.y as i64) < self.bottom()
    }

    /// The overlapping part of two rectangles, or an empty rectangle if they are disjoint.
    pub fn intersect(&self, other: &Rect2d) -> Rect2d {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left as i64 || bottom <= top as i64 {
            return Rect2d::default();
        }

        Rect2d {
            x: left,
            y: top,
            width: (right - left as i64) as u32,
            height: (bottom - top as i64) as u32,
        }
    }
}

impl From<Size2d> for Rect2d {
    fn from(size: Size2d) -> Self {
        Rect2d::new(Point2d::default(), size)
    }
}
