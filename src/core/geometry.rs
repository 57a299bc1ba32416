//! Cell coordinates and terminal-size clamping.

use std::ops::{Add, Sub};

/// A position (or displacement) in character cells.
///
/// Coordinates are signed so that layouts for a terminal smaller than the
/// widget can go negative without wrapping; the drawing layer clamps or
/// skips such cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same point moved by `dx` columns and `dy` rows.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance, the number of steps a line rasterizer takes.
    pub fn chebyshev(self, other: Self) -> i32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    /// Clamp into `[0, width) x [0, height)`.
    ///
    /// A zero-sized terminal has no valid cell; the position is returned
    /// unchanged in that case.
    pub fn clamp_to(self, size: Size) -> Self {
        if size.is_empty() {
            return self;
        }
        Self {
            x: self.x.clamp(0, i32::from(size.width) - 1),
            y: self.y.clamp(0, i32::from(size.height) - 1),
        }
    }

    /// Whether the position lies inside a terminal of the given size.
    pub fn is_inside(self, size: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(size.width)
            && self.y < i32::from(size.height)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to() {
        let size = Size::new(80, 24);
        assert_eq!(Vector2::new(-3, 5).clamp_to(size), Vector2::new(0, 5));
        assert_eq!(Vector2::new(100, 30).clamp_to(size), Vector2::new(79, 23));
        assert_eq!(Vector2::new(10, 10).clamp_to(size), Vector2::new(10, 10));
    }

    #[test]
    fn test_clamp_to_empty_size_is_identity() {
        let pos = Vector2::new(-4, 99);
        assert_eq!(pos.clamp_to(Size::default()), pos);
    }

    #[test]
    fn test_is_inside() {
        let size = Size::new(10, 5);
        assert!(Vector2::new(0, 0).is_inside(size));
        assert!(Vector2::new(9, 4).is_inside(size));
        assert!(!Vector2::new(10, 4).is_inside(size));
        assert!(!Vector2::new(-1, 0).is_inside(size));
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(Vector2::new(0, 0).chebyshev(Vector2::new(3, -7)), 7);
        assert_eq!(Vector2::new(2, 2).chebyshev(Vector2::new(2, 2)), 0);
    }
}
