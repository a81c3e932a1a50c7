//! Geometric primitives for layout analysis.
//!
//! All rectangles live in the normalized page frame used by the pipeline:
//! coordinates in `[0, 1]`, origin at the top-left corner, `y` growing
//! downward. "Above" therefore means a smaller `y`, and sorting by ascending
//! `y` yields top-to-bottom reading order.

use serde::{Deserialize, Serialize};

/// A 2D point in normalized page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate (grows downward)
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Point;
    ///
    /// let point = Point::new(0.25, 0.5);
    /// assert_eq!(point.x, 0.25);
    /// assert_eq!(point.y, 0.5);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in normalized page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.1, 0.2, 0.3, 0.05);
    /// assert_eq!(rect.width, 0.3);
    /// assert_eq!(rect.height, 0.05);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// let rect = Rect::from_points(0.1, 0.2, 0.5, 0.25);
    /// assert_eq!(rect.x, 0.1);
    /// assert_eq!(rect.y, 0.2);
    /// assert!((rect.width - 0.4).abs() < 1e-6);
    /// assert!((rect.height - 0.05).abs() < 1e-6);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Convert a normalized box whose origin is the bottom-left corner
    /// (as reported by Vision-style recognizers) into the pipeline frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// // A box hugging the top edge of the page in a bottom-left frame.
    /// let rect = Rect::from_bottom_left(0.1, 0.9, 0.2, 0.1);
    /// assert!(rect.top().abs() < 1e-6);
    /// assert!((rect.bottom() - 0.1).abs() < 1e-6);
    /// ```
    pub fn from_bottom_left(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y: 1.0 - (y + height),
            width,
            height,
        }
    }

    /// The whole normalized page.
    pub fn page() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 0.5, 0.25);
    /// let center = rect.center();
    /// assert_eq!(center.x, 0.25);
    /// assert_eq!(center.y, 0.125);
    /// ```
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this rectangle intersects with another.
    ///
    /// Touching edges do not count as an intersection.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 0.5, 0.5);
    /// let r2 = Rect::new(0.25, 0.25, 0.5, 0.5);
    /// let r3 = Rect::new(0.5, 0.5, 0.1, 0.1);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if this rectangle contains a point (edges inclusive).
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Check if the center of `other` lies inside this rectangle.
    pub fn contains_center_of(&self, other: &Rect) -> bool {
        self.contains_point(&other.center())
    }

    /// Compute the overlapping region of two rectangles, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 0.5, 0.5);
    /// let r2 = Rect::new(0.25, 0.25, 0.5, 0.5);
    /// let overlap = r1.intersection(&r2).unwrap();
    /// assert_eq!(overlap, Rect::new(0.25, 0.25, 0.25, 0.25));
    ///
    /// assert!(r1.intersection(&Rect::new(0.6, 0.6, 0.1, 0.1)).is_none());
    /// ```
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.left().max(other.left());
        let y0 = self.top().max(other.top());
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::from_points(x0, y0, x1, y1))
        } else {
            None
        }
    }

    /// Fraction of `inner`'s area that lies inside this rectangle.
    ///
    /// Returns `0.0` for a zero-area `inner`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// let column = Rect::new(0.0, 0.0, 0.5, 1.0);
    /// let fragment = Rect::new(0.3, 0.1, 0.4, 0.05);
    /// assert!((column.containment_rate(&fragment) - 0.5).abs() < 1e-5);
    /// ```
    pub fn containment_rate(&self, inner: &Rect) -> f32 {
        let area = inner.area();
        if area <= 0.0 {
            return 0.0;
        }
        self.intersection(inner).map_or(0.0, |overlap| overlap.area() / area)
    }

    /// Length of the overlap between the vertical extents of two rectangles.
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Compute the area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}
