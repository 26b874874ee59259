//! Coordinates, extents and boxes in document space.
//!
//! Document space is the user coordinate system of the exported SVG: the
//! origin sits in the top-left corner, x grows to the right and y grows
//! downwards. Element geometry from the registry and the final `viewBox`
//! of an image are both expressed in these units.

use serde::Deserialize;

/// A position in document space.
///
/// Deserializes from `[x, y]`, the form used for connection waypoints in
/// element files.
///
/// ```
/// # use cameo_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!((p.x(), p.y()), (10.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// An empty box anchored at this point.
    pub fn to_bounds(self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Width and height of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }
}

/// An axis-aligned box stored as its top-left corner and extent.
///
/// A box may be empty (zero width or height) but never inverted. The extent
/// is kept as given rather than derived from the far corner, so a padded box
/// is exactly its content size plus the insets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    /// Box whose top-left corner is `origin`. Negative extents collapse to zero.
    pub fn new_from_top_left(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width.max(0.0),
            height: size.height.max(0.0),
        }
    }

    /// Tightest box around a polyline, `None` for no points.
    ///
    /// ```
    /// # use cameo_core::geometry::{Bounds, Point};
    /// let waypoints = [Point::new(10.0, 40.0), Point::new(60.0, 40.0), Point::new(60.0, 5.0)];
    /// let bounds = Bounds::from_points(&waypoints).unwrap();
    /// assert_eq!((bounds.min_x(), bounds.min_y()), (10.0, 5.0));
    /// assert_eq!((bounds.width(), bounds.height()), (50.0, 35.0));
    /// ```
    pub fn from_points(points: &[Point]) -> Option<Self> {
        points
            .iter()
            .map(|point| point.to_bounds())
            .reduce(|acc, next| acc.merge(&next))
    }

    pub fn min_x(self) -> f64 {
        self.x
    }

    pub fn min_y(self) -> f64 {
        self.y
    }

    pub fn max_x(self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(self) -> f64 {
        self.y + self.height
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Smallest box covering both `self` and `other`.
    ///
    /// ```
    /// # use cameo_core::geometry::{Bounds, Point, Size};
    /// let task = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let event = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let union = task.merge(&event);
    /// assert_eq!((union.width(), union.height()), (130.0, 120.0));
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        if self.contains(other) {
            return *self;
        }
        if other.contains(self) {
            return *other;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.max_x().max(other.max_x()) - x,
            height: self.max_y().max(other.max_y()) - y,
        }
    }

    fn contains(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.max_x() >= other.max_x()
            && self.max_y() >= other.max_y()
    }

    /// Grows the box outwards by `insets` on each side.
    ///
    /// The extent grows by exactly `left + right` and `top + bottom`.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            x: self.x - insets.left,
            y: self.y - insets.top,
            width: self.width + (insets.left + insets.right),
            height: self.height + (insets.top + insets.bottom),
        }
    }
}

/// Per-side margin around a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// `horizontal` applies to left and right, `vertical` to top and bottom.
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}
