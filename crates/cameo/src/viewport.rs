//! Framing rendered elements.

use log::debug;

use cameo_core::geometry::{Bounds, Insets};

/// Space added around the union of element bounds, so that arrow markers and
/// strokes at the edges are not clipped.
pub const PADDING: Insets = Insets::symmetric(6.0, 6.0);

/// The visible region of a rendered image, in document coordinates, and the
/// pixel size it is drawn at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
    width: u32,
    height: u32,
}

impl Viewport {
    /// Frames `content` with [`PADDING`].
    ///
    /// The padded extent is the content extent plus the insets, and pixel
    /// dimensions are that extent rounded up, at least one pixel each. The
    /// `viewBox` is written from the same values, so it always has the
    /// aspect of the pixel grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use cameo::viewport::Viewport;
    /// use cameo_core::geometry::{Bounds, Point, Size};
    ///
    /// let content = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(100.0, 50.0));
    /// let viewport = Viewport::from_content(content);
    ///
    /// assert_eq!(viewport.view_box(), "4 4 112 62");
    /// assert_eq!((viewport.width(), viewport.height()), (112, 62));
    /// ```
    pub fn from_content(content: Bounds) -> Self {
        let bounds = content.add_padding(PADDING);
        let viewport = Self {
            bounds,
            width: pixels(bounds.width()),
            height: pixels(bounds.height()),
        };
        debug!(
            view_box = viewport.view_box(),
            width = viewport.width,
            height = viewport.height;
            "Viewport computed"
        );
        viewport
    }

    /// Returns the padded bounds in document coordinates.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the `viewBox` attribute value, `"x y width height"`.
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            self.bounds.min_x(),
            self.bounds.min_y(),
            self.bounds.width(),
            self.bounds.height()
        )
    }
}

fn pixels(length: f64) -> u32 {
    // Saturating cast; NaN maps to 0 and is then raised to 1.
    (length.ceil() as u32).max(1)
}
