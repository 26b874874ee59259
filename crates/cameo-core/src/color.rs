//! CSS colors for image backgrounds.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// A parsed CSS color that exported images are composited onto.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses any CSS color syntax: hex, `rgb()`, named colors and so on.
    ///
    /// ```
    /// use cameo_core::color::Color;
    ///
    /// assert!(Color::new("#ff0000").is_ok());
    /// assert!(Color::new("teal").is_ok());
    /// assert!(Color::new("tealish").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// 8-bit sRGB components `[r, g, b, a]`.
    ///
    /// ```
    /// use cameo_core::color::Color;
    ///
    /// let rgba = Color::new("rgb(255, 128, 0)").unwrap().to_rgba8();
    /// assert_eq!(rgba, [255, 128, 0, 255]);
    /// ```
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }
}

/// Opaque white, the background exported images use unless configured otherwise.
impl Default for Color {
    fn default() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(color::palette::css::WHITE),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_message() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.starts_with("invalid color `not-a-color`"));
    }

    #[test]
    fn test_default_is_opaque_white() {
        assert_eq!(Color::default().to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_rgba8_components() {
        assert_eq!(Color::new("black").unwrap().to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(Color::new("#00ff00").unwrap().to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::new("transparent").unwrap().to_rgba8()[3], 0);
    }
}
