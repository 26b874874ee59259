//! Configuration types for Cameo rendering.
//!
//! This module provides configuration structures that control how the host
//! serialization is read and how the resulting image is styled. All types
//! implement [`serde::Deserialize`] for flexible loading from external
//! sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`MarkupConfig`] - Attribute and class names used to find element visuals.
//! - [`StyleConfig`] - Visual styling options such as background color.
//! - [`RasterConfig`] - Rasterizer options.
//!
//! # Example
//!
//! ```
//! # use cameo::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.markup().element_id_attribute(), "data-element-id");
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use cameo_core::color::Color;

/// Top-level application configuration.
///
/// Groups [`MarkupConfig`], [`StyleConfig`] and [`RasterConfig`] into a single
/// configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Markup configuration section.
    #[serde(default)]
    markup: MarkupConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Raster configuration section.
    #[serde(default)]
    raster: RasterConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `markup` - Names used to locate element visuals in the serialization.
    /// * `style` - Visual styling options.
    /// * `raster` - Rasterizer options.
    pub fn new(markup: MarkupConfig, style: StyleConfig, raster: RasterConfig) -> Self {
        Self {
            markup,
            style,
            raster,
        }
    }

    /// Returns the markup configuration.
    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the raster configuration.
    pub fn raster(&self) -> &RasterConfig {
        &self.raster
    }
}

/// Names that identify element graphics in the host serialization.
///
/// The defaults match diagram-js: every element's graphics group carries a
/// `data-element-id` attribute, its drawn shape lives in a `djs-visual`
/// group, and top-level layers are `djs-group`s.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    element_id_attribute: String,
    visual_class: String,
    group_class: Option<String>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            element_id_attribute: "data-element-id".to_string(),
            visual_class: "djs-visual".to_string(),
            group_class: Some("djs-group".to_string()),
        }
    }
}

impl MarkupConfig {
    /// Creates a new [`MarkupConfig`].
    ///
    /// # Arguments
    ///
    /// * `element_id_attribute` - Attribute holding the element identifier.
    /// * `visual_class` - Class of the group holding an element's drawing.
    /// * `group_class` - Class of the root-level layers to search, or `None`
    ///   to search every root-level child.
    pub fn new(
        element_id_attribute: impl Into<String>,
        visual_class: impl Into<String>,
        group_class: Option<String>,
    ) -> Self {
        Self {
            element_id_attribute: element_id_attribute.into(),
            visual_class: visual_class.into(),
            group_class,
        }
    }

    /// Returns the name of the attribute holding element identifiers.
    pub fn element_id_attribute(&self) -> &str {
        &self.element_id_attribute
    }

    /// Returns the class marking an element's visual.
    pub fn visual_class(&self) -> &str {
        &self.visual_class
    }

    /// Returns the class marking root-level layers, if restricted.
    pub fn group_class(&self) -> Option<&str> {
        self.group_class.as_deref()
    }
}

/// Visual styling configuration for rendered images.
///
/// Controls appearance options such as background color. Fields that are
/// not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] composited behind the image, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Sets the background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Rasterizer options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Load the system font database before rendering text.
    load_system_fonts: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
        }
    }
}

impl RasterConfig {
    /// Creates a new [`RasterConfig`].
    pub fn new(load_system_fonts: bool) -> Self {
        Self { load_system_fonts }
    }

    /// Returns whether system fonts are loaded for text rendering.
    pub fn load_system_fonts(&self) -> bool {
        self.load_system_fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_defaults() {
        let markup = MarkupConfig::default();
        assert_eq!(markup.element_id_attribute(), "data-element-id");
        assert_eq!(markup.visual_class(), "djs-visual");
        assert_eq!(markup.group_class(), Some("djs-group"));
    }

    #[test]
    fn test_background_color() {
        assert_eq!(StyleConfig::default().background_color(), Ok(None));

        let style = StyleConfig::default().with_background_color("#336699");
        let color = style.background_color().unwrap().unwrap();
        assert_eq!(color.to_rgba8(), [0x33, 0x66, 0x99, 0xff]);

        let style = StyleConfig::default().with_background_color("not-a-color");
        assert!(style.background_color().is_err());
    }

    #[test]
    fn test_raster_defaults() {
        assert!(RasterConfig::default().load_system_fonts());
        assert!(!RasterConfig::new(false).load_system_fonts());
    }
}
