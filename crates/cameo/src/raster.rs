//! Rasterization of framed SVG into PNG images.
//!
//! [`Rasterizer`] is the seam between the renderer and the drawing backend.
//! [`ResvgRasterizer`] is the default backend, built on `resvg` and its
//! bundled `tiny-skia` pixmaps.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use log::{debug, info, trace};
use resvg::{
    tiny_skia::{self, Pixmap, Transform},
    usvg::{self, fontdb},
};
use thiserror::Error;

use cameo_core::color::Color;

use crate::{config::AppConfig, error::CameoError, viewport::Viewport};

/// MIME type of every [`RasterImage`].
pub const PNG_MIME_TYPE: &str = "image/png";

/// A rendered PNG image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterImage {
    /// Wraps encoded PNG bytes of the given pixel size.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the MIME type, always `image/png`.
    pub fn mime_type(&self) -> &'static str {
        PNG_MIME_TYPE
    }

    /// Returns the encoded PNG bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning the encoded PNG bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Errors raised by a [`Rasterizer`].
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to parse SVG: {0}")]
    Parse(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Turns a framed SVG document into a PNG image.
pub trait Rasterizer {
    /// Draws `svg` into an image of `viewport`'s pixel size.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError`] if the SVG cannot be parsed, the bitmap cannot
    /// be allocated, or encoding fails.
    fn rasterize(&self, svg: &str, viewport: &Viewport) -> Result<RasterImage, RasterError>;
}

/// The default [`Rasterizer`], backed by `resvg`.
///
/// The SVG is drawn over a bitmap filled with the background color, which is
/// opaque white unless configured otherwise. The font database is built on
/// first use and shared by every later call.
#[derive(Clone)]
pub struct ResvgRasterizer {
    background: Color,
    load_system_fonts: bool,
    fonts: OnceLock<Arc<fontdb::Database>>,
}

impl fmt::Debug for ResvgRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResvgRasterizer")
            .field("background", &self.background)
            .field("load_system_fonts", &self.load_system_fonts)
            .field("font_faces", &self.fonts.get().map(|db| db.len()))
            .finish()
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResvgRasterizer {
    /// Creates a rasterizer with a white background that loads system fonts.
    pub fn new() -> Self {
        Self {
            background: Color::default(),
            load_system_fonts: true,
            fonts: OnceLock::new(),
        }
    }

    /// Creates a rasterizer from the style and raster sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CameoError::Configuration`] if the background color is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, CameoError> {
        let background = config
            .style()
            .background_color()
            .map_err(CameoError::Configuration)?
            .unwrap_or_default();

        Ok(Self::new()
            .with_background(background)
            .with_system_fonts(config.raster().load_system_fonts()))
    }

    /// Sets the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets whether system fonts are loaded before rendering.
    pub fn with_system_fonts(mut self, load: bool) -> Self {
        if self.load_system_fonts != load {
            self.load_system_fonts = load;
            self.fonts = OnceLock::new();
        }
        self
    }

    fn font_database(&self) -> &Arc<fontdb::Database> {
        self.fonts.get_or_init(|| {
            let mut db = fontdb::Database::new();
            if self.load_system_fonts {
                db.load_system_fonts();
                trace!(faces = db.len(); "System fonts loaded");
            }
            Arc::new(db)
        })
    }

    fn options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: Arc::clone(self.font_database()),
            ..usvg::Options::default()
        }
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, viewport: &Viewport) -> Result<RasterImage, RasterError> {
        let (width, height) = (viewport.width(), viewport.height());
        info!(width = width, height = height; "Rasterizing SVG");

        let tree = usvg::Tree::from_str(svg, &self.options())?;

        let mut pixmap =
            Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;
        let [r, g, b, a] = self.background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        // The tree size comes from the root width/height; scale it onto the
        // pixmap in case the document did not carry them.
        let size = tree.size();
        let transform = Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let data = pixmap
            .encode_png()
            .map_err(|err| RasterError::Encode(err.to_string()))?;
        debug!(bytes = data.len(); "PNG encoded");

        Ok(RasterImage::new(data, width, height))
    }
}
