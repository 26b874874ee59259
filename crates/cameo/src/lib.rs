//! Cameo - render a selection of diagram elements as a standalone image.
//!
//! Given the elements a user picked in a diagram editor, Cameo expands them
//! to everything a copy would include, restricts the editor's SVG
//! serialization to those elements, frames them with a small padding and
//! rasterizes the result into a PNG suitable for the clipboard.
//!
//! The editor is never reimplemented: its serialization, element registry,
//! selection and copy-tree service are injected through the traits in
//! [`host`], [`registry`] and [`closure`]. See [`ElementsRenderer`] for the
//! entry points.

pub mod closure;
pub mod config;
pub mod filter;
pub mod raster;
pub mod viewport;

mod action;
mod error;
mod renderer;

pub use cameo_core::{color, element, geometry, host, identifier, registry};
pub use cameo_svg::{SvgError, VectorDocument};

pub use action::{ImageSink, copy_selection_as_image};
pub use error::CameoError;
pub use renderer::ElementsRenderer;
