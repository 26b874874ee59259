//! Error types for Cameo operations.
//!
//! This module provides the main error type [`CameoError`] which wraps
//! the error conditions that can occur while rendering a set of elements.

use std::io;

use thiserror::Error;

use cameo_core::host::HostError;
use cameo_svg::SvgError;

use crate::raster::RasterError;

/// The main error type for Cameo operations.
///
/// An empty selection is not an error: the selection entry points return
/// `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum CameoError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Document error: {0}")]
    Document(#[from] HostError),

    #[error("Markup error: {0}")]
    Markup(#[from] SvgError),

    #[error("None of the requested elements has geometry to render")]
    NothingToRender,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<RasterError> for CameoError {
    fn from(error: RasterError) -> Self {
        Self::Render(error.to_string())
    }
}
