//! The copy-as-image action.

use std::io;

use log::info;

use cameo_core::{host::DocumentSource, registry::ElementRegistry};

use crate::{error::CameoError, raster::RasterImage, renderer::ElementsRenderer};

/// Destination for a rendered image, such as the system clipboard or a file.
pub trait ImageSink {
    /// Stores `data` under `mime_type`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the image cannot be stored.
    fn write_image(&mut self, mime_type: &str, data: &[u8]) -> io::Result<()>;
}

impl<S: ImageSink + ?Sized> ImageSink for &mut S {
    fn write_image(&mut self, mime_type: &str, data: &[u8]) -> io::Result<()> {
        (**self).write_image(mime_type, data)
    }
}

/// Renders the current selection as PNG and hands it to `sink`.
///
/// Returns the written image, or `None` (writing nothing) if there was
/// nothing to render.
///
/// # Errors
///
/// Returns any rendering error from
/// [`ElementsRenderer::render_selection_as_png`], or [`CameoError::Io`] if
/// the sink fails.
pub async fn copy_selection_as_image<D, R, S>(
    renderer: &ElementsRenderer<D, R>,
    sink: &mut S,
) -> Result<Option<RasterImage>, CameoError>
where
    D: DocumentSource,
    R: ElementRegistry,
    S: ImageSink + ?Sized,
{
    let Some(image) = renderer.render_selection_as_png().await? else {
        info!("Nothing selected, no image copied");
        return Ok(None);
    };

    sink.write_image(image.mime_type(), image.data())?;
    info!(mime_type = image.mime_type(), bytes = image.data().len(); "Image copied");
    Ok(Some(image))
}
