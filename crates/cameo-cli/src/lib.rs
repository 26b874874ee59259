//! CLI logic for the Cameo selection renderer.
//!
//! This module contains the core CLI logic: it loads a diagram snapshot and
//! its element description, renders the requested elements, and writes the
//! image to the output file.

pub mod error_adapter;

mod args;
mod config;
mod elements;
mod files;

pub use args::{Args, OutputFormat};
pub use elements::{ElementFileError, load_elements, parse_elements};
pub use files::{FileDocument, FileSink};

use log::{info, warn};

use cameo::{
    CameoError, ElementsRenderer, ImageSink, closure::DescendantClosure, config::AppConfig,
    copy_selection_as_image, element::Element, identifier::ElementId,
    registry::InMemoryRegistry,
};

/// Run the Cameo CLI application
///
/// This function loads the snapshot and element file named in `args`,
/// renders the selected elements and writes the resulting image to the
/// output file. With `--closure` an empty result writes nothing and is not
/// an error.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CameoError` for:
/// - File I/O errors and invalid element files
/// - Configuration loading errors
/// - Malformed snapshots
/// - Selections without renderable elements
/// - Rasterization errors
pub fn run(args: &Args) -> Result<(), CameoError> {
    info!(
        input_path = args.input,
        elements_path = args.elements,
        output_path = args.output;
        "Processing snapshot"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let registry = load_elements(&args.elements)?;

    let selected: Vec<ElementId> = if args.select.is_empty() {
        registry.iter().map(Element::id).collect()
    } else {
        args.select.iter().map(|id| ElementId::new(id)).collect()
    };

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let written = runtime.block_on(render(args, app_config, registry, selected))?;

    if written {
        info!(output_file = args.output; "Image exported successfully");
    } else {
        warn!("Nothing to render, no image written");
    }
    Ok(())
}

async fn render(
    args: &Args,
    app_config: AppConfig,
    registry: InMemoryRegistry,
    selected: Vec<ElementId>,
) -> Result<bool, CameoError> {
    let renderer =
        ElementsRenderer::new(FileDocument::new(&args.input), registry).with_config(app_config);
    let mut sink = FileSink::new(&args.output);

    if args.closure {
        let renderer = renderer
            .with_closure_resolver(DescendantClosure)
            .with_selection(selected);

        return match args.format {
            OutputFormat::Png => Ok(copy_selection_as_image(&renderer, &mut sink)
                .await?
                .is_some()),
            OutputFormat::Svg => match renderer.render_selection_as_svg().await? {
                Some(svg) => {
                    sink.write_image(args.format.mime_type(), svg.as_bytes())?;
                    Ok(true)
                }
                None => Ok(false),
            },
        };
    }

    match args.format {
        OutputFormat::Png => {
            let image = renderer.render_as_png(selected).await?;
            sink.write_image(image.mime_type(), image.data())?;
        }
        OutputFormat::Svg => {
            let svg = renderer.render_as_svg(selected).await?;
            sink.write_image(args.format.mime_type(), svg.as_bytes())?;
        }
    }
    Ok(true)
}
