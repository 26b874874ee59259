//! The elements renderer: selection in, framed image out.

use std::cell::OnceCell;

use log::{debug, info, warn};

use cameo_core::{
    element::{Element, ElementRefs},
    host::{DocumentSource, Selection},
    registry::ElementRegistry,
};
use cameo_svg::{SvgError, VectorDocument};

use crate::{
    closure::{ClosureResolver, ClosureSet},
    config::AppConfig,
    error::CameoError,
    filter::filter_to_closure,
    raster::{RasterImage, Rasterizer, ResvgRasterizer},
    viewport::Viewport,
};

/// Renders elements of a host diagram as standalone SVG or PNG images.
///
/// The document source and element registry are required. The closure
/// service and selection are optional capabilities: without them the
/// selection entry points render nothing, and [`compute_closure`] fails with
/// [`CameoError::Configuration`]. Without an explicit rasterizer a
/// [`ResvgRasterizer`] is built from the configuration on the first PNG
/// render and reused until the configuration changes.
///
/// Every call fetches a fresh serialization from the document source and
/// works on its own copy, so a renderer can be reused across edits.
///
/// # Examples
///
/// ```rust,no_run
/// use cameo::{ElementsRenderer, closure::DescendantClosure};
/// use cameo_core::{
///     element::Element,
///     geometry::{Bounds, Point, Size},
///     host::SvgSnapshot,
///     identifier::ElementId,
///     registry::InMemoryRegistry,
/// };
///
/// # async fn run() -> Result<(), cameo::CameoError> {
/// let snapshot = SvgSnapshot::new(std::fs::read_to_string("diagram.svg")?);
/// let registry: InMemoryRegistry = [Element::shape(
///     "Task_1",
///     Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(100.0, 80.0)),
/// )]
/// .into_iter()
/// .collect();
///
/// let renderer = ElementsRenderer::new(snapshot, registry)
///     .with_closure_resolver(DescendantClosure)
///     .with_selection(vec![ElementId::new("Task_1")]);
///
/// if let Some(png) = renderer.render_selection_as_png().await? {
///     std::fs::write("selection.png", png.data())?;
/// }
/// # Ok(())
/// # }
/// ```
///
/// [`compute_closure`]: ElementsRenderer::compute_closure
pub struct ElementsRenderer<D, R> {
    document: D,
    registry: R,
    closure_resolver: Option<Box<dyn ClosureResolver>>,
    selection: Option<Box<dyn Selection>>,
    rasterizer: Option<Box<dyn Rasterizer>>,
    default_rasterizer: OnceCell<ResvgRasterizer>,
    config: AppConfig,
}

impl<D, R> ElementsRenderer<D, R>
where
    D: DocumentSource,
    R: ElementRegistry,
{
    /// Creates a renderer over a host document and its element registry.
    pub fn new(document: D, registry: R) -> Self {
        Self {
            document,
            registry,
            closure_resolver: None,
            selection: None,
            rasterizer: None,
            default_rasterizer: OnceCell::new(),
            config: AppConfig::default(),
        }
    }

    /// Sets the closure ("copy tree") service.
    pub fn with_closure_resolver(mut self, resolver: impl ClosureResolver + 'static) -> Self {
        self.closure_resolver = Some(Box::new(resolver));
        self
    }

    /// Sets the selection capability.
    pub fn with_selection(mut self, selection: impl Selection + 'static) -> Self {
        self.selection = Some(Box::new(selection));
        self
    }

    /// Replaces the default rasterizer.
    pub fn with_rasterizer(mut self, rasterizer: impl Rasterizer + 'static) -> Self {
        self.rasterizer = Some(Box::new(rasterizer));
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self.default_rasterizer = OnceCell::new();
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the element registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Expands `elements` into everything a copy of them would include.
    ///
    /// References are resolved through the registry; identifiers it does not
    /// know are skipped. The closure service's copy tree is flattened in
    /// branch order, then descriptor order, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`CameoError::Configuration`] if no closure service is set.
    pub fn compute_closure(
        &self,
        elements: impl Into<ElementRefs>,
    ) -> Result<ClosureSet, CameoError> {
        let Some(resolver) = &self.closure_resolver else {
            return Err(CameoError::Configuration(
                "missing copy/paste capability".to_string(),
            ));
        };

        let refs = elements.into();
        let handles: Vec<&Element> = refs
            .iter()
            .filter_map(|element| {
                let handle = element.resolve(&self.registry);
                if handle.is_none() {
                    debug!(id:% = element.id(); "Closure input not in registry, skipped");
                }
                handle
            })
            .collect();

        if handles.is_empty() {
            debug!(requested = refs.len(); "Nothing to expand");
            return Ok(ClosureSet::default());
        }

        let tree = resolver.create_tree(&handles, &self.registry);
        let closure = ClosureSet::from_copy_tree(&tree);
        debug!(inputs = handles.len(), size = closure.len(); "Closure computed");
        Ok(closure)
    }

    /// Frames the union of the elements' bounds with [`PADDING`].
    ///
    /// Handles contribute their own geometry; identifiers are resolved
    /// through the registry and skipped if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CameoError::NothingToRender`] if no element resolves.
    ///
    /// [`PADDING`]: crate::viewport::PADDING
    pub fn compute_viewport(
        &self,
        elements: impl Into<ElementRefs>,
    ) -> Result<Viewport, CameoError> {
        self.viewport_for(&elements.into())
    }

    /// Renders the elements as a standalone SVG.
    ///
    /// The host serialization is restricted to the requested elements and
    /// framed by their padded bounds (`viewBox`, `width` and `height` on the
    /// root). Against an unchanged document the output is byte-identical
    /// across calls.
    ///
    /// # Errors
    ///
    /// Returns [`CameoError::NothingToRender`] if no element resolves,
    /// [`CameoError::Document`] if the host cannot serialize, and
    /// [`CameoError::Markup`] if the serialization is not well-formed.
    pub async fn render_as_svg(
        &self,
        elements: impl Into<ElementRefs>,
    ) -> Result<String, CameoError> {
        let refs = elements.into();
        info!(elements = refs.len(); "Rendering elements as SVG");

        let (svg, _) = self.render_document(&refs).await?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Renders the elements as a PNG image over the configured background.
    ///
    /// # Errors
    ///
    /// Same as [`render_as_svg`](Self::render_as_svg), plus
    /// [`CameoError::Render`] if rasterization or encoding fails and
    /// [`CameoError::Configuration`] if the background color is invalid.
    pub async fn render_as_png(
        &self,
        elements: impl Into<ElementRefs>,
    ) -> Result<RasterImage, CameoError> {
        let refs = elements.into();
        info!(elements = refs.len(); "Rendering elements as PNG");

        let (svg, viewport) = self.render_document(&refs).await?;
        let image = match &self.rasterizer {
            Some(rasterizer) => rasterizer.rasterize(&svg, &viewport)?,
            None => self.default_rasterizer()?.rasterize(&svg, &viewport)?,
        };

        info!(
            width = image.width(),
            height = image.height(),
            bytes = image.data().len();
            "PNG rendered successfully"
        );
        Ok(image)
    }

    /// Renders the current selection and its closure as a PNG image.
    ///
    /// Returns `Ok(None)` if the selection or closure capability is missing,
    /// the selection is empty, or the closure holds no element the registry
    /// knows.
    ///
    /// # Errors
    ///
    /// Same as [`render_as_png`](Self::render_as_png).
    pub async fn render_selection_as_png(&self) -> Result<Option<RasterImage>, CameoError> {
        let Some(closure) = self.selection_closure()? else {
            return Ok(None);
        };
        self.render_as_png(closure.to_element_refs())
            .await
            .map(Some)
    }

    /// Renders the current selection and its closure as a standalone SVG.
    ///
    /// Returns `Ok(None)` under the same conditions as
    /// [`render_selection_as_png`](Self::render_selection_as_png).
    ///
    /// # Errors
    ///
    /// Same as [`render_as_svg`](Self::render_as_svg).
    pub async fn render_selection_as_svg(&self) -> Result<Option<String>, CameoError> {
        let Some(closure) = self.selection_closure()? else {
            return Ok(None);
        };
        self.render_as_svg(closure.to_element_refs())
            .await
            .map(Some)
    }

    fn default_rasterizer(&self) -> Result<&ResvgRasterizer, CameoError> {
        if let Some(rasterizer) = self.default_rasterizer.get() {
            return Ok(rasterizer);
        }
        let rasterizer = ResvgRasterizer::from_config(&self.config)?;
        debug!("Default rasterizer created");
        Ok(self.default_rasterizer.get_or_init(|| rasterizer))
    }

    fn selection_closure(&self) -> Result<Option<ClosureSet>, CameoError> {
        let Some(selection) = &self.selection else {
            debug!("No selection capability, nothing to render");
            return Ok(None);
        };
        if self.closure_resolver.is_none() {
            debug!("No copy/paste capability, nothing to render");
            return Ok(None);
        }

        let selected = selection.selected();
        if selected.is_empty() {
            debug!("Selection is empty, nothing to render");
            return Ok(None);
        }

        let mut closure = self.compute_closure(selected)?;
        let dropped = closure.retain_known(&self.registry);
        if dropped > 0 {
            debug!(dropped = dropped; "Closure members without registry entry dropped");
        }

        if closure.is_empty() {
            debug!("Closure is empty, nothing to render");
            return Ok(None);
        }
        Ok(Some(closure))
    }

    fn viewport_for(&self, refs: &ElementRefs) -> Result<Viewport, CameoError> {
        let content = refs
            .iter()
            .filter_map(|element| {
                let bounds = element.resolve(&self.registry).and_then(Element::bounds);
                if bounds.is_none() {
                    warn!(id:% = element.id(); "Element has no geometry, skipped");
                }
                bounds
            })
            .reduce(|acc, bounds| acc.merge(&bounds))
            .ok_or(CameoError::NothingToRender)?;

        Ok(Viewport::from_content(content))
    }

    async fn render_document(
        &self,
        refs: &ElementRefs,
    ) -> Result<(String, Viewport), CameoError> {
        let viewport = self.viewport_for(refs)?;

        let source = self.document.save_svg().await?;
        let mut document = VectorDocument::parse(&source)?;

        let ids = refs.ids();
        filter_to_closure(&mut document, &ids, self.config.markup());

        let root = document.root_element().ok_or(SvgError::MissingRoot)?;
        if let Some(svg) = document.element_mut(root) {
            svg.set_attribute("viewBox", viewport.view_box());
            svg.set_attribute("width", viewport.width().to_string());
            svg.set_attribute("height", viewport.height().to_string());
        }

        Ok((document.to_svg_string()?, viewport))
    }
}
