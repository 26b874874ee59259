//! Capabilities provided by the host diagram editor.
//!
//! Cameo does not own a diagram model. The host editor supplies the current
//! document as an SVG serialization ([`DocumentSource`]) and the current
//! selection ([`Selection`]); both are passed to the renderer explicitly.

use std::{error::Error as StdError, future::Future};

use thiserror::Error;

use crate::identifier::ElementId;

/// Boxed error type carried as the source of a [`HostError`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure reported by a host capability.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HostError {
    /// Creates a host error with a message and no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a host error wrapping an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Produces the full current document as an SVG string.
///
/// Every visual of the document is expected to be tagged with its element
/// identifier (for diagram-js based editors, `data-element-id` on the
/// element's graphics group).
pub trait DocumentSource {
    /// Serializes the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the host cannot produce a serialization.
    fn save_svg(&self) -> impl Future<Output = Result<String, HostError>>;
}

impl<D: DocumentSource + ?Sized> DocumentSource for &D {
    fn save_svg(&self) -> impl Future<Output = Result<String, HostError>> {
        (**self).save_svg()
    }
}

/// A fixed SVG serialization acting as the document source.
///
/// Useful when the document was exported ahead of time, e.g. read from a
/// file.
#[derive(Debug, Clone)]
pub struct SvgSnapshot {
    svg: String,
}

impl SvgSnapshot {
    /// Creates a snapshot from serialized SVG.
    pub fn new(svg: impl Into<String>) -> Self {
        Self { svg: svg.into() }
    }

    /// Returns the serialized SVG.
    pub fn as_str(&self) -> &str {
        &self.svg
    }
}

impl DocumentSource for SvgSnapshot {
    async fn save_svg(&self) -> Result<String, HostError> {
        Ok(self.svg.clone())
    }
}

/// The set of elements currently selected in the host editor.
pub trait Selection {
    /// Returns the identifiers of the selected elements in selection order.
    fn selected(&self) -> Vec<ElementId>;
}

impl Selection for Vec<ElementId> {
    fn selected(&self) -> Vec<ElementId> {
        self.clone()
    }
}

impl Selection for [ElementId] {
    fn selected(&self) -> Vec<ElementId> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_returns_svg() {
        let snapshot = SvgSnapshot::new("<svg/>");
        let svg = snapshot.save_svg().await.unwrap();
        assert_eq!(svg, "<svg/>");
        assert_eq!(snapshot.as_str(), "<svg/>");
    }

    #[test]
    fn test_host_error_source() {
        let io = std::io::Error::other("disk gone");
        let err = HostError::with_source("export failed", io);

        assert_eq!(err.to_string(), "export failed");
        assert!(err.source().is_some());
        assert!(HostError::new("plain").source().is_none());
    }

    #[test]
    fn test_vec_selection() {
        let selection = vec![ElementId::new("Sel_A"), ElementId::new("Sel_B")];
        assert_eq!(selection.selected().len(), 2);
    }
}
