//! Errors raised while reading or writing SVG documents.

use std::str::Utf8Error;

use thiserror::Error;

/// Error type for parsing and serializing a [`VectorDocument`].
///
/// [`VectorDocument`]: crate::VectorDocument
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("failed to write XML: {0}")]
    Write(#[source] quick_xml::Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("unbalanced tag `{0}`")]
    UnbalancedTag(String),

    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
}
