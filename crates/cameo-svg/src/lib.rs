//! Mutable SVG documents for the Cameo renderer.
//!
//! A diagram editor serializes its whole canvas to SVG. To export only part of
//! it, the serialization has to be parsed into a tree that can be edited and
//! written back without disturbing anything that was not touched. This crate
//! provides that tree as [`VectorDocument`], an arena of nodes addressed by
//! [`NodeId`] with explicit parent and child links.
//!
//! # Round trip
//!
//! Element and attribute names are kept exactly as written (including
//! namespace prefixes and `xmlns` declarations), attribute order is preserved,
//! and text, comments, CDATA sections and the prolog survive a parse and
//! write. Escaping is normalized: the writer escapes what XML requires.
//!
//! # Example
//!
//! ```
//! use cameo_svg::VectorDocument;
//!
//! let mut doc = VectorDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"/></svg>"#)?;
//!
//! let root = doc.root_element().unwrap();
//! doc.element_mut(root).unwrap().set_attribute("viewBox", "0 0 10 10");
//!
//! assert_eq!(
//!     doc.to_svg_string()?,
//!     r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><g id="a"/></svg>"#
//! );
//! # Ok::<(), cameo_svg::SvgError>(())
//! ```

mod document;
mod error;
mod node;
mod parser;
mod writer;

pub use document::{Descendants, VectorDocument};
pub use error::SvgError;
pub use node::{Attribute, Declaration, ElementData, NodeData, NodeId};
