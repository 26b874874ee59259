//! Cameo Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Cameo rendering
//! pipeline and the capabilities a host diagram editor has to provide. It
//! includes:
//!
//! - **Identifiers**: Efficient string-interned element identifiers ([`identifier::ElementId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Elements**: Geometry-bearing element handles and references ([`element`] module)
//! - **Registry**: Identifier to element lookup ([`registry`] module)
//! - **Host**: Document and selection capabilities ([`host`] module)
//! - **Closure**: Copy-tree types and a reference closure service ([`closure`] module)

pub mod closure;
pub mod color;
pub mod element;
pub mod geometry;
pub mod host;
pub mod identifier;
pub mod registry;
