//! Shared rendering machinery for the loom source generator.
//!
//! This crate provides the language-agnostic half of rendering. The
//! language backends (`loom-codegen-go`, `loom-codegen-java`) implement
//! [`render::Backend`] on top of it.
//!
//! # Module Organization
//!
//! - [`builder`] - Text building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`tree`] - Render-time mirror of the IR with a typed payload
//! - [`importer`] - Per-file import bookkeeping and local names
//! - [`render`] - The render driver, backend trait and macro expansion
//! - [`stdlib`] - Portable macros for common operations
//! - [`naming`] - Identifier conventions per language
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod comment;
pub mod config;
pub mod error;
pub mod importer;
pub mod literal;
pub mod naming;
pub mod render;
pub mod stdlib;
pub mod tree;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use config::RenderConfig;
pub use error::RenderError;
pub use importer::{Import, ImportBlock, ImportStyle, Importer};
pub use render::{Backend, RenderCx, Rendered, render};
pub use tree::{Tree, TreeId};
