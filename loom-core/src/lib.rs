//! Core utilities and types for the loom source generator.
//!
//! This crate provides the fundamental value types shared by every other
//! loom crate: qualified [`Name`]s, identifier case helpers, and the
//! [`Dir`]/[`File`] artifact tree produced by renderers together with the
//! [`write`] collaborator that materializes it on disk.

mod file;
mod name;
mod utils;

// Output artifacts
pub use file::{Artifact, Dir, File, mime, write};
// Qualified names
pub use name::Name;
// String utilities
pub use utils::{
    make_identifier, make_private, make_public, to_pascal_case, to_screaming_snake_case,
    to_snake_case,
};
