//! Core types shared across the service

pub mod document;
pub mod query;

pub use document::{Document, FileKind};
pub use query::{QueryMatch, DEFAULT_TOP_K};
