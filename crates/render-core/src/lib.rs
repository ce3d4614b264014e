//! Core rendering abstractions for card sheet documents.
//!
//! This crate provides the fundamental traits and types used by document backends:
//! - `DocumentRenderer` trait for abstracting the page-writing operations
//! - `PrintPage`/`PrintCell`, the fully resolved description of one sheet
//! - Error types for rendering operations
//! - Unit conversion between layout millimeters and PDF points

mod error;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use traits::DocumentRenderer;
pub use types::{OutlineStyle, PrintCell, PrintPage};
