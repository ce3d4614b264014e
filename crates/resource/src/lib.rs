//! Resource providers for cardgrid.
//!
//! ## Available Providers
//!
//! - [`FilesystemResourceProvider`]: Loads path references from the local filesystem
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory provider from cardgrid-traits:
//! - [`InMemoryResourceProvider`]: Pre-populated in-memory storage

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use cardgrid_traits::InMemoryResourceProvider;
