//! Image references and the `ResourceProvider` trait that resolves them.
//!
//! The layout stores references only. The bytes behind a reference are owned
//! by the caller (the file system, a download cache, the clipboard) and may
//! disappear at any time, so resolving a reference is always fallible.

use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// An opaque handle to a user-supplied raster image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageReference {
    /// An image on disk, resolved when it is needed.
    Path(PathBuf),
    /// Image bytes held in memory, e.g. a pasted or downloaded image.
    Bytes {
        name: Arc<str>,
        data: SharedResourceData,
    },
}

impl ImageReference {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ImageReference::Path(path.into())
    }

    pub fn from_bytes(name: impl Into<Arc<str>>, data: Vec<u8>) -> Self {
        ImageReference::Bytes {
            name: name.into(),
            data: Arc::new(data),
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ImageReference::Path(path) => Some(path),
            ImageReference::Bytes { .. } => None,
        }
    }

    /// A short human-readable name for logs and reports.
    pub fn display_name(&self) -> Cow<'_, str> {
        match self {
            ImageReference::Path(path) => path.to_string_lossy(),
            ImageReference::Bytes { name, .. } => Cow::Borrowed(name.as_ref()),
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl From<PathBuf> for ImageReference {
    fn from(path: PathBuf) -> Self {
        ImageReference::Path(path)
    }
}

impl From<&Path> for ImageReference {
    fn from(path: &Path) -> Self {
        ImageReference::Path(path.to_path_buf())
    }
}

impl From<&str> for ImageReference {
    fn from(path: &str) -> Self {
        ImageReference::Path(PathBuf::from(path))
    }
}

/// A trait for resolving image references into bytes.
///
/// # Implementations
///
/// - `FilesystemResourceProvider`: reads path references from disk (cardgrid-resource)
/// - `InMemoryResourceProvider`: serves pre-registered bytes (always available)
///
/// Every provider serves `ImageReference::Bytes` directly.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load the bytes behind a reference.
    fn load(&self, reference: &ImageReference) -> Result<SharedResourceData, ResourceError>;

    /// Check whether a reference can currently be resolved.
    fn exists(&self, reference: &ImageReference) -> bool;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory resource provider.
///
/// Path references are looked up by their string form in a pre-populated
/// store; byte references resolve to themselves.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: std::sync::RwLock<std::collections::HashMap<PathBuf, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<PathBuf>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string_lossy().into_owned(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path, Arc::new(data));
        Ok(())
    }

    /// Remove a resource from the store.
    ///
    /// Returns `None` if the lock is poisoned or the resource doesn't exist.
    pub fn remove(&self, path: impl AsRef<Path>) -> Option<SharedResourceData> {
        self.resources.write().ok()?.remove(path.as_ref())
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.resources.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, reference: &ImageReference) -> Result<SharedResourceData, ResourceError> {
        let path = match reference {
            ImageReference::Bytes { data, .. } => return Ok(Arc::clone(data)),
            ImageReference::Path(path) => path,
        };
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string_lossy().into_owned(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string_lossy().into_owned()))
    }

    fn exists(&self, reference: &ImageReference) -> bool {
        match reference {
            ImageReference::Bytes { .. } => true,
            ImageReference::Path(path) => self
                .resources
                .read()
                .map(|r| r.contains_key(path))
                .unwrap_or(false),
        }
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_provider_resolves_registered_paths() {
        let provider = InMemoryResourceProvider::new();
        provider.add("cards/blue-eyes.png", vec![1, 2, 3]).unwrap();

        let reference = ImageReference::path("cards/blue-eyes.png");
        assert!(provider.exists(&reference));
        assert_eq!(*provider.load(&reference).unwrap(), vec![1, 2, 3]);
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_in_memory_provider_missing_path_is_not_found() {
        let provider = InMemoryResourceProvider::new();
        let result = provider.load(&ImageReference::path("gone.png"));
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_removed_resource_becomes_unavailable() {
        let provider = InMemoryResourceProvider::new();
        provider.add("tmp.png", vec![9]).unwrap();
        let reference = ImageReference::path("tmp.png");

        assert!(provider.remove("tmp.png").is_some());
        assert!(!provider.exists(&reference));
        assert!(provider.is_empty());
    }

    #[test]
    fn test_byte_references_resolve_without_registration() {
        let provider = InMemoryResourceProvider::new();
        let reference = ImageReference::from_bytes("clipboard", vec![7, 7]);
        assert!(provider.exists(&reference));
        assert_eq!(*provider.load(&reference).unwrap(), vec![7, 7]);
        assert_eq!(reference.display_name(), "clipboard");
    }
}
