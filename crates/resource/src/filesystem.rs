//! Filesystem-based resource provider for native platforms.
//!
//! Path references are read from disk each time they are loaded, so an image
//! deleted after placement surfaces as `ResourceError::NotFound` at export.
//!
//! # Sandboxing
//!
//! A provider built with [`FilesystemResourceProvider::sandboxed`] validates
//! that every resolved path stays within its base directory and rejects
//! absolute paths and `..` traversal.

use cardgrid_traits::{ImageReference, ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct FilesystemResourceProvider {
    /// Relative references are resolved against this directory.
    base_path: Option<PathBuf>,
    /// Canonicalized base path, set only when sandboxing is enabled.
    sandbox_root: Option<PathBuf>,
    sandboxed: bool,
}

impl FilesystemResourceProvider {
    /// A provider that accepts any path; relative paths resolve against the
    /// process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider resolving relative paths against `base_path`. Absolute paths
    /// are still accepted.
    pub fn with_base<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: Some(base_path.as_ref().to_path_buf()),
            sandbox_root: None,
            sandboxed: false,
        }
    }

    /// A provider that only serves files below `base_path`.
    pub fn sandboxed<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet; every lookup is then rejected
        // unless it passes the component check.
        let canonical = base.canonicalize().ok();
        Self {
            base_path: Some(base),
            sandbox_root: canonical,
            sandboxed: true,
        }
    }

    pub fn base(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Resolves a path reference, applying the sandbox rules if enabled.
    ///
    /// Returns `None` if the path would escape the sandbox.
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        if !self.sandboxed {
            return Some(match &self.base_path {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.to_path_buf(),
            });
        }

        if path.is_absolute() {
            return None;
        }
        let full_path = self
            .base_path
            .as_ref()
            .map(|base| base.join(path))
            .unwrap_or_else(|| path.to_path_buf());

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref root) = self.sandbox_root
        {
            return canonical.starts_with(root).then_some(canonical);
        }

        // Canonicalization failed (the file doesn't exist): reject obvious traversal.
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }
        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, reference: &ImageReference) -> Result<SharedResourceData, ResourceError> {
        let path = match reference {
            ImageReference::Bytes { data, .. } => return Ok(Arc::clone(data)),
            ImageReference::Path(path) => path,
        };
        let display = path.to_string_lossy().into_owned();
        let full_path = self
            .resolve(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside sandbox)", display)))?;

        log::debug!("Reading image from {}", full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(display)
            } else {
                ResourceError::LoadFailed {
                    path: display,
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, reference: &ImageReference) -> bool {
        match reference {
            ImageReference::Bytes { .. } => true,
            ImageReference::Path(path) => self.resolve(path).map(|p| p.is_file()).unwrap_or(false),
        }
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_loads_absolute_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("card.png");
        fs::write(&file_path, b"png bytes").unwrap();

        let provider = FilesystemResourceProvider::new();
        let data = provider.load(&ImageReference::path(&file_path)).unwrap();
        assert_eq!(&*data, b"png bytes");
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("card.jpg"), b"jpeg").unwrap();

        let provider = FilesystemResourceProvider::with_base(dir.path());
        assert!(provider.exists(&ImageReference::path("card.jpg")));
        assert_eq!(&*provider.load(&ImageReference::path("card.jpg")).unwrap(), b"jpeg");
        assert_eq!(provider.base(), Some(dir.path()));
    }

    #[test]
    fn test_deleted_file_is_not_found() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("temp.jpg");
        fs::write(&file_path, b"x").unwrap();
        let reference = ImageReference::path(&file_path);

        let provider = FilesystemResourceProvider::new();
        assert!(provider.exists(&reference));
        fs::remove_file(&file_path).unwrap();

        assert!(!provider.exists(&reference));
        assert!(matches!(provider.load(&reference), Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_directories_do_not_exist_as_images() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new();
        assert!(!provider.exists(&ImageReference::path(dir.path())));
    }

    #[test]
    fn test_byte_references_bypass_the_filesystem() {
        let provider = FilesystemResourceProvider::sandboxed("/nonexistent");
        let reference = ImageReference::from_bytes("pasted", vec![1, 2]);
        assert_eq!(&*provider.load(&reference).unwrap(), &[1, 2]);
    }

    #[test]
    fn test_sandbox_blocks_traversal_and_absolute_paths() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::sandboxed(dir.path());

        assert!(provider.load(&ImageReference::path("../../../etc/passwd")).is_err());
        assert!(provider.load(&ImageReference::path("/etc/passwd")).is_err());
        assert!(!provider.exists(&ImageReference::path("foo/../../bar")));
    }

    #[test]
    fn test_sandbox_allows_nested_paths() {
        let dir = tempdir().unwrap();
        let nested_dir = dir.path().join("deck");
        fs::create_dir(&nested_dir).unwrap();
        fs::write(nested_dir.join("card.png"), b"nested").unwrap();

        let provider = FilesystemResourceProvider::sandboxed(dir.path());
        let reference = ImageReference::path("deck/card.png");
        assert!(provider.exists(&reference));
        assert_eq!(&*provider.load(&reference).unwrap(), b"nested");
    }
}
