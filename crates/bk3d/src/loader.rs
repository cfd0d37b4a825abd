//! Container loading.
//!
//! Turning bytes on disk into a [`Container`] (decompression, pointer
//! relocation, tokenizing) is not this crate's job. A host plugs its parser in
//! through [`ContainerLoader`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bk3d_decode::Container;

/// Error produced by a [`ContainerLoader`].
pub type LoadError = Box<dyn std::error::Error + Send + Sync>;

/// Parses BK3D files into the raw container model.
pub trait ContainerLoader {
    /// Whether the file at `path` looks like something [`load`](Self::load) can parse.
    fn probe(&self, path: &Path) -> bool;

    /// Parse the file at `path`.
    fn load(&self, path: &Path) -> Result<Container, LoadError>;
}

/// A loader that cannot load anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoader;

impl ContainerLoader for NoLoader {
    fn probe(&self, _path: &Path) -> bool {
        false
    }

    fn load(&self, _path: &Path) -> Result<Container, LoadError> {
        Err("no container loader configured".into())
    }
}

/// A loader serving containers that were parsed ahead of time, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    containers: HashMap<PathBuf, Container>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `container` under `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, container: Container) {
        self.containers.insert(path.into(), container);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_container(mut self, path: impl Into<PathBuf>, container: Container) -> Self {
        self.insert(path, container);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

impl ContainerLoader for MemoryLoader {
    fn probe(&self, path: &Path) -> bool {
        self.containers.contains_key(path)
    }

    fn load(&self, path: &Path) -> Result<Container, LoadError> {
        self.containers
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no container registered for '{}'", path.display()).into())
    }
}
