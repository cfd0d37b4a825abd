//! The BK3D importer.

use std::path::Path;

use bk3d_decode::{Container, DecodedScene, decode_scene};

use crate::desc::{IMPORTER_DESC, ImporterDesc};
use crate::error::{Error, Result};
use crate::loader::ContainerLoader;
use crate::postprocess::PostProcessSteps;

/// Runtime configuration of an [`Importer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub post_process: PostProcessSteps,
}

impl ImportOptions {
    #[must_use]
    pub fn with_make_left_handed(mut self, enabled: bool) -> Self {
        self.post_process.make_left_handed = enabled;
        self
    }

    #[must_use]
    pub fn with_flip_winding_order(mut self, enabled: bool) -> Self {
        self.post_process.flip_winding_order = enabled;
        self
    }
}

/// Imports BK3D files through a [`ContainerLoader`].
///
/// Importing is synchronous: a file is loaded, decoded and post-processed
/// before [`read_file`](Self::read_file) returns.
#[derive(Debug, Clone, Default)]
pub struct Importer<L> {
    loader: L,
    options: ImportOptions,
}

impl<L: ContainerLoader> Importer<L> {
    /// Create an importer with default options.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            options: ImportOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// The importer's registration record.
    #[must_use]
    pub fn desc(&self) -> &'static ImporterDesc {
        &IMPORTER_DESC
    }

    #[must_use]
    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Whether this importer should handle `path`: the name must look like a
    /// BK3D file and the loader must accept it.
    pub fn can_read(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        IMPORTER_DESC.matches_path(path) && self.loader.probe(path)
    }

    /// Load, decode and post-process the file at `path`.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<DecodedScene> {
        let path = path.as_ref();
        if !IMPORTER_DESC.matches_path(path) {
            return Err(Error::NotSupported(path.to_path_buf()));
        }

        tracing::info!("Importing {}", path.display());
        let container = self.loader.load(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_container(&container)
    }

    /// Decode and post-process an already loaded container.
    pub fn read_container(&self, container: &Container) -> Result<DecodedScene> {
        let mut decoded = decode_scene(container).inspect_err(|e| {
            tracing::error!("Rejected container: {}", e);
        })?;
        self.options.post_process.apply(&mut decoded.scene);

        tracing::info!(
            "Decoded {} meshes and {} nodes from {} source meshes",
            decoded.scene.meshes.len(),
            decoded.scene.root.children.len(),
            container.meshes.len()
        );
        if decoded.is_lossy() {
            tracing::warn!(
                "Import is lossy: {} pieces of geometry were skipped",
                decoded.degradations.len()
            );
        }
        Ok(decoded)
    }
}
