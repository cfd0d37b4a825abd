//! High-level importer for BK3D mesh containers.
//!
//! This crate wraps the pure decoder in [`bk3d_decode`] with what a host
//! needs to pick and run an importer:
//!
//! - [`IMPORTER_DESC`]: the immutable registration record
//! - [`ContainerLoader`]: the seam to whatever parses BK3D files on disk
//! - [`PostProcessSteps`]: optional handedness and winding fixes
//! - [`Importer`]: ties loading, decoding and post-processing together
//!
//! # Example
//!
//! ```
//! use bk3d::{Importer, MemoryLoader};
//! use bk3d::decode::Container;
//!
//! let mut loader = MemoryLoader::new();
//! loader.insert("empty.bk3d", Container::default());
//!
//! let importer = Importer::new(loader);
//! assert!(importer.can_read("empty.bk3d"));
//! let decoded = importer.read_file("empty.bk3d").unwrap();
//! assert!(decoded.scene.meshes.is_empty());
//! ```

mod desc;
mod error;
mod importer;
mod loader;
mod postprocess;

pub use bk3d_decode as decode;
pub use bk3d_decode::{DecodedScene, Degradation, MeshRecord, SceneGraph, TransformNode};
pub use desc::{IMPORTER_DESC, ImporterDesc, ImporterFlags, has_gzip_signature};
pub use error::{Error, Result};
pub use importer::{ImportOptions, Importer};
pub use loader::{ContainerLoader, LoadError, MemoryLoader, NoLoader};
pub use postprocess::{PostProcessSteps, flip_winding_order, make_left_handed};
