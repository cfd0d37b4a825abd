//! Decode BK3D mesh containers into a flat triangle-mesh scene graph.
//!
//! This crate takes an already parsed [`Container`] and turns it into a
//! [`SceneGraph`]: one [`MeshRecord`] per mesh that produces triangles, and
//! one [`TransformNode`] per transform record of each kept mesh, all parented
//! directly to a single root.
//!
//! # Design principles
//!
//! - **Blocking, single pass**: One container is decoded start to finish on the calling thread
//! - **Read-only input**: The container is never modified
//! - **All or nothing**: A malformed mesh rejects the whole container
//!
//! # Key functions
//!
//! - [`resolve_attributes`]: Find the position and normal channels of a mesh
//! - [`extract_vec3`]: Walk a strided vertex buffer into `Vec3`s
//! - [`expand_groups`]: Flatten triangle lists and strips into triangles
//! - [`decode_scene`]: Run the whole pipeline over a container

mod error;

pub mod attributes;
pub mod container;
pub mod primitives;
pub mod scene;
pub mod vertices;

pub use attributes::{ResolvedAttribute, ResolvedAttributes, resolve_attributes};
pub use container::{
    AttributeDescriptor, BufferSlot, Container, ElementFormat, IndexBuffer, IndexWidth,
    PrimitiveGroup, RawMesh, Topology, TransformKind, TransformRecord,
};
pub use error::{DecodeError, DecodeResult, MeshError, MeshResult};
pub use primitives::{GroupExpansion, expand_group, expand_groups};
pub use scene::decode_scene;
pub use vertices::{extract_vec3, zero_normals};

use glam::{Mat4, Vec3};

/// Three vertex indices into the owning mesh's position array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub [u32; 3]);

/// Primitive kind of every decoded mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimitiveKind {
    #[default]
    Triangle,
}

/// A decoded mesh.
///
/// `normals` always has the same length as `positions`. Meshes without a
/// normal attribute carry zero vectors, not computed normals.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecord {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    pub primitive: PrimitiveKind,
}

impl MeshRecord {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// A mesh instance placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNode {
    pub name: String,
    /// Absolute transform, copied from the source without composing parents.
    pub transform: Mat4,
    /// Index into [`SceneGraph::meshes`].
    pub mesh: usize,
}

/// The synthetic root. Every node is one of its direct children.
#[derive(Debug, Clone, PartialEq)]
pub struct RootNode {
    pub transform: Mat4,
    pub children: Vec<TransformNode>,
}

impl Default for RootNode {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            children: Vec::new(),
        }
    }
}

/// Decoded scene: a flat node list under one root, and the meshes they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    pub root: RootNode,
    pub meshes: Vec<MeshRecord>,
}

/// Geometry that was silently left out of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// A primitive group with a topology other than triangle list or strip.
    UnsupportedTopology {
        mesh: usize,
        group: usize,
        topology: Topology,
    },
    /// A triangle list whose index count was not a multiple of three.
    TruncatedTriangleList {
        mesh: usize,
        group: usize,
        dropped: usize,
    },
    /// A mesh that produced no triangles and was left out of the scene.
    EmptyMeshDropped { mesh: usize, name: String },
}

/// Result of a successful decode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedScene {
    pub scene: SceneGraph,
    /// Source mesh and group indices refer to the container, not the scene.
    pub degradations: Vec<Degradation>,
}

impl DecodedScene {
    /// Whether any geometry from the container is missing from the scene.
    #[must_use]
    pub fn is_lossy(&self) -> bool {
        !self.degradations.is_empty()
    }
}
