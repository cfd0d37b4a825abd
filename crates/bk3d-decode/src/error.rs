//! Decode errors.
//!
//! Every error here rejects the whole container. Lossy-but-successful
//! outcomes are reported through [`crate::Degradation`] instead.

use crate::container::{ElementFormat, TransformKind};

/// Why a single mesh could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("no attribute named like \"position\"")]
    MissingPositionAttribute,

    #[error("attribute '{attribute}' refers to slot {slot}, but the mesh has {slot_count} slots")]
    MissingSlot {
        attribute: String,
        slot: usize,
        slot_count: usize,
    },

    #[error(
        "attribute '{attribute}' has format {format:?} with {components} components, expected at least 3 floats"
    )]
    UnsupportedVertexFormat {
        attribute: String,
        format: ElementFormat,
        components: u32,
    },

    #[error("slot {slot} has stride {stride}, which does not divide its size {size_bytes}")]
    InvalidStride {
        slot: usize,
        stride: usize,
        size_bytes: usize,
    },

    #[error("slot {slot} declares {declared} bytes but holds only {available}")]
    SlotTruncated {
        slot: usize,
        declared: usize,
        available: usize,
    },

    #[error(
        "attribute '{attribute}' at offset {offset} reads past the end of its slot ({size_bytes} bytes, stride {stride})"
    )]
    AttributeOutOfBounds {
        attribute: String,
        offset: usize,
        stride: usize,
        size_bytes: usize,
    },

    #[error("mesh has {positions} positions but {normals} normals")]
    NormalCountMismatch { positions: usize, normals: usize },

    #[error("group {group} needs {required} indices but its buffer holds {available}")]
    IndexBufferTooShort {
        group: usize,
        required: usize,
        available: usize,
    },

    #[error("group {group} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        group: usize,
        index: u64,
        vertex_count: usize,
    },

    #[error("transform {transform} has unsupported kind {kind:?}")]
    UnsupportedTransformKind {
        transform: usize,
        kind: TransformKind,
    },
}

/// A container was rejected because one of its meshes could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to decode mesh {mesh_index} ('{mesh_name}'): {source}")]
pub struct DecodeError {
    pub mesh_index: usize,
    pub mesh_name: String,
    #[source]
    pub source: MeshError,
}

impl DecodeError {
    /// The underlying reason the mesh was rejected.
    #[must_use]
    pub fn kind(&self) -> &MeshError {
        &self.source
    }
}

/// Result type for container-level decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for the per-mesh stages.
pub type MeshResult<T> = Result<T, MeshError>;
