//! Raw container model.
//!
//! These types are the in-memory shape of a parsed BK3D file, as handed over
//! by whatever parses the on-disk container. The decoder only ever reads them.
//! Enumerated tags carry the OpenGL constants the format stores on disk.

/// A parsed BK3D container: the ordered list of meshes it declares.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub meshes: Vec<RawMesh>,
}

/// One mesh as stored in the container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    pub name: String,
    pub attributes: Vec<AttributeDescriptor>,
    pub slots: Vec<BufferSlot>,
    pub primitive_groups: Vec<PrimitiveGroup>,
    pub transforms: Vec<TransformRecord>,
}

/// A named per-vertex channel backed by one buffer slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    /// Index into the owning mesh's slot list.
    pub slot: usize,
    pub component_count: u32,
    pub format: ElementFormat,
    /// Byte offset of this attribute inside each strided element.
    pub offset: usize,
}

impl AttributeDescriptor {
    /// Create a descriptor for a float attribute with `component_count` components.
    #[must_use]
    pub fn float(name: impl Into<String>, slot: usize, component_count: u32, offset: usize) -> Self {
        Self {
            name: name.into(),
            slot,
            component_count,
            format: ElementFormat::Float,
            offset,
        }
    }
}

/// A raw vertex buffer shared by one or more attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSlot {
    pub data: Vec<u8>,
    /// Declared size of the buffer in bytes. Never larger than `data.len()`
    /// for a well-formed slot.
    pub size_bytes: usize,
    /// Distance in bytes between consecutive elements.
    pub stride: usize,
}

impl BufferSlot {
    /// Create a slot whose declared size is the whole of `data`.
    #[must_use]
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        let size_bytes = data.len();
        Self {
            data,
            size_bytes,
            stride,
        }
    }

    /// Pack tightly interleaved little-endian `f32` rows into a slot.
    ///
    /// Every row must have the same length; the stride is `4 * row.len()`.
    #[must_use]
    pub fn from_f32_rows<const N: usize>(rows: &[[f32; N]]) -> Self {
        let data = rows
            .iter()
            .flat_map(|row| row.iter().flat_map(|c| c.to_le_bytes()))
            .collect();
        Self::new(data, N * 4)
    }

    /// Number of whole elements in the declared extent, or `None` for a zero stride.
    #[must_use]
    pub fn element_count(&self) -> Option<usize> {
        self.size_bytes.checked_div(self.stride)
    }
}

/// A run of indices sharing one topology and one index encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveGroup {
    pub topology: Topology,
    /// `None` means the indices are implicit: index `i` is vertex `i`.
    pub indices: Option<IndexBuffer>,
    pub index_count: usize,
    /// First index position read by this group.
    pub offset: usize,
}

impl PrimitiveGroup {
    /// A group drawing `index_count` vertices in order, starting at `offset`.
    #[must_use]
    pub fn sequential(topology: Topology, offset: usize, index_count: usize) -> Self {
        Self {
            topology,
            indices: None,
            index_count,
            offset,
        }
    }

    /// A group reading every element of `indices` from the start.
    #[must_use]
    pub fn indexed(topology: Topology, indices: IndexBuffer) -> Self {
        let index_count = indices.len();
        Self {
            topology,
            indices: Some(indices),
            index_count,
            offset: 0,
        }
    }
}

/// Width of a single stored index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    /// Size of one index in bytes.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// Little-endian index data of a fixed width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    pub width: IndexWidth,
    pub data: Vec<u8>,
}

impl IndexBuffer {
    #[must_use]
    pub fn from_u16(indices: &[u16]) -> Self {
        Self {
            width: IndexWidth::U16,
            data: indices.iter().flat_map(|i| i.to_le_bytes()).collect(),
        }
    }

    #[must_use]
    pub fn from_u32(indices: &[u32]) -> Self {
        Self {
            width: IndexWidth::U32,
            data: indices.iter().flat_map(|i| i.to_le_bytes()).collect(),
        }
    }

    /// Number of whole indices stored; trailing partial bytes are ignored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / self.width.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A transform entry attached to a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformRecord {
    pub name: String,
    pub kind: TransformKind,
    /// Absolute (world) matrix, 16 floats in row-major order.
    pub absolute: [f32; 16],
}

impl TransformRecord {
    /// Row-major identity matrix.
    pub const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ];

    #[must_use]
    pub fn new(name: impl Into<String>, kind: TransformKind, absolute: [f32; 16]) -> Self {
        Self {
            name: name.into(),
            kind,
            absolute,
        }
    }
}

/// Numeric format of an attribute's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementFormat {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
    HalfFloat,
    Double,
    Unknown(u32),
}

impl ElementFormat {
    #[must_use]
    pub const fn from_gl(code: u32) -> Self {
        match code {
            0x1400 => Self::Byte,
            0x1401 => Self::UnsignedByte,
            0x1402 => Self::Short,
            0x1403 => Self::UnsignedShort,
            0x1404 => Self::Int,
            0x1405 => Self::UnsignedInt,
            0x1406 => Self::Float,
            0x140A => Self::Double,
            0x140B => Self::HalfFloat,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn gl_code(self) -> u32 {
        match self {
            Self::Byte => 0x1400,
            Self::UnsignedByte => 0x1401,
            Self::Short => 0x1402,
            Self::UnsignedShort => 0x1403,
            Self::Int => 0x1404,
            Self::UnsignedInt => 0x1405,
            Self::Float => 0x1406,
            Self::Double => 0x140A,
            Self::HalfFloat => 0x140B,
            Self::Unknown(code) => code,
        }
    }
}

/// Primitive topology of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Quads,
    QuadStrip,
    Polygon,
    Unknown(u32),
}

impl Topology {
    #[must_use]
    pub const fn from_gl(code: u32) -> Self {
        match code {
            0x0000 => Self::Points,
            0x0001 => Self::Lines,
            0x0002 => Self::LineLoop,
            0x0003 => Self::LineStrip,
            0x0004 => Self::Triangles,
            0x0005 => Self::TriangleStrip,
            0x0006 => Self::TriangleFan,
            0x0007 => Self::Quads,
            0x0008 => Self::QuadStrip,
            0x0009 => Self::Polygon,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn gl_code(self) -> u32 {
        match self {
            Self::Points => 0x0000,
            Self::Lines => 0x0001,
            Self::LineLoop => 0x0002,
            Self::LineStrip => 0x0003,
            Self::Triangles => 0x0004,
            Self::TriangleStrip => 0x0005,
            Self::TriangleFan => 0x0006,
            Self::Quads => 0x0007,
            Self::QuadStrip => 0x0008,
            Self::Polygon => 0x0009,
            Self::Unknown(code) => code,
        }
    }
}

/// Kind tag of a transform record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Transform,
    TransformSimple,
    Bone,
    Dof,
    IkHandle,
    Unknown(u32),
}

impl TransformKind {
    /// Whether the record carries a plain absolute matrix the decoder understands.
    #[must_use]
    pub const fn is_plain(self) -> bool {
        matches!(self, Self::Transform | Self::TransformSimple)
    }
}
