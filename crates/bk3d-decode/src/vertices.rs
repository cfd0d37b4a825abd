//! Vertex extraction.

use glam::Vec3;

use crate::attributes::ResolvedAttribute;
use crate::container::ElementFormat;
use crate::error::{MeshError, MeshResult};

/// Bytes read per element: three little-endian `f32` components.
const VEC3_SIZE: usize = 12;

/// Read one 3-component vector per element of the attribute's slot.
///
/// The slot is walked at its declared stride, starting at the attribute's
/// byte offset. Only float attributes with at least three components are
/// accepted; extra components are skipped. The whole read range is checked
/// against the slot's declared size before anything is read.
pub fn extract_vec3(attribute: ResolvedAttribute<'_>) -> MeshResult<Vec<Vec3>> {
    let ResolvedAttribute {
        descriptor,
        slot_index,
        slot,
    } = attribute;

    if descriptor.format != ElementFormat::Float || descriptor.component_count < 3 {
        return Err(MeshError::UnsupportedVertexFormat {
            attribute: descriptor.name.clone(),
            format: descriptor.format,
            components: descriptor.component_count,
        });
    }

    if slot.size_bytes > slot.data.len() {
        return Err(MeshError::SlotTruncated {
            slot: slot_index,
            declared: slot.size_bytes,
            available: slot.data.len(),
        });
    }

    let stride = slot.stride;
    let count = match slot.element_count() {
        Some(count) if slot.size_bytes % stride == 0 => count,
        _ => {
            return Err(MeshError::InvalidStride {
                slot: slot_index,
                stride,
                size_bytes: slot.size_bytes,
            });
        }
    };

    let offset = descriptor.offset;
    let out_of_bounds = || MeshError::AttributeOutOfBounds {
        attribute: descriptor.name.clone(),
        offset,
        stride,
        size_bytes: slot.size_bytes,
    };
    if let Some(last) = count.checked_sub(1) {
        let end = last
            .checked_mul(stride)
            .and_then(|base| base.checked_add(offset))
            .and_then(|start| start.checked_add(VEC3_SIZE))
            .ok_or_else(&out_of_bounds)?;
        if end > slot.size_bytes {
            return Err(out_of_bounds());
        }
    }

    let data = &slot.data[..slot.size_bytes];
    let vectors = data
        .chunks_exact(stride)
        .map(|element| read_vec3(&element[offset..offset + VEC3_SIZE]))
        .collect();
    Ok(vectors)
}

/// Placeholder normals for a mesh without a normal attribute.
#[must_use]
pub fn zero_normals(vertex_count: usize) -> Vec<Vec3> {
    vec![Vec3::ZERO; vertex_count]
}

fn read_vec3(bytes: &[u8]) -> Vec3 {
    let component = |i: usize| {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[i * 4..i * 4 + 4]);
        f32::from_le_bytes(raw)
    };
    Vec3::new(component(0), component(1), component(2))
}
