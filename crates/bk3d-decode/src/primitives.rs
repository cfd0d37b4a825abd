//! Primitive group expansion.
//!
//! Every supported topology is flattened into an independent triangle list.
//! Triangle lists and triangle strips are understood; any other topology is
//! skipped without error and reported as a [`Degradation`].

use crate::container::{IndexWidth, PrimitiveGroup, Topology};
use crate::error::{MeshError, MeshResult};
use crate::{Degradation, Triangle};

/// Result of expanding a single primitive group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupExpansion {
    /// The group was expanded. `dropped` counts trailing indices that did
    /// not form a whole triangle.
    Triangles {
        triangles: Vec<Triangle>,
        dropped: usize,
    },
    /// The group's topology is not expanded into triangles.
    Unsupported(Topology),
}

/// Expand every group of a mesh, in declaration order, into one triangle list.
///
/// Groups that lose geometry push a [`Degradation`] onto `degradations`;
/// `mesh_index` only labels those entries.
pub fn expand_groups(
    mesh_index: usize,
    groups: &[PrimitiveGroup],
    vertex_count: usize,
    degradations: &mut Vec<Degradation>,
) -> MeshResult<Vec<Triangle>> {
    let mut triangles = Vec::new();
    for (group_index, group) in groups.iter().enumerate() {
        match expand_group(group_index, group, vertex_count)? {
            GroupExpansion::Triangles {
                triangles: group_triangles,
                dropped,
            } => {
                if dropped > 0 {
                    degradations.push(Degradation::TruncatedTriangleList {
                        mesh: mesh_index,
                        group: group_index,
                        dropped,
                    });
                }
                triangles.extend(group_triangles);
            }
            GroupExpansion::Unsupported(topology) => {
                tracing::debug!(
                    mesh = mesh_index,
                    group = group_index,
                    ?topology,
                    "skipping primitive group with unsupported topology"
                );
                degradations.push(Degradation::UnsupportedTopology {
                    mesh: mesh_index,
                    group: group_index,
                    topology,
                });
            }
        }
    }
    Ok(triangles)
}

/// Expand one primitive group against a mesh with `vertex_count` vertices.
///
/// Any index at or beyond `vertex_count` fails the group; nothing is clamped.
pub fn expand_group(
    group_index: usize,
    group: &PrimitiveGroup,
    vertex_count: usize,
) -> MeshResult<GroupExpansion> {
    match group.topology {
        Topology::Triangles => {
            let consumed = group.index_count - group.index_count % 3;
            let indices = group_indices(group_index, group, consumed, vertex_count)?;
            let triangles = triangle_list(&indices)
                .map(|corners| validate(group_index, corners, vertex_count))
                .collect::<MeshResult<Vec<_>>>()?;
            Ok(GroupExpansion::Triangles {
                triangles,
                dropped: indices.len() % 3,
            })
        }
        Topology::TriangleStrip => {
            let consumed = if group.index_count >= 3 {
                group.index_count
            } else {
                0
            };
            let indices = group_indices(group_index, group, consumed, vertex_count)?;
            let triangles = triangle_strip(&indices)
                .into_iter()
                .map(|corners| validate(group_index, corners, vertex_count))
                .collect::<MeshResult<Vec<_>>>()?;
            Ok(GroupExpansion::Triangles {
                triangles,
                dropped: 0,
            })
        }
        other => Ok(GroupExpansion::Unsupported(other)),
    }
}

/// Split indices into consecutive triples, dropping an incomplete tail.
fn triangle_list(indices: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
    indices
        .chunks_exact(3)
        .map(|triple| [triple[0], triple[1], triple[2]])
}

/// Convert a strip into a list.
///
/// Each index after the first two closes a triangle with the two held
/// vertices, then replaces the first held vertex on even steps and the
/// second on odd steps. A strip of `n >= 2` indices yields `n - 2` triangles.
fn triangle_strip(indices: &[u32]) -> Vec<[u32; 3]> {
    let [first, second, rest @ ..] = indices else {
        return Vec::new();
    };
    let (mut v0, mut v1) = (*first, *second);

    let mut triangles = Vec::with_capacity(rest.len());
    for (k, &index) in rest.iter().enumerate() {
        triangles.push([v0, v1, index]);
        if k % 2 == 0 {
            v0 = index;
        } else {
            v1 = index;
        }
    }
    triangles
}

fn validate(group: usize, corners: [u32; 3], vertex_count: usize) -> MeshResult<Triangle> {
    for index in corners {
        if !usize::try_from(index).is_ok_and(|i| i < vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                group,
                index: u64::from(index),
                vertex_count,
            });
        }
    }
    Ok(Triangle(corners))
}

/// The indices read by a group: positions `offset..offset + index_count`
/// of its index source, widened to `u32`.
///
/// `consumed` is how many leading indices of the window end up in
/// triangles. Implicit indices equal their position, so they are checked
/// against `vertex_count` before anything is allocated; only an unconsumed
/// tail (at most two indices) may lie past the mesh.
fn group_indices(
    group_index: usize,
    group: &PrimitiveGroup,
    consumed: usize,
    vertex_count: usize,
) -> MeshResult<Vec<u32>> {
    let start = group.offset;
    let end = start.saturating_add(group.index_count);

    let Some(buffer) = &group.indices else {
        let out_of_range = |position: usize| MeshError::IndexOutOfRange {
            group: group_index,
            index: u64::try_from(position).unwrap_or(u64::MAX),
            vertex_count,
        };
        if consumed > 0 && start.checked_add(consumed).is_none_or(|e| e > vertex_count) {
            return Err(out_of_range(start.max(vertex_count)));
        }
        return (start..end)
            .map(|position| u32::try_from(position).map_err(|_| out_of_range(position)))
            .collect();
    };

    let available = buffer.len();
    if end > available {
        return Err(MeshError::IndexBufferTooShort {
            group: group_index,
            required: end,
            available,
        });
    }

    let size = buffer.width.size();
    let window = &buffer.data[start * size..end * size];
    let indices = match buffer.width {
        IndexWidth::U16 => window
            .chunks_exact(2)
            .map(|b| u32::from(u16::from_le_bytes([b[0], b[1]])))
            .collect(),
        IndexWidth::U32 => window
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect(),
    };
    Ok(indices)
}
