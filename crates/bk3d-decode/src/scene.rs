//! Scene assembly.

use glam::Mat4;

use crate::attributes::resolve_attributes;
use crate::container::{Container, RawMesh, TransformRecord};
use crate::error::{DecodeError, DecodeResult, MeshError, MeshResult};
use crate::primitives::expand_groups;
use crate::vertices::{extract_vec3, zero_normals};
use crate::{DecodedScene, Degradation, MeshRecord, PrimitiveKind, TransformNode};

/// Decode every mesh of a container into a scene.
///
/// Meshes are processed in declaration order. A mesh that yields no
/// triangles is dropped together with its transforms, so mesh indices in the
/// scene can be lower than in the container. Each kept mesh gets one node per
/// transform record, or a single identity node when it has none.
///
/// The first malformed mesh fails the whole decode; no partial scene is
/// returned.
pub fn decode_scene(container: &Container) -> DecodeResult<DecodedScene> {
    let mut decoded = DecodedScene::default();

    for (mesh_index, raw) in container.meshes.iter().enumerate() {
        decode_into(mesh_index, raw, &mut decoded).map_err(|source| DecodeError {
            mesh_index,
            mesh_name: raw.name.clone(),
            source,
        })?;
    }

    tracing::debug!(
        meshes = decoded.scene.meshes.len(),
        nodes = decoded.scene.root.children.len(),
        degradations = decoded.degradations.len(),
        "decoded container"
    );
    Ok(decoded)
}

fn decode_into(mesh_index: usize, raw: &RawMesh, decoded: &mut DecodedScene) -> MeshResult<()> {
    let Some(mesh) = decode_mesh(mesh_index, raw, &mut decoded.degradations)? else {
        tracing::debug!(mesh = mesh_index, name = %raw.name, "dropping mesh without triangles");
        decoded.degradations.push(Degradation::EmptyMeshDropped {
            mesh: mesh_index,
            name: raw.name.clone(),
        });
        return Ok(());
    };

    let scene = &mut decoded.scene;
    let nodes = build_nodes(raw, scene.meshes.len())?;
    tracing::debug!(
        mesh = mesh_index,
        name = %mesh.name,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangles.len(),
        nodes = nodes.len(),
        "decoded mesh"
    );
    scene.meshes.push(mesh);
    scene.root.children.extend(nodes);
    Ok(())
}

/// Decode the geometry of one mesh, or `None` if it has no triangles.
fn decode_mesh(
    mesh_index: usize,
    raw: &RawMesh,
    degradations: &mut Vec<Degradation>,
) -> MeshResult<Option<MeshRecord>> {
    let attributes = resolve_attributes(&raw.attributes, &raw.slots)?;

    let positions = extract_vec3(attributes.position)?;
    let normals = match attributes.normal {
        Some(normal) => {
            let normals = extract_vec3(normal)?;
            if normals.len() != positions.len() {
                return Err(MeshError::NormalCountMismatch {
                    positions: positions.len(),
                    normals: normals.len(),
                });
            }
            normals
        }
        None => zero_normals(positions.len()),
    };

    let triangles = expand_groups(mesh_index, &raw.primitive_groups, positions.len(), degradations)?;
    if triangles.is_empty() {
        return Ok(None);
    }

    Ok(Some(MeshRecord {
        name: raw.name.clone(),
        positions,
        normals,
        triangles,
        primitive: PrimitiveKind::Triangle,
    }))
}

/// One node per transform record, all referencing `mesh`.
fn build_nodes(raw: &RawMesh, mesh: usize) -> MeshResult<Vec<TransformNode>> {
    if raw.transforms.is_empty() {
        return Ok(vec![TransformNode {
            name: raw.name.clone(),
            transform: Mat4::IDENTITY,
            mesh,
        }]);
    }

    raw.transforms
        .iter()
        .enumerate()
        .map(|(transform, record)| {
            if !record.kind.is_plain() {
                return Err(MeshError::UnsupportedTransformKind {
                    transform,
                    kind: record.kind,
                });
            }
            Ok(TransformNode {
                name: record.name.clone(),
                transform: row_major(record),
                mesh,
            })
        })
        .collect()
}

fn row_major(record: &TransformRecord) -> Mat4 {
    Mat4::from_cols_array(&record.absolute).transpose()
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;
    use crate::container::{
        AttributeDescriptor, BufferSlot, IndexBuffer, PrimitiveGroup, Topology, TransformKind,
    };
    use crate::Triangle;

    fn quad_mesh(name: &str) -> RawMesh {
        RawMesh {
            name: name.into(),
            attributes: vec![AttributeDescriptor::float("position", 0, 3, 0)],
            slots: vec![BufferSlot::from_f32_rows(&[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
            ])],
            primitive_groups: vec![PrimitiveGroup::indexed(
                Topology::Triangles,
                IndexBuffer::from_u16(&[0, 1, 2, 1, 2, 3]),
            )],
            transforms: vec![TransformRecord::new(
                "quad_xform",
                TransformKind::Transform,
                TransformRecord::IDENTITY,
            )],
        }
    }

    fn container(meshes: Vec<RawMesh>) -> Container {
        Container { meshes }
    }

    #[test]
    fn decodes_single_quad() {
        let decoded = decode_scene(&container(vec![quad_mesh("quad")])).unwrap();
        assert!(!decoded.is_lossy());

        let scene = decoded.scene;
        assert_eq!(scene.root.transform, Mat4::IDENTITY);
        assert_eq!(scene.meshes.len(), 1);

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "quad");
        assert_eq!(mesh.primitive, PrimitiveKind::Triangle);
        assert_eq!(mesh.triangles, vec![Triangle([0, 1, 2]), Triangle([1, 2, 3])]);
        assert_eq!(mesh.normals.len(), 4);
        assert!(mesh.normals.iter().all(|n| *n == Vec3::ZERO));

        assert_eq!(scene.root.children.len(), 1);
        let node = &scene.root.children[0];
        assert_eq!(node.name, "quad_xform");
        assert_eq!(node.mesh, 0);
        assert_eq!(node.transform, Mat4::IDENTITY);
    }

    #[test]
    fn mesh_without_transforms_gets_identity_node() {
        let mut raw = quad_mesh("quad");
        raw.transforms.clear();
        let scene = decode_scene(&container(vec![raw])).unwrap().scene;

        assert_eq!(scene.root.children.len(), 1);
        assert_eq!(scene.root.children[0].transform, Mat4::IDENTITY);
        assert_eq!(scene.root.children[0].mesh, 0);
        assert_eq!(scene.root.children[0].name, "quad");
    }

    #[test]
    fn one_node_per_transform_record() {
        let mut raw = quad_mesh("quad");
        raw.transforms.push(TransformRecord::new(
            "second",
            TransformKind::TransformSimple,
            TransformRecord::IDENTITY,
        ));
        let scene = decode_scene(&container(vec![raw])).unwrap().scene;

        let names: Vec<_> = scene.root.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["quad_xform", "second"]);
        assert!(scene.root.children.iter().all(|n| n.mesh == 0));
    }

    #[test]
    fn transform_is_read_row_major() {
        let mut raw = quad_mesh("quad");
        raw.transforms[0].absolute = [
            1.0, 0.0, 0.0, 5.0, //
            0.0, 1.0, 0.0, 6.0, //
            0.0, 0.0, 1.0, 7.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let scene = decode_scene(&container(vec![raw])).unwrap().scene;
        let transform = scene.root.children[0].transform;
        assert_eq!(transform.w_axis, Vec4::new(5.0, 6.0, 7.0, 1.0));
        assert_eq!(
            transform.transform_point3(Vec3::ZERO),
            Vec3::new(5.0, 6.0, 7.0)
        );
    }

    #[test]
    fn mesh_with_only_unsupported_groups_is_dropped() {
        let mut raw = quad_mesh("lines");
        raw.primitive_groups = vec![PrimitiveGroup::sequential(Topology::QuadStrip, 0, 4)];
        let decoded = decode_scene(&container(vec![raw])).unwrap();

        assert!(decoded.scene.meshes.is_empty());
        assert!(decoded.scene.root.children.is_empty());
        assert_eq!(
            decoded.degradations,
            vec![
                Degradation::UnsupportedTopology {
                    mesh: 0,
                    group: 0,
                    topology: Topology::QuadStrip,
                },
                Degradation::EmptyMeshDropped {
                    mesh: 0,
                    name: "lines".into(),
                },
            ]
        );
    }

    #[test]
    fn dropped_mesh_does_not_shift_node_references() {
        let mut empty = quad_mesh("empty");
        empty.primitive_groups.clear();
        let meshes = vec![quad_mesh("a"), empty, quad_mesh("b")];
        let scene = decode_scene(&container(meshes)).unwrap().scene;

        assert_eq!(scene.meshes.len(), 2);
        assert_eq!(scene.meshes[1].name, "b");
        let references: Vec<_> = scene.root.children.iter().map(|n| n.mesh).collect();
        assert_eq!(references, [0, 1]);
    }

    #[test]
    fn dropped_mesh_ignores_its_transform_kinds() {
        let mut empty = quad_mesh("empty");
        empty.primitive_groups.clear();
        empty.transforms[0].kind = TransformKind::Bone;
        assert!(decode_scene(&container(vec![empty])).is_ok());
    }

    #[test]
    fn bone_transform_rejects_container() {
        let mut raw = quad_mesh("skinned");
        raw.transforms.push(TransformRecord::new(
            "bone",
            TransformKind::Bone,
            TransformRecord::IDENTITY,
        ));
        let err = decode_scene(&container(vec![quad_mesh("ok"), raw])).unwrap_err();

        assert_eq!(err.mesh_index, 1);
        assert_eq!(err.mesh_name, "skinned");
        assert_eq!(
            err.kind(),
            &MeshError::UnsupportedTransformKind {
                transform: 1,
                kind: TransformKind::Bone,
            }
        );
    }

    #[test]
    fn missing_position_rejects_container() {
        let mut raw = quad_mesh("quad");
        raw.attributes[0].name = "color".into();
        let err = decode_scene(&container(vec![raw])).unwrap_err();
        assert_eq!(err.kind(), &MeshError::MissingPositionAttribute);
    }

    #[test]
    fn corrupted_index_rejects_container() {
        let mut raw = quad_mesh("quad");
        raw.primitive_groups[0] = PrimitiveGroup::indexed(
            Topology::Triangles,
            IndexBuffer::from_u16(&[0, 1, 2, 1, 2, 4]),
        );
        let err = decode_scene(&container(vec![raw])).unwrap_err();
        assert!(matches!(
            err.kind(),
            MeshError::IndexOutOfRange {
                index: 4,
                vertex_count: 4,
                ..
            }
        ));
    }

    #[test]
    fn normals_are_read_when_present() {
        let mut raw = quad_mesh("lit");
        raw.attributes.push(AttributeDescriptor::float("normal", 1, 3, 0));
        raw.slots.push(BufferSlot::from_f32_rows(&[[0.0f32, 0.0, 1.0]; 4]));
        let scene = decode_scene(&container(vec![raw])).unwrap().scene;
        assert!(scene.meshes[0].normals.iter().all(|n| *n == Vec3::Z));
    }

    #[test]
    fn normal_count_must_match_positions() {
        let mut raw = quad_mesh("lit");
        raw.attributes.push(AttributeDescriptor::float("normal", 1, 3, 0));
        raw.slots.push(BufferSlot::from_f32_rows(&[[0.0f32, 0.0, 1.0]; 3]));
        let err = decode_scene(&container(vec![raw])).unwrap_err();
        assert_eq!(
            err.kind(),
            &MeshError::NormalCountMismatch {
                positions: 4,
                normals: 3,
            }
        );
    }

    #[test]
    fn decoding_is_repeatable() {
        let mut strip = quad_mesh("strip");
        strip.primitive_groups = vec![PrimitiveGroup::sequential(Topology::TriangleStrip, 0, 4)];
        let input = container(vec![quad_mesh("quad"), strip]);
        assert_eq!(decode_scene(&input).unwrap(), decode_scene(&input).unwrap());
    }
}
