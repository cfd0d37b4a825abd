//! Attribute resolution.

use crate::container::{AttributeDescriptor, BufferSlot};
use crate::error::{MeshError, MeshResult};

/// An attribute together with the slot that backs it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAttribute<'a> {
    pub descriptor: &'a AttributeDescriptor,
    pub slot_index: usize,
    pub slot: &'a BufferSlot,
}

/// The geometry channels of one mesh.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAttributes<'a> {
    pub position: ResolvedAttribute<'a>,
    pub normal: Option<ResolvedAttribute<'a>>,
}

/// Locate the position and normal attributes of a mesh.
///
/// Attributes are scanned in declaration order and matched by a
/// case-sensitive substring of their name. The first match wins; later
/// attributes with a similar name are ignored. A position attribute is
/// required, a normal attribute is not.
pub fn resolve_attributes<'a>(
    attributes: &'a [AttributeDescriptor],
    slots: &'a [BufferSlot],
) -> MeshResult<ResolvedAttributes<'a>> {
    let position = find_named(attributes, "position").ok_or(MeshError::MissingPositionAttribute)?;
    let normal = find_named(attributes, "normal");

    Ok(ResolvedAttributes {
        position: resolve_slot(position, slots)?,
        normal: normal.map(|n| resolve_slot(n, slots)).transpose()?,
    })
}

fn find_named<'a>(
    attributes: &'a [AttributeDescriptor],
    needle: &str,
) -> Option<&'a AttributeDescriptor> {
    attributes.iter().find(|a| a.name.contains(needle))
}

fn resolve_slot<'a>(
    descriptor: &'a AttributeDescriptor,
    slots: &'a [BufferSlot],
) -> MeshResult<ResolvedAttribute<'a>> {
    let slot = slots.get(descriptor.slot).ok_or_else(|| MeshError::MissingSlot {
        attribute: descriptor.name.clone(),
        slot: descriptor.slot,
        slot_count: slots.len(),
    })?;
    Ok(ResolvedAttribute {
        descriptor,
        slot_index: descriptor.slot,
        slot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(count: usize) -> Vec<BufferSlot> {
        (0..count)
            .map(|_| BufferSlot::from_f32_rows(&[[0.0f32; 3]]))
            .collect()
    }

    #[test]
    fn finds_position_and_normal_by_substring() {
        let attributes = vec![
            AttributeDescriptor::float("texcoord0", 0, 2, 0),
            AttributeDescriptor::float("normal", 1, 3, 0),
            AttributeDescriptor::float("vtx_position", 0, 3, 8),
        ];
        let slots = slots(2);

        let resolved = resolve_attributes(&attributes, &slots).unwrap();
        assert_eq!(resolved.position.descriptor.name, "vtx_position");
        assert_eq!(resolved.position.slot_index, 0);
        let normal = resolved.normal.unwrap();
        assert_eq!(normal.descriptor.name, "normal");
        assert_eq!(normal.slot_index, 1);
    }

    #[test]
    fn first_match_wins() {
        let attributes = vec![
            AttributeDescriptor::float("position", 0, 3, 0),
            AttributeDescriptor::float("position_morph", 1, 3, 0),
            AttributeDescriptor::float("normal", 0, 3, 12),
            AttributeDescriptor::float("normal_smooth", 1, 3, 0),
        ];
        let slots = slots(2);

        let resolved = resolve_attributes(&attributes, &slots).unwrap();
        assert_eq!(resolved.position.descriptor.name, "position");
        assert_eq!(resolved.normal.unwrap().descriptor.offset, 12);
    }

    #[test]
    fn normal_is_optional() {
        let attributes = vec![AttributeDescriptor::float("position", 0, 3, 0)];
        let slots = slots(1);
        let resolved = resolve_attributes(&attributes, &slots).unwrap();
        assert!(resolved.normal.is_none());
    }

    #[test]
    fn missing_position_is_an_error() {
        let attributes = vec![
            AttributeDescriptor::float("Position", 0, 3, 0),
            AttributeDescriptor::float("normal", 0, 3, 0),
        ];
        assert_eq!(
            resolve_attributes(&attributes, &slots(1)).unwrap_err(),
            MeshError::MissingPositionAttribute
        );
    }

    #[test]
    fn dangling_slot_reference_is_an_error() {
        let attributes = vec![AttributeDescriptor::float("position", 3, 3, 0)];
        assert_eq!(
            resolve_attributes(&attributes, &slots(1)).unwrap_err(),
            MeshError::MissingSlot {
                attribute: "position".into(),
                slot: 3,
                slot_count: 1,
            }
        );
    }
}
