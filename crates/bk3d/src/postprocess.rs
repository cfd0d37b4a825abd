//! Optional fixes applied to a decoded scene.

use bk3d_decode::{SceneGraph, Triangle};
use glam::{Mat4, Vec3};

/// Which post-processing steps to run after decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostProcessSteps {
    pub make_left_handed: bool,
    pub flip_winding_order: bool,
}

impl PostProcessSteps {
    /// Run the enabled steps, handedness first.
    pub fn apply(&self, scene: &mut SceneGraph) {
        if self.make_left_handed {
            make_left_handed(scene);
        }
        if self.flip_winding_order {
            flip_winding_order(scene);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.make_left_handed && !self.flip_winding_order
    }
}

/// Mirror the scene along Z.
///
/// Positions and normals have their Z negated. Node transforms are
/// conjugated with the mirror so they keep placing meshes consistently.
pub fn make_left_handed(scene: &mut SceneGraph) {
    let mirror = Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0));
    let flip = Vec3::new(1.0, 1.0, -1.0);

    for mesh in &mut scene.meshes {
        for position in &mut mesh.positions {
            *position *= flip;
        }
        for normal in &mut mesh.normals {
            *normal *= flip;
        }
    }
    for node in &mut scene.root.children {
        node.transform = mirror * node.transform * mirror;
    }
}

/// Reverse the vertex order of every triangle.
pub fn flip_winding_order(scene: &mut SceneGraph) {
    for mesh in &mut scene.meshes {
        for Triangle(corners) in &mut mesh.triangles {
            corners.reverse();
        }
    }
}
