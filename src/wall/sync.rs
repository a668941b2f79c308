use crate::physics::{PhysicsPose, PhysicsWorld};
use crate::scene::Transform;

use super::tile::Tile;

/// Map a simulated pose onto a visual transform (unit scale).
pub fn to_visual_transform(pose: PhysicsPose) -> Transform {
    Transform {
        position: pose.position,
        rotation: pose.orientation,
        scale: glam::Vec3::ONE,
    }
}

/// Copy every body's pose onto its mesh, in tile order.
///
/// Tiles whose body the world no longer knows keep their last transform.
pub(crate) fn sync_tiles<W: PhysicsWorld + ?Sized>(tiles: &mut [Tile], world: &W) {
    for tile in tiles {
        if let Some(pose) = world.pose(tile.body()) {
            tile.mesh_mut().transform = to_visual_transform(pose);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn conversion_copies_position_and_orientation() {
        let pose = PhysicsPose {
            position: Vec3::new(1.0, -2.0, 0.5),
            orientation: Quat::from_rotation_x(0.7),
        };
        let t = to_visual_transform(pose);
        assert_eq!(t.position, pose.position);
        assert_eq!(t.rotation, pose.orientation);
        assert_eq!(t.scale, Vec3::ONE);
    }
}
