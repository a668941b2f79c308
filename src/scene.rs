use glam::{Mat4, Quat, Vec3};

/// Local transform of a visual node relative to its parent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Column-major model matrix (scale, then rotate, then translate).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Compose `self` (parent) with `child`, giving the child's transform in
    /// the parent's parent space.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale * child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_model_matrix() {
        assert_eq!(Transform::IDENTITY.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_lands_in_last_column() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let m = t.model_matrix();
        assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn composing_with_identity_parent_is_noop() {
        let child = Transform {
            position: Vec3::new(0.5, -1.0, 2.0),
            rotation: Quat::from_rotation_z(0.3),
            scale: Vec3::ONE,
        };
        assert_eq!(Transform::IDENTITY.mul_transform(&child), child);
    }

    #[test]
    fn composed_matches_matrix_product() {
        let parent = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_rotation_y(1.0),
            scale: Vec3::ONE,
        };
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 2.0));
        let composed = parent.mul_transform(&child).model_matrix();
        let product = parent.model_matrix() * child.model_matrix();
        assert!(composed.abs_diff_eq(product, 1e-5));
    }
}
