use glam::{Mat4, Vec3};

/// Camera uniform uploaded to the GPU: the combined view-projection matrix,
/// column-major to match WGSL `mat4x4<f32>`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_matrix(m: Mat4) -> Self {
        Self { view_proj: m.to_cols_array_2d() }
    }
}

/// Perspective camera looking at a target point.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    /// Camera `distance` units in front of the wall centre, looking back at it.
    pub fn facing_wall(center: Vec3, distance: f32) -> Self {
        Self {
            eye: center + Vec3::Z * distance,
            target: center,
            up: Vec3::Y,
            fov_y: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    /// View-projection for a viewport of `width × height` pixels.
    ///
    /// Returns the identity when either dimension is zero (minimised window).
    pub fn build_view_proj(&self, width: f32, height: f32) -> CameraUniform {
        if width <= 0.0 || height <= 0.0 {
            return CameraUniform::from_matrix(Mat4::IDENTITY);
        }
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fov_y, width / height, self.z_near, self.z_far);
        CameraUniform::from_matrix(proj * view)
    }
}
