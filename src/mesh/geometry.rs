use glam::{Vec2, Vec3};

/// One vertex of a brick mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WallVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed box centred on the origin: 6 faces × 4 vertices, 36 indices.
///
/// Each face carries its own unit-square UVs, `(0,1)` at the top-left corner
/// seen from outside, and is wound counter-clockwise when viewed from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGeometry {
    pub vertices: Vec<WallVertex>,
    pub indices: Vec<u16>,
}

/// (normal, u axis, v axis) per face; `u × v == normal` for every entry.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

impl BoxGeometry {
    pub const VERTEX_COUNT: usize = 24;
    pub const INDEX_COUNT: usize = 36;

    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) / 2.0;
        let mut vertices = Vec::with_capacity(Self::VERTEX_COUNT);
        let mut indices = Vec::with_capacity(Self::INDEX_COUNT);

        for (normal, u_axis, v_axis) in FACES {
            let base = vertices.len() as u16;
            let centre = normal * normal.abs().dot(half);
            let du = u_axis * u_axis.abs().dot(half);
            let dv = v_axis * v_axis.abs().dot(half);

            // a(0,0) top-left, b(0,1) bottom-left, c(1,1) bottom-right, d(1,0) top-right
            for iy in 0..2 {
                for ix in 0..2 {
                    let sx = ix as f32 * 2.0 - 1.0;
                    let sy = 1.0 - iy as f32 * 2.0;
                    vertices.push(WallVertex {
                        position: (centre + du * sx + dv * sy).to_array(),
                        normal: normal.to_array(),
                        uv: [ix as f32, 1.0 - iy as f32],
                    });
                }
            }

            let a = base;
            let d = base + 1;
            let b = base + 2;
            let c = base + 3;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        Self { vertices, indices }
    }

    /// Scale every UV by `scale`, then translate it by `offset`.
    pub fn remap_uvs(&mut self, scale: Vec2, offset: Vec2) {
        for v in &mut self.vertices {
            let uv = Vec2::from_array(v.uv) * scale + offset;
            v.uv = uv.to_array();
        }
    }

    /// Smallest and largest UV over all vertices.
    pub fn uv_bounds(&self) -> (Vec2, Vec2) {
        self.vertices.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| {
                let uv = Vec2::from_array(v.uv);
                (lo.min(uv), hi.max(uv))
            },
        )
    }

    /// Axis-aligned extent of the positions.
    pub fn extent(&self) -> Vec3 {
        let (lo, hi) = self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| {
                let p = Vec3::from_array(v.position);
                (lo.min(p), hi.max(p))
            },
        );
        hi - lo
    }
}
