pub mod geometry;
pub mod material;

use std::sync::Arc;

use glam::Vec2;

pub use geometry::{BoxGeometry, WallVertex};
pub use material::{Material, ShaderSource, UniformValue, Uniforms};

use crate::scene::Transform;

/// Visual half of a brick: its own geometry, the wall's shared material and a
/// local transform relative to the wall node.
#[derive(Clone, Debug)]
pub struct TileMesh {
    pub geometry: BoxGeometry,
    pub material: Arc<Material>,
    pub transform: Transform,
}

impl TileMesh {
    /// Box of `width × height × depth` whose UVs sample the atlas cell
    /// described by `uv_scale` / `uv_offset`.
    pub fn build(
        width: f32,
        height: f32,
        depth: f32,
        uv_scale: Vec2,
        uv_offset: Vec2,
        material: &Arc<Material>,
    ) -> Self {
        let mut geometry = BoxGeometry::new(width, height, depth);
        geometry.remap_uvs(uv_scale, uv_offset);
        Self {
            geometry,
            material: Arc::clone(material),
            transform: Transform::IDENTITY,
        }
    }
}
