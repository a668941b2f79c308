use std::sync::Arc;

use rapier3d::prelude::*;

use crate::config::BodyConfig;
use crate::grid::{TileCoord, WallLayout};
use crate::mesh::{Material, TileMesh};
use crate::physics::{to_vector, BodyHandle};

/// One brick: its grid cell, its mesh and the handle of its body.  The
/// mesh/body pairing never changes after construction.
#[derive(Clone, Debug)]
pub struct Tile {
    coord: TileCoord,
    mesh: TileMesh,
    body: BodyHandle,
}

impl Tile {
    pub(crate) fn new(coord: TileCoord, mesh: TileMesh, body: BodyHandle) -> Self {
        Self { coord, mesh, body }
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn mesh(&self) -> &TileMesh {
        &self.mesh
    }

    pub(crate) fn mesh_mut(&mut self) -> &mut TileMesh {
        &mut self.mesh
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }
}

/// Mesh for brick `coord`: one tile wide and high, full wall depth, UVs
/// squeezed into the brick's atlas cell.
pub fn build_tile_mesh(layout: &WallLayout, coord: TileCoord, material: &Arc<Material>) -> TileMesh {
    let tile = layout.tile_size();
    TileMesh::build(
        tile.x,
        tile.y,
        layout.size().depth,
        layout.uv_scale(),
        layout.uv_offset(coord),
        material,
    )
}

/// Dormant dynamic body for brick `coord`, placed at its grid position, and
/// the box collider that gives it its mass.  The body's `user_data` carries
/// the packed coordinate, see [`TileCoord::to_user_data`].
pub fn build_tile_body(layout: &WallLayout, coord: TileCoord, config: &BodyConfig) -> (RigidBody, Collider) {
    let tile = layout.tile_size();
    let half_depth = config.collider_depth.half_extent(layout.size().depth);

    let mut body = RigidBodyBuilder::dynamic()
        .translation(to_vector(layout.tile_position(coord)))
        .user_data(coord.to_user_data())
        .can_sleep(true)
        .sleeping(true)
        .build();
    let activation = body.activation_mut();
    activation.normalized_linear_threshold = config.sleep_speed_limit;
    activation.angular_threshold = config.sleep_speed_limit;
    activation.time_until_sleep = config.sleep_time_limit;
    // `sleeping(true)` only marks the body; keep the countdown consistent
    // with the new limit.
    activation.time_since_can_sleep = config.sleep_time_limit;

    let collider = ColliderBuilder::cuboid(tile.x / 2.0, tile.y / 2.0, half_depth)
        .mass(config.mass)
        .build();
    (body, collider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColliderDepth, WallConfig};
    use crate::mesh::{ShaderSource, Uniforms};
    use glam::Vec3;

    fn reference_layout() -> WallLayout {
        WallLayout::new(&WallConfig::default()).unwrap()
    }

    fn half_extents(collider: &Collider) -> Vector<Real> {
        collider.shape().as_cuboid().unwrap().half_extents
    }

    #[test]
    fn body_starts_asleep_with_configured_limits() {
        let layout = reference_layout();
        let (body, collider) = build_tile_body(&layout, TileCoord::new(3, 5), &BodyConfig::default());
        assert!(body.is_sleeping());
        assert!(body.is_dynamic());
        assert!((collider.mass() - 1.0).abs() < 1e-5);

        let activation = body.activation();
        assert_eq!(activation.normalized_linear_threshold, 0.1);
        assert_eq!(activation.angular_threshold, 0.1);
        assert_eq!(activation.time_until_sleep, 1.0);

        assert_eq!(TileCoord::from_user_data(body.user_data), Some(TileCoord::new(3, 5)));
        assert!(body.rotation().angle() < 1e-7);
    }

    #[test]
    fn collider_depth_defaults_to_full_wall_depth() {
        let layout = reference_layout();
        let (_, collider) = build_tile_body(&layout, TileCoord::new(0, 0), &BodyConfig::default());
        let e = half_extents(&collider);
        assert!((e.x - 0.125).abs() < 1e-6);
        assert!((e.y - 0.125).abs() < 1e-6);
        assert!((e.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn half_collider_depth_matches_mesh() {
        let layout = reference_layout();
        let cfg = BodyConfig { collider_depth: ColliderDepth::Half, ..BodyConfig::default() };
        let (_, collider) = build_tile_body(&layout, TileCoord::new(0, 0), &cfg);
        assert!((half_extents(&collider).z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn mesh_samples_its_atlas_cell() {
        let layout = reference_layout();
        let material = Arc::new(Material::new(ShaderSource::default(), Uniforms::new()));
        let coord = TileCoord::new(27, 15);
        let mesh = build_tile_mesh(&layout, coord, &material);
        let (lo, hi) = mesh.geometry.uv_bounds();
        let rect = layout.uv_rect(coord);
        assert!(lo.abs_diff_eq(rect.min, 1e-6));
        assert!(hi.abs_diff_eq(rect.max, 1e-6));
        assert!(mesh.geometry.extent().abs_diff_eq(Vec3::new(0.25, 0.25, 0.2), 1e-6));
    }
}
