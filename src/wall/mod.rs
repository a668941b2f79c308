// =============================================================================
// WALL: grid of brick (mesh, body) pairs
//
// Construction partitions the footprint, builds one mesh and one sleeping
// body per cell and registers the bodies with the physics world.  After
// that the only mutation is `update`, which copies body poses onto meshes.
// =============================================================================

pub mod sync;
pub mod tile;

use std::sync::Arc;

pub use sync::to_visual_transform;
pub use tile::{build_tile_body, build_tile_mesh, Tile};

use crate::assets::AssetProvider;
use crate::config::WallConfig;
use crate::error::WallError;
use crate::grid::{TileCoord, WallLayout};
use crate::mesh::{Material, ShaderSource, UniformValue, Uniforms};
use crate::physics::PhysicsWorld;
use crate::scene::Transform;

pub struct Wall {
    /// The wall node; brick transforms are local to it.
    pub transform: Transform,
    layout: WallLayout,
    material: Arc<Material>,
    tiles: Vec<Tile>,
}

impl Wall {
    /// Build a wall with the built-in brick shader.
    ///
    /// The atlas texture named by `config.texture` is fetched from `assets`
    /// and merged into `parent_uniforms` as `tex`.  Configuration and asset
    /// errors are reported before any body is added to `world`.
    pub fn new<W, A>(
        config: &WallConfig,
        world: &mut W,
        assets: &A,
        parent_uniforms: &Uniforms,
    ) -> Result<Self, WallError>
    where
        W: PhysicsWorld + ?Sized,
        A: AssetProvider + ?Sized,
    {
        Self::with_shader(config, ShaderSource::default(), world, assets, parent_uniforms)
    }

    pub fn with_shader<W, A>(
        config: &WallConfig,
        shader: ShaderSource,
        world: &mut W,
        assets: &A,
        parent_uniforms: &Uniforms,
    ) -> Result<Self, WallError>
    where
        W: PhysicsWorld + ?Sized,
        A: AssetProvider + ?Sized,
    {
        let layout = WallLayout::new(config)?;
        let texture = assets.texture(&config.texture)?;

        let uniforms = Uniforms::merge(
            parent_uniforms,
            Uniforms::new().with(Material::TEXTURE_SLOT, UniformValue::Texture(texture)),
        );
        let material = Arc::new(Material::new(shader, uniforms));

        let mut tiles = Vec::with_capacity(layout.tile_count());
        for coord in layout.coords() {
            let mut mesh = build_tile_mesh(&layout, coord, &material);
            // Start where the body starts so the wall looks right before the first update.
            mesh.transform = Transform::from_position(layout.tile_position(coord));
            let (body, collider) = build_tile_body(&layout, coord, &config.body);
            let body = world.add_body(body, collider);
            tiles.push(Tile::new(coord, mesh, body));
        }

        log::info!(
            "assembled wall: {}x{} bricks ({} bodies), tile {:.3}x{:.3}",
            layout.cols(),
            layout.rows(),
            tiles.len(),
            layout.tile_size().x,
            layout.tile_size().y
        );

        Ok(Self {
            transform: Transform::IDENTITY,
            layout,
            material,
            tiles,
        })
    }

    /// Copy every brick body's current pose onto its mesh.
    ///
    /// Call once per frame after the world has stepped.  `_dt` is accepted
    /// for frame-loop symmetry; the copy does not depend on it.
    pub fn update<W: PhysicsWorld + ?Sized>(&mut self, world: &W, _dt: f32) {
        sync::sync_tiles(&mut self.tiles, world);
    }

    pub fn layout(&self) -> &WallLayout {
        &self.layout
    }

    /// The single material every brick renders with.
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Bricks in construction order (columns outermost).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(self.layout.index_of(coord)?)
    }

    /// Look a brick up by its body name, `"{i}-{j}"`.
    pub fn tile_by_name(&self, name: &str) -> Option<&Tile> {
        self.tile(TileCoord::parse(name)?)
    }

    /// Transform of `tile` in the wall's parent space.
    pub fn world_transform(&self, tile: &Tile) -> Transform {
        self.transform.mul_transform(&tile.mesh().transform)
    }
}
