// =============================================================================
// GRID.RS: Wall partitioning
//
// Splits the wall footprint into cols × rows bricks and answers, per brick:
// - where it sits in the wall's local space
// - which sub-rectangle of the shared atlas texture it samples
// =============================================================================

use glam::{Vec2, Vec3};

use crate::config::{WallConfig, WallSize};
use crate::error::WallError;

/// Upper bound on `cols * rows` for a single wall.
pub const MAX_TILES: u32 = 1 << 20;

/// Integer grid coordinates of one brick.  `i` runs along the width, `j`
/// along the height.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub i: u32,
    pub j: u32,
}

impl TileCoord {
    pub fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }

    /// Debug name of the brick, `"{i}-{j}"`.
    pub fn name(self) -> String {
        format!("{}-{}", self.i, self.j)
    }

    /// Inverse of [`TileCoord::name`].
    pub fn parse(name: &str) -> Option<Self> {
        let (i, j) = name.split_once('-')?;
        Some(Self { i: i.parse().ok()?, j: j.parse().ok()? })
    }

    /// Pack into a physics body's `user_data`: `i` in the high 32 bits of the
    /// low word, `j` below it.
    pub fn to_user_data(self) -> u128 {
        ((self.i as u128) << 32) | self.j as u128
    }

    /// Inverse of [`TileCoord::to_user_data`].  `None` if bits above the
    /// low 64 are set.
    pub fn from_user_data(data: u128) -> Option<Self> {
        if data >> 64 != 0 {
            return None;
        }
        Some(Self { i: (data >> 32) as u32, j: data as u32 })
    }
}

/// Axis-aligned rectangle in UV space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl UvRect {
    pub fn contains(&self, uv: Vec2, eps: f32) -> bool {
        uv.x >= self.min.x - eps
            && uv.x <= self.max.x + eps
            && uv.y >= self.min.y - eps
            && uv.y <= self.max.y + eps
    }

    pub fn area(&self) -> f32 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y)
    }
}

/// Grid geometry derived once from a validated [`WallConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallLayout {
    size: WallSize,
    vertical_offset: f32,
    cols: u32,
    rows: u32,
    tile_size: Vec2,
}

impl WallLayout {
    /// `resolution = round(size.xy * density)`, `tile_size = size.xy / resolution`.
    ///
    /// Fails with [`WallError::InvalidConfiguration`] when the config is
    /// invalid or the brick count is not in `1..=MAX_TILES`.
    pub fn new(config: &WallConfig) -> Result<Self, WallError> {
        config.validate()?;

        let cols = resolution_along("width", config.size.width, config.density)?;
        let rows = resolution_along("height", config.size.height, config.density)?;
        match cols.checked_mul(rows) {
            Some(n) if n <= MAX_TILES => {}
            _ => {
                return Err(WallError::InvalidConfiguration(format!(
                    "{cols}x{rows} bricks exceeds the limit of {MAX_TILES}"
                )));
            }
        }
        let tile_size = Vec2::new(
            config.size.width / cols as f32,
            config.size.height / rows as f32,
        );

        log::debug!(
            "wall layout: {cols}x{rows} bricks of {:.4}x{:.4}",
            tile_size.x,
            tile_size.y
        );

        Ok(Self {
            size: config.size,
            vertical_offset: config.vertical_offset,
            cols,
            rows,
            tile_size,
        })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn size(&self) -> WallSize {
        self.size
    }

    /// Width and height of a single brick.
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn tile_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Every brick coordinate, columns outermost: (0,0), (0,1), ... (0,rows-1), (1,0), ...
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.cols).flat_map(move |i| (0..self.rows).map(move |j| TileCoord { i, j }))
    }

    /// Index of `coord` in [`WallLayout::coords`] order, `None` when outside the grid.
    pub fn index_of(&self, coord: TileCoord) -> Option<usize> {
        if coord.i >= self.cols || coord.j >= self.rows {
            return None;
        }
        Some(coord.i as usize * self.rows as usize + coord.j as usize)
    }

    /// Initial position of the brick in the wall's local space.
    ///
    /// x and y are measured from the wall centre; z is pushed forward by the
    /// full depth for every brick.
    pub fn tile_position(&self, coord: TileCoord) -> Vec3 {
        Vec3::new(
            coord.i as f32 * self.tile_size.x - self.size.width / 2.0,
            coord.j as f32 * self.tile_size.y - self.size.height / 2.0 + self.vertical_offset,
            self.size.depth,
        )
    }

    /// Scale applied to unit-square UVs: `(1/cols, 1/rows)`.
    pub fn uv_scale(&self) -> Vec2 {
        Vec2::new(1.0 / self.cols as f32, 1.0 / self.rows as f32)
    }

    /// Translation applied after [`WallLayout::uv_scale`]: `(i/cols, j/rows)`.
    pub fn uv_offset(&self, coord: TileCoord) -> Vec2 {
        self.uv_scale() * Vec2::new(coord.i as f32, coord.j as f32)
    }

    /// Atlas sub-rectangle sampled by the brick.
    pub fn uv_rect(&self, coord: TileCoord) -> UvRect {
        let min = self.uv_offset(coord);
        UvRect { min, max: min + self.uv_scale() }
    }
}

fn resolution_along(axis: &str, extent: f32, density: f32) -> Result<u32, WallError> {
    let res = (extent * density).round();
    if !res.is_finite() || res < 1.0 || res > MAX_TILES as f32 {
        return Err(WallError::InvalidConfiguration(format!(
            "{axis} {extent} at density {density} gives {res} bricks"
        )));
    }
    Ok(res as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f32, height: f32, density: f32) -> WallLayout {
        let mut cfg = WallConfig::default();
        cfg.size.width = width;
        cfg.size.height = height;
        cfg.density = density;
        WallLayout::new(&cfg).unwrap()
    }

    #[test]
    fn reference_wall_resolution() {
        let l = layout(7.0, 4.0, 4.0);
        assert_eq!((l.cols(), l.rows()), (28, 16));
        assert_eq!(l.tile_size(), Vec2::new(0.25, 0.25));
        assert_eq!(l.tile_count(), 448);
    }

    #[test]
    fn resolution_rounds_to_nearest() {
        let l = layout(1.3, 1.0, 2.0);
        assert_eq!(l.cols(), 3);
        assert!((l.tile_size().x * 3.0 - 1.3).abs() < 1e-5);
    }

    #[test]
    fn coords_are_column_major() {
        let l = layout(1.0, 1.0, 2.0);
        let coords: Vec<_> = l.coords().map(|c| (c.i, c.j)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        for (n, c) in l.coords().enumerate() {
            assert_eq!(l.index_of(c), Some(n));
        }
        assert_eq!(l.index_of(TileCoord::new(2, 0)), None);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let mut cfg = WallConfig::default();
        cfg.density = 0.1; // 4 * 0.1 = 0.4 → 0 rows
        assert!(matches!(WallLayout::new(&cfg), Err(WallError::InvalidConfiguration(_))));
    }

    #[test]
    fn name_round_trips() {
        let c = TileCoord::new(12, 3);
        assert_eq!(c.name(), "12-3");
        assert_eq!(TileCoord::parse("12-3"), Some(c));
        assert_eq!(TileCoord::parse("12"), None);
        assert_eq!(TileCoord::parse("a-b"), None);
    }

    #[test]
    fn user_data_round_trips() {
        let c = TileCoord::new(27, 15);
        assert_eq!(TileCoord::from_user_data(c.to_user_data()), Some(c));
        assert_eq!(TileCoord::from_user_data(1 << 64), None);
    }

    #[test]
    fn oversized_wall_is_rejected() {
        let mut cfg = WallConfig::default();
        cfg.density = 1.0e6; // 7e6 x 4e6 bricks
        assert!(matches!(WallLayout::new(&cfg), Err(WallError::InvalidConfiguration(_))));

        // Each axis fits on its own but the product does not.
        let mut cfg = WallConfig::default();
        cfg.size.width = 2048.0;
        cfg.size.height = 1024.0;
        cfg.density = 1.0;
        assert!(matches!(WallLayout::new(&cfg), Err(WallError::InvalidConfiguration(_))));

        cfg.size.height = 512.0;
        assert_eq!(WallLayout::new(&cfg).unwrap().tile_count(), MAX_TILES as usize);
    }
}
