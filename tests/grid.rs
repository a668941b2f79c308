use brickwall::config::WallConfig;
use brickwall::grid::*;
use brickwall::WallError;
use glam::{Vec2, Vec3};

fn layout_for(width: f32, height: f32, depth: f32, density: f32) -> WallLayout {
    let mut cfg = WallConfig::default();
    cfg.size.width = width;
    cfg.size.height = height;
    cfg.size.depth = depth;
    cfg.density = density;
    WallLayout::new(&cfg).unwrap()
}

// ── reference wall ────────────────────────────────────────────────────────────

#[test]
fn reference_wall_first_tile() {
    let l = layout_for(7.0, 4.0, 0.2, 4.0);
    assert_eq!((l.cols(), l.rows()), (28, 16));
    assert_eq!(l.tile_size(), Vec2::new(0.25, 0.25));

    let p = l.tile_position(TileCoord::new(0, 0));
    assert!(p.abs_diff_eq(Vec3::new(-3.5, -0.8, 0.2), 1e-5), "p = {p:?}");

    let uv = l.uv_rect(TileCoord::new(0, 0));
    assert_eq!(uv.min, Vec2::ZERO);
    assert!((uv.max.x - 1.0 / 28.0).abs() < 1e-7);
    assert!((uv.max.y - 1.0 / 16.0).abs() < 1e-7);
}

#[test]
fn positions_step_by_tile_size() {
    let l = layout_for(7.0, 4.0, 0.2, 4.0);
    let a = l.tile_position(TileCoord::new(3, 7));
    let b = l.tile_position(TileCoord::new(4, 8));
    assert!((b - a).abs_diff_eq(Vec3::new(0.25, 0.25, 0.0), 1e-6));
    // z is the same forward offset for every brick.
    assert!(l.coords().all(|c| l.tile_position(c).z == 0.2));
}

// ── tiling invariants ─────────────────────────────────────────────────────────

#[test]
fn tiles_cover_footprint_exactly() {
    for (w, h, density) in [(7.0, 4.0, 4.0), (3.3, 1.7, 3.0), (10.0, 2.5, 1.5), (1.0, 1.0, 1.0)] {
        let l = layout_for(w, h, 0.2, density);
        let t = l.tile_size();
        assert!((t.x * l.cols() as f32 - w).abs() < 1e-4, "width {w} density {density}");
        assert!((t.y * l.rows() as f32 - h).abs() < 1e-4, "height {h} density {density}");
    }
}

#[test]
fn every_coord_is_distinct_and_in_range() {
    let l = layout_for(3.0, 2.0, 0.1, 2.0);
    let coords: Vec<_> = l.coords().collect();
    assert_eq!(coords.len(), l.tile_count());
    let mut sorted = coords.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), coords.len());
    assert!(coords.iter().all(|c| c.i < l.cols() && c.j < l.rows()));
}

#[test]
fn uv_rects_partition_unit_square() {
    let l = layout_for(3.0, 2.0, 0.1, 2.0);
    let rects: Vec<_> = l.coords().map(|c| l.uv_rect(c)).collect();

    let total: f32 = rects.iter().map(UvRect::area).sum();
    assert!((total - 1.0).abs() < 1e-5);

    // Sample every cell centre: it must lie inside exactly one rect.
    for c in l.coords() {
        let centre = Vec2::new(
            (c.i as f32 + 0.5) / l.cols() as f32,
            (c.j as f32 + 0.5) / l.rows() as f32,
        );
        let hits = rects.iter().filter(|r| r.contains(centre, 0.0)).count();
        assert_eq!(hits, 1, "centre {centre:?}");
    }

    // Neighbouring rects share edges.
    let a = l.uv_rect(TileCoord::new(0, 0));
    let b = l.uv_rect(TileCoord::new(1, 0));
    assert!((a.max.x - b.min.x).abs() < 1e-7);
}

// ── rejection ─────────────────────────────────────────────────────────────────

#[test]
fn degenerate_configs_are_rejected() {
    let mut cfg = WallConfig::default();
    cfg.size.width = 0.0;
    assert!(matches!(WallLayout::new(&cfg), Err(WallError::InvalidConfiguration(_))));

    let mut cfg = WallConfig::default();
    cfg.size.height = 0.05; // 0.05 * 4 rounds to 0 rows
    assert!(matches!(WallLayout::new(&cfg), Err(WallError::InvalidConfiguration(_))));

    let mut cfg = WallConfig::default();
    cfg.density = f32::INFINITY;
    assert!(matches!(WallLayout::new(&cfg), Err(WallError::InvalidConfiguration(_))));
}
