//! Headless brick wall demo.
//!
//! Builds a wall, optionally knocks one brick out of it, steps the reference
//! physics world for a number of frames and logs what moved.
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --hit 14,8 --frames 240
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec3;

use brickwall::assets::{Texture, TextureStore};
use brickwall::config::WallConfig;
use brickwall::grid::TileCoord;
use brickwall::mesh::{UniformValue, Uniforms};
use brickwall::physics::{PhysicsWorld, RapierWorld};
use brickwall::wall::Wall;
use brickwall::WallError;

/// Brick wall simulation
#[derive(Parser)]
#[command(version, about = "Simulates a wall of sleeping rigid bricks and syncs them to meshes.")]
struct Cli {
    /// Wall configuration (JSON).  Defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Folder scanned recursively for PNG textures.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Brick to knock out, as `i,j`.
    #[arg(long, value_name = "I,J", value_parser = parse_coord)]
    hit: Option<TileCoord>,

    /// Impulse magnitude applied to the hit brick, pushing it away from the viewer.
    #[arg(long, default_value_t = 4.0)]
    impulse: f32,

    /// Substitute a checkerboard when the configured texture is not found
    /// instead of failing.
    #[arg(long)]
    placeholder_texture: bool,
}

fn parse_coord(s: &str) -> Result<TileCoord, String> {
    let (i, j) = s
        .split_once(',')
        .ok_or_else(|| format!("expected I,J but got '{s}'"))?;
    let i = i.trim().parse().map_err(|e| format!("bad column '{i}': {e}"))?;
    let j = j.trim().parse().map_err(|e| format!("bad row '{j}': {e}"))?;
    Ok(TileCoord::new(i, j))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), WallError> {
    let config = match &cli.config {
        Some(path) => WallConfig::load(path)?,
        None => WallConfig::default(),
    };

    let mut store = TextureStore::new();
    if let Some(dir) = &cli.assets {
        store.load_folder(dir)?;
    }
    if cli.placeholder_texture && !store.contains(&config.texture) {
        log::warn!("texture '{}' not found, using a checkerboard", config.texture);
        store.insert(Texture::checker(
            config.texture.clone(),
            256,
            16,
            [0xD8, 0x6A, 0x3C, 0xFF],
            [0x8A, 0x3B, 0x22, 0xFF],
        ));
    }

    let parent_uniforms = Uniforms::new().with("time", UniformValue::Float(0.0));

    let mut world = RapierWorld::new();
    let mut wall = Wall::new(&config, &mut world, &store, &parent_uniforms)?;

    // Floor just under the bottom row of bricks.
    let layout = *wall.layout();
    world.add_ground(layout.tile_position(TileCoord::new(0, 0)).y - layout.tile_size().y / 2.0);

    if let Some(coord) = cli.hit {
        let tile = wall.tile(coord).ok_or_else(|| {
            WallError::InvalidConfiguration(format!(
                "brick {} is outside the {}x{} wall",
                coord.name(),
                layout.cols(),
                layout.rows()
            ))
        })?;
        let handle = tile.body();
        let centre = world.pose(handle).map(|p| p.position).unwrap_or(Vec3::ZERO);
        world.apply_impulse(handle, Vec3::new(0.0, 0.0, -cli.impulse), centre);
        log::info!("hit brick {} with impulse {}", coord.name(), cli.impulse);
    }

    for frame in 0..cli.frames {
        world.step(cli.dt);
        wall.update(&world, cli.dt);
        if frame % 30 == 0 {
            log::debug!(
                "frame {frame}: {} of {} bricks asleep",
                world.sleeping_count(),
                wall.len()
            );
        }
    }

    let moved = wall
        .tiles()
        .iter()
        .filter(|t| {
            let start = layout.tile_position(t.coord());
            t.mesh().transform.position.distance(start) > 1e-4
        })
        .count();
    log::info!(
        "after {} frames ({:.2}s): {moved} bricks moved, {} asleep",
        cli.frames,
        world.time(),
        world.sleeping_count()
    );

    if let Some(tile) = cli.hit.and_then(|c| wall.tile(c)) {
        let t = tile.mesh().transform;
        log::info!(
            "brick {} now at ({:.3}, {:.3}, {:.3})",
            tile.coord().name(),
            t.position.x,
            t.position.y,
            t.position.z
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_texture_fails_without_placeholder_flag() {
        let cli = Cli::parse_from(["brickwall", "--frames", "1"]);
        assert!(!cli.placeholder_texture);
        assert!(matches!(run(cli), Err(WallError::MissingAsset(name)) if name == "topLogo"));
    }

    #[test]
    fn placeholder_flag_substitutes_a_checkerboard() {
        let cli = Cli::parse_from(["brickwall", "--frames", "2", "--placeholder-texture"]);
        assert!(run(cli).is_ok());
    }
}
