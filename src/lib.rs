pub mod assets;
pub mod camera;
pub mod config;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod wall;

pub use error::WallError;

/// Built-in brick shader (WGSL), used by `ShaderSource::default()`.
pub const WALL_SHADER: &str = include_str!("renderer/shaders/wall.wgsl");
