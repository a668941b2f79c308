use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::WallError;

// ── Texture ──────────────────────────────────────────────────────────────────

/// CPU-side RGBA8 texture.  Uploaded to the GPU by
/// [`WallGpu`](crate::renderer::WallGpu); shared between bricks via `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub image: RgbaImage,
}

impl Texture {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self { name: name.into(), image }
    }

    pub fn from_png_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, WallError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::new(name, image))
    }

    /// Two-colour checkerboard with `cells × cells` squares.  Handy as a
    /// stand-in atlas when no image files are around.
    pub fn checker(name: impl Into<String>, size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = (size / cells.max(1)).max(1);
        let image = RgbaImage::from_fn(size, size, |x, y| {
            if (x / cell + y / cell) % 2 == 0 { image::Rgba(a) } else { image::Rgba(b) }
        });
        Self::new(name, image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

// ── AssetProvider ────────────────────────────────────────────────────────────

/// Source of named assets handed to a wall at construction.
pub trait AssetProvider {
    /// Look up a texture by name.  Unknown names fail with
    /// [`WallError::MissingAsset`].
    fn texture(&self, name: &str) -> Result<Arc<Texture>, WallError>;
}

// ── TextureStore ─────────────────────────────────────────────────────────────

/// In-memory [`AssetProvider`] keyed by texture name.
#[derive(Default)]
pub struct TextureStore {
    textures: HashMap<String, Arc<Texture>>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `texture` under its own name, replacing any previous entry.
    pub fn insert(&mut self, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(texture.name.clone(), Arc::clone(&texture));
        texture
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Scan `path` recursively for `.png` files and register each one under
    /// its file stem.  Returns how many textures were added.
    ///
    /// Symlinks are followed.  Entries the walk cannot read, unreadable
    /// images and duplicate stems are skipped with a warning; the first file
    /// with a given stem wins.
    pub fn load_folder<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, WallError> {
        let root = path.as_ref();
        if !root.is_dir() {
            return Err(WallError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("asset folder {} does not exist", root.display()),
            )));
        }

        let mut added = 0;
        for entry in walkdir::WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) if entry.file_type().is_file() => entry,
                Ok(_) => continue,
                Err(e) => {
                    let at = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    log::warn!("skipping {at}: {e}");
                    continue;
                }
            };
            let file_path = entry.path();
            if file_path.extension().and_then(|s| s.to_str()) != Some("png") {
                continue;
            }
            let name = match file_path.file_stem().and_then(|s| s.to_str()) {
                Some(n) if !n.is_empty() => n.to_string(),
                _ => continue,
            };

            if self.textures.contains_key(&name) {
                log::warn!("duplicate texture name '{name}' from {}; skipping", file_path.display());
                continue;
            }

            match image::open(file_path) {
                Ok(img) => {
                    self.insert(Texture::new(name, img.to_rgba8()));
                    added += 1;
                }
                Err(e) => log::warn!("failed to load {}: {e}", file_path.display()),
            }
        }

        log::info!("loaded {added} textures from {}", root.display());
        Ok(added)
    }
}

impl AssetProvider for TextureStore {
    fn texture(&self, name: &str) -> Result<Arc<Texture>, WallError> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| WallError::MissingAsset(name.to_string()))
    }
}
