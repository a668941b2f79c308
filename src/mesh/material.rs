use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::assets::Texture;

/// Shader program handed to the renderer.  The source is opaque here.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderSource {
    pub label: &'static str,
    pub wgsl: Cow<'static, str>,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

impl Default for ShaderSource {
    /// Built-in brick shader (`renderer/shaders/wall.wgsl`).
    fn default() -> Self {
        Self {
            label: "wall_shader",
            wgsl: Cow::Borrowed(crate::WALL_SHADER),
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
        }
    }
}

/// Value bound to a named uniform slot.
#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Texture(Arc<Texture>),
}

/// Named uniform set.  Ordered by name so iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Uniforms {
    values: BTreeMap<String, UniformValue>,
}

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: UniformValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: UniformValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    /// Texture bound to `name`, if that slot holds a texture.
    pub fn texture(&self, name: &str) -> Option<&Arc<Texture>> {
        match self.values.get(name)? {
            UniformValue::Texture(t) => Some(t),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Union of `parent` and `own`; `own` wins on name clashes.
    pub fn merge(parent: &Uniforms, own: Uniforms) -> Uniforms {
        let mut values = parent.values.clone();
        values.extend(own.values);
        Uniforms { values }
    }
}

/// Shader plus uniform set.  Bricks hold it through one shared `Arc`, so a
/// material never carries per-brick state.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub shader: ShaderSource,
    pub uniforms: Uniforms,
}

impl Material {
    /// Uniform slot holding the atlas texture.
    pub const TEXTURE_SLOT: &'static str = "tex";

    pub fn new(shader: ShaderSource, uniforms: Uniforms) -> Self {
        Self { shader, uniforms }
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.uniforms.texture(Self::TEXTURE_SLOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_parent_and_overrides_clashes() {
        let parent = Uniforms::new()
            .with("time", UniformValue::Float(1.0))
            .with("tint", UniformValue::Vec3(Vec3::ONE));
        let own = Uniforms::new().with("time", UniformValue::Float(2.0));

        let merged = Uniforms::merge(&parent, own);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("time"), Some(&UniformValue::Float(2.0)));
        assert_eq!(merged.get("tint"), Some(&UniformValue::Vec3(Vec3::ONE)));
        // parent untouched
        assert_eq!(parent.get("time"), Some(&UniformValue::Float(1.0)));
    }

    #[test]
    fn texture_slot_lookup() {
        let tex = Arc::new(Texture::checker("atlas", 4, 2, [0; 4], [255; 4]));
        let mat = Material::new(
            ShaderSource::default(),
            Uniforms::new().with(Material::TEXTURE_SLOT, UniformValue::Texture(Arc::clone(&tex))),
        );
        assert!(Arc::ptr_eq(mat.texture().unwrap(), &tex));
        assert!(Uniforms::new().with("tex", UniformValue::Float(0.0)).texture("tex").is_none());
    }

    #[test]
    fn default_shader_has_entry_points() {
        let s = ShaderSource::default();
        assert!(s.wgsl.contains(s.vertex_entry));
        assert!(s.wgsl.contains(s.fragment_entry));
    }
}
