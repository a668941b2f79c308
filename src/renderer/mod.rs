pub mod pipeline;

use wgpu::util::DeviceExt;

use pipeline::WallPipeline;

use crate::assets::Texture;
use crate::camera::CameraUniform;
use crate::error::WallError;
use crate::mesh::{BoxGeometry, WallVertex};
use crate::wall::Wall;

/// Column-major model matrix as stored in the GPU model buffer.
pub type ModelMatrix = [[f32; 4]; 4];

static ZERO_MODEL: ModelMatrix = [[0.0; 4]; 4];

/// Concatenate every brick's vertices in tile order.  Brick `n` starts at
/// vertex `n * BoxGeometry::VERTEX_COUNT`.
pub fn wall_vertices(wall: &Wall) -> Vec<WallVertex> {
    let mut out = Vec::with_capacity(wall.len() * BoxGeometry::VERTEX_COUNT);
    for tile in wall.tiles() {
        out.extend_from_slice(&tile.mesh().geometry.vertices);
    }
    out
}

/// Refill `out` with one model matrix per brick, in tile order.
pub fn collect_model_matrices(wall: &Wall, out: &mut Vec<ModelMatrix>) {
    out.clear();
    out.extend(
        wall.tiles()
            .iter()
            .map(|tile| wall.world_transform(tile).model_matrix().to_cols_array_2d()),
    );
}

/// GPU-side copy of a wall: one shared index buffer, all brick vertices in
/// one vertex buffer, and a storage buffer of per-brick model matrices that
/// is rewritten every frame.
pub struct WallGpu {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    tile_count: u32,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    models_bind_group: wgpu::BindGroup,
    /// Scratch space reused by `write_transforms`.
    models: Vec<ModelMatrix>,
}

impl WallGpu {
    /// Upload `wall` geometry and its atlas texture.
    ///
    /// Fails with [`WallError::MissingAsset`] when the wall material has no
    /// texture bound.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &WallPipeline,
        wall: &Wall,
    ) -> Result<Self, WallError> {
        let texture = wall
            .material()
            .texture()
            .ok_or_else(|| WallError::MissingAsset(crate::mesh::Material::TEXTURE_SLOT.to_string()))?;

        // All bricks share the same box topology.
        let indices: &[u16] = match wall.tiles().first() {
            Some(tile) => &tile.mesh().geometry.indices,
            None => &[],
        };

        let vertices = wall_vertices(wall);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wall_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        // Pad to 4 bytes: odd u16 counts are not a valid copy size.
        let mut index_data = indices.to_vec();
        if index_data.len() % 2 == 1 {
            index_data.push(0);
        }
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wall_index_buffer"),
            contents: bytemuck::cast_slice(&index_data),
            usage: wgpu::BufferUsages::INDEX,
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wall_camera_buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::from_matrix(glam::Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wall_camera_bg"),
            layout: &pipeline.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group = upload_texture(device, queue, pipeline, texture);

        let mut models = Vec::with_capacity(wall.len());
        collect_model_matrices(wall, &mut models);
        // Storage bindings must not be empty.
        let model_bytes: &[u8] = if models.is_empty() {
            bytemuck::bytes_of(&ZERO_MODEL)
        } else {
            bytemuck::cast_slice(&models)
        };
        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wall_model_buffer"),
            contents: model_bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        let models_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wall_models_bg"),
            layout: &pipeline.models_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "uploaded wall: {} vertices, {} bricks, atlas {}x{}",
            vertices.len(),
            wall.len(),
            texture.width(),
            texture.height()
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            tile_count: wall.len() as u32,
            camera_buffer,
            camera_bind_group,
            texture_bind_group,
            model_buffer,
            models_bind_group,
            models,
        })
    }

    /// Push the wall's current brick transforms.  Call after `Wall::update`.
    pub fn write_transforms(&mut self, queue: &wgpu::Queue, wall: &Wall) {
        collect_model_matrices(wall, &mut self.models);
        if !self.models.is_empty() {
            queue.write_buffer(&self.model_buffer, 0, bytemuck::cast_slice(&self.models));
        }
    }

    pub fn write_camera(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*camera]));
    }

    /// Record one indexed draw per brick into `pass`.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipeline: &WallPipeline) {
        if self.tile_count == 0 {
            return;
        }
        pass.set_pipeline(&pipeline.render_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_bind_group(1, &self.texture_bind_group, &[]);
        pass.set_bind_group(2, &self.models_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        let per_tile = BoxGeometry::VERTEX_COUNT as i32;
        for n in 0..self.tile_count {
            pass.draw_indexed(0..self.index_count, n as i32 * per_tile, n..n + 1);
        }
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &WallPipeline,
    texture: &Texture,
) -> wgpu::BindGroup {
    let size = wgpu::Extent3d {
        width: texture.width(),
        height: texture.height(),
        depth_or_array_layers: 1,
    };

    let gpu_texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(texture.name.as_str()),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        texture.image.as_raw(),
    );

    let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("wall_texture_bg"),
        layout: &pipeline.texture_bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}
