//! Vertex type for the triangle pipeline

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::colors::Rgba;

/// 2D vertex with position and RGBA color
///
/// Shapes are built in playfield pixels (+y down) and converted to clip
/// space with [`Vertex::to_clip`] right before upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn new(pos: Vec2, color: Rgba) -> Self {
        Self {
            position: pos.to_array(),
            color,
        }
    }

    /// Map playfield pixels to clip space (-1..1, +y up)
    pub fn to_clip(self, width: f32, height: f32) -> Self {
        let [x, y] = self.position;
        Self {
            position: [x / width * 2.0 - 1.0, 1.0 - y / height * 2.0],
            color: self.color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
