//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.027, 0.031, 0.102, 1.0]; // #07081A
    pub const GRID: [f32; 4] = [0.345, 0.396, 0.949, 0.15];
    pub const STAR: [f32; 4] = [0.545, 0.361, 0.965, 0.4];
    pub const SHIP_NOSE: [f32; 4] = [0.376, 0.647, 0.980, 1.0]; // #60a5fa
    pub const SHIP_TAIL: [f32; 4] = [0.655, 0.545, 0.980, 1.0]; // #a78bfa
    pub const SHOT: [f32; 4] = [0.576, 0.773, 0.992, 1.0]; // #93c5fd
    pub const METEOR: [f32; 4] = [0.961, 0.620, 0.043, 1.0]; // #f59e0b
    pub const METEOR_OUTLINE: [f32; 4] = [0.961, 0.620, 0.043, 0.4];
}
