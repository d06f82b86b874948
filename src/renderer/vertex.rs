//! GPU vertex/instance types for quad rendering

use bytemuck::{Pod, Zeroable};

use super::frame::DrawCommand;

/// Corner of the shared unit quad, centered at the origin
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Two triangles covering [-0.5, 0.5]²
pub const UNIT_QUAD: [Vertex; 6] = [
    Vertex::new(0.5, 0.5),
    Vertex::new(0.5, -0.5),
    Vertex::new(-0.5, -0.5),
    Vertex::new(0.5, 0.5),
    Vertex::new(-0.5, -0.5),
    Vertex::new(-0.5, 0.5),
];

/// Instance flag: fill with the background gradient and ignore view shake
pub const FLAG_GRADIENT: u32 = 1;

/// Per-quad instance data (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct QuadInstance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    pub glow: f32,
    pub flags: u32,
}

impl QuadInstance {
    /// Full-screen background quad
    pub fn background() -> Self {
        Self {
            center: [0.0, 0.0],
            size: [2.0, 2.0],
            color: [1.0; 4],
            glow: 1.0,
            flags: FLAG_GRADIENT,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            1 => Float32x2,
            2 => Float32x2,
            3 => Float32x4,
            4 => Float32,
            5 => Uint32,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

impl From<&DrawCommand> for QuadInstance {
    fn from(cmd: &DrawCommand) -> Self {
        Self {
            center: cmd.center.to_array(),
            size: cmd.size.to_array(),
            color: cmd.color,
            glow: cmd.glow,
            flags: 0,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BG_TOP: [f32; 3] = [0.12, 0.00, 0.20];
    pub const BG_BOTTOM: [f32; 3] = [0.02, 0.02, 0.08];
    pub const PLAYER: [f32; 4] = [0.10, 0.90, 0.90, 1.0];
    pub const BULLET: [f32; 3] = [1.00, 0.95, 0.30];
    pub const GHOST: [f32; 4] = [0.90, 0.10, 0.95, 1.0];
    pub const EYES: [f32; 4] = [1.00, 1.00, 1.00, 1.0];
    pub const DIVIDER: [f32; 4] = [0.28, 0.28, 0.32, 1.0];
    pub const SPARK: [f32; 3] = [1.00, 0.85, 0.25];
    pub const STAR: [f32; 3] = [1.0, 1.0, 1.0];
}
