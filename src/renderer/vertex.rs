//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Convert a 0xRRGGBB color to RGBA floats
pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::hex;

    pub const BACKGROUND: [f32; 4] = hex(0x2b2b2b, 1.0);
    pub const BUILDING: [f32; 4] = hex(0x333333, 1.0);
    pub const BUILDING_ROOF: [f32; 4] = hex(0x555555, 1.0);
    pub const CAR: [f32; 4] = hex(0x0077ff, 1.0);
    /// Windshield stripe marking the car's front
    pub const CAR_FRONT: [f32; 4] = hex(0xaaddff, 1.0);
    pub const ENEMY: [f32; 4] = hex(0xff4444, 1.0);
    pub const BULLET: [f32; 4] = hex(0xffff88, 1.0);
    pub const FUEL: [f32; 4] = hex(0x88ff88, 1.0);
    pub const FUEL_CAP: [f32; 4] = hex(0x006600, 1.0);
    pub const JOYSTICK_BASE: [f32; 4] = hex(0xffffff, 0.15);
    pub const JOYSTICK_KNOB: [f32; 4] = hex(0xffffff, 0.45);
    pub const SHOOT_BUTTON: [f32; 4] = hex(0xff4444, 0.35);
    pub const SHOOT_BUTTON_RIM: [f32; 4] = hex(0xffffff, 0.5);
    /// Dim layer behind menu and pause text
    pub const SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}
