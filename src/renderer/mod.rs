//! WebGPU rendering module
//!
//! Everything is drawn as flat-colored triangles built on the CPU each frame.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::build_vertices;
pub use pipeline::RenderState;
pub use vertex::Vertex;
