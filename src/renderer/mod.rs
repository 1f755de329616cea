//! WebGPU rendering module
//!
//! CPU-side tessellation of circles and bars into one triangle list per
//! frame, drawn by a single flat-color pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
