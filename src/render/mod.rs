//! WebGPU Rendering module
//!
//! GPU context, camera, meshes and the wireframe wrist renderer.

pub mod camera;
pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod scene;

pub use camera::{Camera, OrbitController};
pub use context::GpuContext;
pub use mesh::{Mesh, MeshData};
pub use pipeline::RenderPipelines;
pub use scene::{draw_list, DrawItem, Shape, WristRenderer};
