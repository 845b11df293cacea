pub mod backend;
pub mod frame;
pub mod mesh;
pub mod shaders;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{GlApi, NativeGl};
pub use frame::{render_until_closed, FrameStats, FrameTarget};
pub use mesh::{Vertex, VertexBuffer, VertexLayout, TRIANGLE};
pub use shaders::{ShaderError, ShaderProgram, ShaderSource, ShaderStage};
