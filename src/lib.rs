pub mod app;
pub mod config;
pub mod platform;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use platform::{DesktopWindowSystem, WindowSystem};
pub use render::{FrameStats, FrameTarget, GlApi, ShaderError, ShaderProgram, ShaderStage, VertexBuffer};
pub use utils::error::AppError;
