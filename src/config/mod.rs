pub mod core;
pub mod rendering;
pub mod window;

pub use self::core::{AppConfig, ConfigError, LoggingConfig, CONFIG_FILE};
pub use rendering::{RenderConfig, ShaderConfig};
pub use window::WindowConfig;
