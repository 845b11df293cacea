pub mod desktop;

pub use desktop::{DesktopTarget, DesktopWindowSystem};

use crate::config::WindowConfig;
use crate::render::{FrameTarget, GlApi};
use crate::utils::error::AppError;

/// Creates the window, its GL context and the loaded function table.
///
/// Errors distinguish the windowing layer failing to start
/// (`AppError::WindowInit`), the window or context failing
/// (`AppError::WindowCreation`) and function loading failing
/// (`AppError::Loader`).
pub trait WindowSystem {
    type Target: FrameTarget;
    type Gl: GlApi;

    fn open(&mut self, config: &WindowConfig) -> Result<(Self::Target, Self::Gl), AppError>;
}
