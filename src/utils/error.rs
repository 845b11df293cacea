use thiserror::Error;

use crate::config::ConfigError;
use crate::render::shaders::ShaderError;

/// Everything that can stop the application before or during the frame loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to initialize window system: {0}")]
    WindowInit(String),

    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    #[error("Failed to load OpenGL functions: {0}")]
    Loader(String),

    #[error("Failed to present frame: {0}")]
    Present(String),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Process exit code for this failure. Every error path is fatal.
    pub fn exit_code(&self) -> i32 {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shaders::ShaderStage;

    #[test]
    fn test_every_error_maps_to_failure_code() {
        let errors = [
            AppError::WindowInit("no display".into()),
            AppError::WindowCreation("no config".into()),
            AppError::Loader("glClear missing".into()),
            AppError::Shader(ShaderError::Compile {
                stage: ShaderStage::Fragment,
                log: "syntax error".into(),
            }),
        ];

        for err in &errors {
            assert_eq!(err.exit_code(), -1);
        }
    }

    #[test]
    fn test_config_error_converts_and_fails() {
        let err: AppError = ConfigError::Invalid("unknown log level 'loud'".into()).into();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.exit_code(), -1);
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_shader_error_passes_through_display() {
        let err: AppError = ShaderError::Link("missing main".into()).into();
        assert_eq!(err.to_string(), "Failed to link shader program: missing main");
    }
}
