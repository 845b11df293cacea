use log::{info, warn, Level};

use crate::config::AppConfig;
use crate::platform::WindowSystem;
use crate::render::{
    render_until_closed, FrameStats, GlApi, ShaderError, ShaderProgram, VertexBuffer, TRIANGLE,
};
use crate::utils::error::AppError;

/// Opens the window, uploads the triangle, builds the shader program and
/// renders until the window is closed.
///
/// A shader that fails to load, compile or link stops startup before the
/// first frame.
pub fn run<W: WindowSystem>(system: &mut W, config: &AppConfig) -> Result<FrameStats, AppError> {
    let (mut target, gl) = system.open(&config.window)?;
    log_versions(&gl);

    let vertices = VertexBuffer::upload(&gl, &TRIANGLE);

    let program = ShaderProgram::from_files(&gl, &config.shaders.vertex, &config.shaders.fragment)?;
    program.bind(&gl)?;

    render_until_closed(&gl, &mut target, &vertices, config.render.clear_color)
}

/// `0` after a clean close, `-1` for any failure.
pub fn exit_code(result: &Result<FrameStats, AppError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}

/// Level for reporting a fatal error. Compile and link failures were already
/// logged with the driver output where they happened.
pub fn failure_level(err: &AppError) -> Level {
    match err {
        AppError::Shader(ShaderError::Compile { .. } | ShaderError::Link(_)) => Level::Debug,
        _ => Level::Error,
    }
}

fn log_versions<G: GlApi + ?Sized>(gl: &G) {
    match gl.get_string(gl::VERSION) {
        Some(version) => info!("Status: Using OpenGL {}", version),
        None => warn!("Driver did not report an OpenGL version"),
    }
    if let Some(renderer) = gl.get_string(gl::RENDERER) {
        info!("Status: Renderer {}", renderer);
    }
    if let Some(glsl) = gl.get_string(gl::SHADING_LANGUAGE_VERSION) {
        info!("Status: GLSL {}", glsl);
    }
}
