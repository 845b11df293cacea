use gl::types::*;
use log::{debug, error, warn};
use std::ffi::CString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::backend::GlApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    pub fn gl_kind(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to read {stage} shader {path}: {source}")]
    Read {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader source contains a NUL byte")]
    Nul { stage: ShaderStage },

    #[error("Failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("Failed to link shader program: {0}")]
    Link(String),

    #[error("OpenGL error 0x{code:04X} while binding program {program}")]
    Gl { program: GLuint, code: GLenum },
}

/// Shader text tagged with the stage it was loaded for.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub path: PathBuf,
    pub text: String,
}

/// Reads a whole shader file. A missing file is an error here rather than an
/// empty source handed to the compiler.
pub fn load_source(stage: ShaderStage, path: &Path) -> Result<ShaderSource, ShaderError> {
    let text = fs::read_to_string(path).map_err(|source| ShaderError::Read {
        stage,
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} shader from {} ({} bytes)", stage, path.display(), text.len());

    Ok(ShaderSource {
        stage,
        path: path.to_path_buf(),
        text,
    })
}

/// Compiles one stage and returns its shader object. The object is deleted
/// before returning an error.
pub fn compile_stage<G: GlApi + ?Sized>(gl: &G, source: &ShaderSource) -> Result<GLuint, ShaderError> {
    let c_source = CString::new(source.text.as_bytes()).map_err(|_| ShaderError::Nul {
        stage: source.stage,
    })?;

    let shader = gl.create_shader(source.stage.gl_kind());
    gl.shader_source(shader, &c_source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        error!("Failed to compile {} shader ({})", source.stage, source.path.display());
        error!("{}", log);
        gl.delete_shader(shader);
        return Err(ShaderError::Compile {
            stage: source.stage,
            log,
        });
    }

    Ok(shader)
}

/// A linked vertex + fragment program. Lives as long as the context; it is
/// never rebuilt.
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    pub fn from_files<G: GlApi + ?Sized>(
        gl: &G,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vertex_source = load_source(ShaderStage::Vertex, vertex_path)?;
        let fragment_source = load_source(ShaderStage::Fragment, fragment_path)?;
        Self::from_sources(gl, &vertex_source, &fragment_source)
    }

    pub fn from_sources<G: GlApi + ?Sized>(
        gl: &G,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<Self, ShaderError> {
        let vertex_shader = compile_stage(gl, vertex)?;
        let fragment_shader = match compile_stage(gl, fragment) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(vertex_shader);
                return Err(e);
            }
        };

        Self::link(gl, vertex_shader, fragment_shader)
    }

    /// Links two compiled stages. Both shader objects are released whether or
    /// not linking succeeds.
    pub fn link<G: GlApi + ?Sized>(
        gl: &G,
        vertex_shader: GLuint,
        fragment_shader: GLuint,
    ) -> Result<Self, ShaderError> {
        let program = gl.create_program();
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        let linked = gl.program_link_status(program);
        if linked {
            gl.validate_program(program);
            if !gl.program_validate_status(program) {
                warn!("Shader program {} failed validation: {}", program, gl.program_info_log(program));
            }
        }

        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if !linked {
            let log = gl.program_info_log(program);
            error!("Failed to link shader program: {}", log);
            gl.delete_program(program);
            return Err(ShaderError::Link(log));
        }

        debug!("Linked shader program {}", program);
        Ok(ShaderProgram { id: program })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Makes the program current, failing if the driver raised an error flag.
    pub fn bind<G: GlApi + ?Sized>(&self, gl: &G) -> Result<(), ShaderError> {
        gl.use_program(self.id);
        match gl.get_error() {
            gl::NO_ERROR => Ok(()),
            code => Err(ShaderError::Gl {
                program: self.id,
                code,
            }),
        }
    }
}
