//! Thin seam over the OpenGL entry points the renderer needs.
//!
//! `NativeGl` forwards to the globally loaded `gl` function pointers. Tests
//! substitute a recording implementation so the shader builder and frame loop
//! can run without a context.

use gl::types::*;
use std::ffi::{c_void, CStr};
use std::ptr;

use crate::utils::error::AppError;

pub trait GlApi {
    fn create_shader(&self, kind: GLenum) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn program_link_status(&self, program: GLuint) -> bool;
    fn validate_program(&self, program: GLuint);
    fn program_validate_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);
    fn use_program(&self, program: GLuint);

    fn create_vertex_array(&self) -> GLuint;
    fn bind_vertex_array(&self, vao: GLuint);
    fn create_buffer(&self) -> GLuint;
    fn bind_array_buffer(&self, buffer: GLuint);
    /// Uploads `data` into the bound array buffer with `STATIC_DRAW` usage.
    fn array_buffer_data(&self, data: &[u8]);
    fn vertex_attrib_pointer(&self, index: GLuint, components: GLint, stride: GLsizei, offset: usize);
    fn enable_vertex_attrib_array(&self, index: GLuint);

    fn clear_color(&self, rgba: [f32; 4]);
    fn clear_color_buffer(&self);
    fn draw_triangles(&self, first: GLint, count: GLsizei);

    fn get_error(&self) -> GLenum;
    fn get_string(&self, name: GLenum) -> Option<String>;
}

/// Function pointers that must resolve for the renderer to work at all.
fn required_entry_points() -> [(&'static str, bool); 8] {
    [
        ("glCreateShader", gl::CreateShader::is_loaded()),
        ("glCreateProgram", gl::CreateProgram::is_loaded()),
        ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded()),
        ("glClear", gl::Clear::is_loaded()),
        ("glDrawArrays", gl::DrawArrays::is_loaded()),
        ("glGetString", gl::GetString::is_loaded()),
    ]
}

/// Handle proving the `gl` function pointers were loaded for the current context.
#[derive(Debug)]
pub struct NativeGl {
    _private: (),
}

impl NativeGl {
    /// Loads every `gl` function through `loader`. Must be called on the
    /// thread owning the current context.
    pub fn load<F>(loader: F) -> Result<Self, AppError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let missing: Vec<&str> = required_entry_points()
            .iter()
            .filter(|(_, loaded)| !loaded)
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Loader(format!("unresolved: {}", missing.join(", "))));
        }

        Ok(Self { _private: () })
    }
}

fn info_log_buffer(len: GLint) -> Vec<u8> {
    vec![0u8; len.max(1) as usize]
}

fn finish_info_log(mut buffer: Vec<u8>, written: GLsizei) -> String {
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

impl GlApi for NativeGl {
    fn create_shader(&self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }
        status != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }
        let mut buffer = info_log_buffer(len);
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        finish_info_log(buffer, written)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }
        status != gl::FALSE as GLint
    }

    fn validate_program(&self, program: GLuint) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn program_validate_status(&self, program: GLuint) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status);
        }
        status != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }
        let mut buffer = info_log_buffer(len);
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        finish_info_log(buffer, written)
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn create_vertex_array(&self) -> GLuint {
        let mut vao = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
        }
        vao
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn create_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer);
        }
        buffer
    }

    fn bind_array_buffer(&self, buffer: GLuint) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data(&self, data: &[u8]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
    }

    fn vertex_attrib_pointer(&self, index: GLuint, components: GLint, stride: GLsizei, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        unsafe { gl::ClearColor(rgba[0], rgba[1], rgba[2], rgba[3]) }
    }

    fn clear_color_buffer(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) }
    }

    fn draw_triangles(&self, first: GLint, count: GLsizei) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) }
    }

    fn get_error(&self) -> GLenum {
        unsafe { gl::GetError() }
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        let raw = unsafe { gl::GetString(name) };
        if raw.is_null() {
            return None;
        }
        let text = unsafe { CStr::from_ptr(raw as *const std::os::raw::c_char) };
        Some(text.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_log_drops_trailing_nul_and_newline() {
        let mut buffer = info_log_buffer(8);
        buffer[..6].copy_from_slice(b"oops\n\0");
        assert_eq!(finish_info_log(buffer, 5), "oops");
    }

    #[test]
    fn test_info_log_with_empty_length() {
        let buffer = info_log_buffer(0);
        assert_eq!(buffer.len(), 1);
        assert_eq!(finish_info_log(buffer, 0), "");
    }
}
