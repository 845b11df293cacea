//! Recording `GlApi` used by unit tests in place of a live context.

use gl::types::*;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::CStr;
use std::rc::Rc;

use super::backend::GlApi;
use super::frame::FrameTarget;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader(GLenum, GLuint),
    CompileShader(GLuint),
    DeleteShader(GLuint),
    CreateProgram(GLuint),
    AttachShader(GLuint, GLuint),
    LinkProgram(GLuint),
    ValidateProgram(GLuint),
    DeleteProgram(GLuint),
    UseProgram(GLuint),
    CreateVertexArray(GLuint),
    BindVertexArray(GLuint),
    CreateBuffer(GLuint),
    BindArrayBuffer(GLuint),
    ArrayBufferData(usize),
    VertexAttribPointer {
        index: GLuint,
        components: GLint,
        stride: GLsizei,
        offset: usize,
    },
    EnableVertexAttribArray(GLuint),
    ClearColor([f32; 4]),
    Clear,
    DrawTriangles(GLint, GLsizei),
}

/// Pretends to be a driver: sources without an entry point fail to compile,
/// and `fail_link` forces the next link to fail.
#[derive(Default)]
pub struct RecordingGl {
    calls: Rc<RefCell<Vec<GlCall>>>,
    pub uploaded: RefCell<Vec<u8>>,
    fail_link: Option<String>,
    fail_validate: bool,
    pub pending_error: Cell<GLenum>,
    next_name: Cell<GLuint>,
    sources: RefCell<HashMap<GLuint, String>>,
    compiled: RefCell<HashMap<GLuint, bool>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link_failure(mut self, log: &str) -> Self {
        self.fail_link = Some(log.to_string());
        self
    }

    pub fn with_validation_failure(mut self) -> Self {
        self.fail_validate = true;
        self
    }

    /// Shared handle to the call log, still readable after `self` is moved.
    pub fn call_log(&self) -> Rc<RefCell<Vec<GlCall>>> {
        Rc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> GLuint {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        name
    }
}

impl GlApi for RecordingGl {
    fn create_shader(&self, kind: GLenum) -> GLuint {
        let id = self.allocate();
        self.record(GlCall::CreateShader(kind, id));
        id
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        self.sources
            .borrow_mut()
            .insert(shader, source.to_string_lossy().into_owned());
    }

    fn compile_shader(&self, shader: GLuint) {
        let ok = self
            .sources
            .borrow()
            .get(&shader)
            .map(|src| src.contains("void main"))
            .unwrap_or(false);
        self.compiled.borrow_mut().insert(shader, ok);
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        self.compiled.borrow().get(&shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, _shader: GLuint) -> String {
        "0:1(1): error: syntax error, unexpected end of file".to_string()
    }

    fn delete_shader(&self, shader: GLuint) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> GLuint {
        let id = self.allocate();
        self.record(GlCall::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(GlCall::AttachShader(program, shader));
    }

    fn link_program(&self, program: GLuint) {
        self.record(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, _program: GLuint) -> bool {
        self.fail_link.is_none()
    }

    fn validate_program(&self, program: GLuint) {
        self.record(GlCall::ValidateProgram(program));
    }

    fn program_validate_status(&self, _program: GLuint) -> bool {
        !self.fail_validate
    }

    fn program_info_log(&self, _program: GLuint) -> String {
        self.fail_link.clone().unwrap_or_default()
    }

    fn delete_program(&self, program: GLuint) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: GLuint) {
        self.record(GlCall::UseProgram(program));
    }

    fn create_vertex_array(&self) -> GLuint {
        let id = self.allocate();
        self.record(GlCall::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        self.record(GlCall::BindVertexArray(vao));
    }

    fn create_buffer(&self) -> GLuint {
        let id = self.allocate();
        self.record(GlCall::CreateBuffer(id));
        id
    }

    fn bind_array_buffer(&self, buffer: GLuint) {
        self.record(GlCall::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[u8]) {
        *self.uploaded.borrow_mut() = data.to_vec();
        self.record(GlCall::ArrayBufferData(data.len()));
    }

    fn vertex_attrib_pointer(&self, index: GLuint, components: GLint, stride: GLsizei, offset: usize) {
        self.record(GlCall::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(GlCall::ClearColor(rgba));
    }

    fn clear_color_buffer(&self) {
        self.record(GlCall::Clear);
    }

    fn draw_triangles(&self, first: GLint, count: GLsizei) {
        self.record(GlCall::DrawTriangles(first, count));
    }

    fn get_error(&self) -> GLenum {
        self.pending_error.replace(gl::NO_ERROR)
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        match name {
            gl::VERSION => Some("3.3.0 Recording".to_string()),
            gl::RENDERER => Some("RecordingGl".to_string()),
            _ => None,
        }
    }
}

/// Frame target that requests close during the poll of frame `close_after`.
pub struct ClosingTarget {
    close_after: u64,
    fail_swap: bool,
    pub polls: u64,
    pub swaps: u64,
}

impl ClosingTarget {
    pub fn new(close_after: u64) -> Self {
        Self {
            close_after,
            fail_swap: false,
            polls: 0,
            swaps: 0,
        }
    }

    pub fn with_swap_failure(mut self) -> Self {
        self.fail_swap = true;
        self
    }
}

impl FrameTarget for ClosingTarget {
    fn should_close(&self) -> bool {
        self.polls >= self.close_after
    }

    fn swap_buffers(&mut self) -> Result<(), AppError> {
        if self.fail_swap {
            return Err(AppError::Present("surface lost".into()));
        }
        self.swaps += 1;
        Ok(())
    }

    fn poll_events(&mut self) {
        self.polls += 1;
    }
}
