use bytemuck::{Pod, Zeroable};
use gl::types::*;
use log::debug;
use std::mem;

use super::backend::GlApi;

/// A 2D position in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    pub fn layout() -> VertexLayout {
        VertexLayout {
            index: 0,
            components: 2,
            stride: mem::size_of::<Vertex>() as GLsizei,
            offset: 0,
        }
    }
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5),
    Vertex::new(0.0, 0.5),
    Vertex::new(0.5, -0.5),
];

/// Float attribute description as handed to `glVertexAttribPointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub index: GLuint,
    pub components: GLint,
    pub stride: GLsizei,
    pub offset: usize,
}

/// Static vertex data living in graphics memory for the rest of the process.
#[derive(Debug)]
pub struct VertexBuffer {
    vao: GLuint,
    buffer: GLuint,
    byte_len: usize,
    vertex_count: usize,
    layout: VertexLayout,
}

impl VertexBuffer {
    /// Uploads `vertices` and wires them to attribute 0. Leaves the vertex
    /// array and buffer bound.
    pub fn upload<G: GlApi + ?Sized>(gl: &G, vertices: &[Vertex]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let layout = Vertex::layout();

        let vao = gl.create_vertex_array();
        gl.bind_vertex_array(vao);

        let buffer = gl.create_buffer();
        gl.bind_array_buffer(buffer);
        gl.array_buffer_data(bytes);

        gl.vertex_attrib_pointer(layout.index, layout.components, layout.stride, layout.offset);
        gl.enable_vertex_attrib_array(layout.index);

        debug!(
            "Uploaded {} vertices ({} bytes) into buffer {}",
            vertices.len(),
            bytes.len(),
            buffer
        );

        Self {
            vao,
            buffer,
            byte_len: bytes.len(),
            vertex_count: vertices.len(),
            layout,
        }
    }

    pub fn vao(&self) -> GLuint {
        self.vao
    }

    pub fn id(&self) -> GLuint {
        self.buffer
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }
}
