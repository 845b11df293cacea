use gl::types::*;
use log::{debug, info};

use super::backend::GlApi;
use super::mesh::VertexBuffer;
use crate::utils::error::AppError;

/// Something that can show a finished frame and report a close request.
pub trait FrameTarget {
    fn should_close(&self) -> bool;
    fn swap_buffers(&mut self) -> Result<(), AppError>;
    /// Processes pending window events without blocking.
    fn poll_events(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
}

/// Clears, draws the buffer as triangles, presents and polls until the target
/// reports a close request. Nothing is drawn once that happens.
pub fn render_until_closed<G, T>(
    gl: &G,
    target: &mut T,
    vertices: &VertexBuffer,
    clear_color: [f32; 4],
) -> Result<FrameStats, AppError>
where
    G: GlApi + ?Sized,
    T: FrameTarget + ?Sized,
{
    let mut stats = FrameStats::default();
    let count = vertices.vertex_count() as GLsizei;

    gl.clear_color(clear_color);

    while !target.should_close() {
        gl.clear_color_buffer();
        gl.draw_triangles(0, count);
        target.swap_buffers()?;
        target.poll_events();
        stats.frames += 1;
    }

    debug!("Close requested after {} frames", stats.frames);
    info!("Window closed");
    Ok(stats)
}
