//! Seams to the graphics API
//!
//! The batcher never touches GPU state. It hands buffer bytes to a
//! [`BufferSink`] and replays subsets through a [`GraphicsAdapter`].

use crate::foundation::math::Mat4;
use crate::render::options::ProjectionMode;
use crate::render::subset::PrimitiveKind;
use crate::scene::MaterialId;

/// Shader state and draw submission for the render sequencer
pub trait GraphicsAdapter {
    /// Set camera and viewport matrices
    fn set_camera(&mut self, camera_matrix: &Mat4, viewport_matrix: &Mat4);

    /// Set the projection mode used to evaluate per-vertex visibility flags
    fn set_projection_mode(&mut self, mode: ProjectionMode);

    /// Toggle flat wireframe shading
    fn set_wireframe_mode(&mut self, enabled: bool);

    /// Bind the textures and parameters of a material
    fn bind_material(&mut self, material: &MaterialId);

    /// Draw `index_count` indices of the shared index buffer starting at `first_index`
    fn draw_range(&mut self, primitive: PrimitiveKind, first_index: u32, index_count: u32);
}

/// Destination of vertex and index data (a GPU buffer pair)
pub trait BufferSink {
    /// Replace both buffers wholesale
    fn replace_buffers(&mut self, vertices: &[u8], indices: &[u8]);

    /// Overwrite vertex bytes starting at vertex `first_vertex`, without resizing
    fn write_vertices(&mut self, first_vertex: u32, vertices: &[u8]);
}
