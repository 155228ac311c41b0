//! Per-viewport render toggles and view state

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Vec3};

/// Viewport toggles for optional subsets. Forced subsets ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Draw face polygons (opaque and transparent)
    pub render_face_polygons: bool,
    /// Draw face edges
    pub render_face_wireframe: bool,
    /// Draw line segments
    pub render_line_wireframe: bool,
    /// Draw face points
    pub render_face_points: bool,
    /// Draw line points
    pub render_line_points: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            render_face_polygons: true,
            render_face_wireframe: true,
            render_line_wireframe: true,
            render_face_points: true,
            render_line_points: true,
        }
    }
}

impl RenderOptions {
    /// Every toggle disabled: only forced subsets are drawn
    pub const fn forced_only() -> Self {
        Self {
            render_face_polygons: false,
            render_face_wireframe: false,
            render_line_wireframe: false,
            render_face_points: false,
            render_line_points: false,
        }
    }
}

/// Camera projection of the viewport being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// 2D views (top, front, side)
    Orthographic,
    /// 3D view
    #[default]
    Perspective,
}

/// Everything the sequencer needs from the viewport for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Camera position, used for transparent depth sorting
    pub eye: Vec3,
    /// Projection mode forwarded to the shader
    pub projection: ProjectionMode,
    /// World-to-camera matrix
    pub camera_matrix: Mat4,
    /// Camera-to-viewport matrix
    pub viewport_matrix: Mat4,
    /// Optional subset toggles
    pub options: RenderOptions,
}

impl ViewState {
    /// View with identity matrices and default options
    pub fn new(eye: Vec3, projection: ProjectionMode) -> Self {
        Self {
            eye,
            projection,
            camera_matrix: Mat4::identity(),
            viewport_matrix: Mat4::identity(),
            options: RenderOptions::default(),
        }
    }

    /// Set camera and viewport matrices
    pub fn with_matrices(mut self, camera_matrix: Mat4, viewport_matrix: Mat4) -> Self {
        self.camera_matrix = camera_matrix;
        self.viewport_matrix = viewport_matrix;
        self
    }

    /// Set render options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}
