//! Renderable primitives handed to the batcher by the scene layer
//!
//! The variant set is closed: every subset category the vertex array builds
//! assumes it knows all primitive kinds up front.

use crate::foundation::color::Rgba8;
use crate::foundation::math::{centroid, plane_normal, Vec2, Vec3};
use crate::scene::flags::{CameraFlags, RenderFlags};
use crate::scene::material::Material;

/// Visibility state shared by every renderable variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderState {
    /// Categories drawn subject to the viewport's render options
    pub render_flags: RenderFlags,
    /// Categories drawn regardless of the viewport's render options
    pub forced_render_flags: RenderFlags,
    /// Projections the object is visible under
    pub camera_flags: CameraFlags,
}

impl RenderState {
    /// State requesting `flags` under every projection
    pub fn new(render_flags: RenderFlags) -> Self {
        Self {
            render_flags,
            ..Default::default()
        }
    }

    /// Whether `flag` should be pushed to a forced subset
    #[inline]
    pub fn is_forced(&self, flag: RenderFlags) -> bool {
        self.forced_render_flags.contains(flag)
    }

    /// Whether `flag` should be pushed to an optional subset
    #[inline]
    pub fn is_requested(&self, flag: RenderFlags) -> bool {
        self.render_flags.contains(flag)
    }
}

/// Polygon corner with texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceVertex {
    /// World-space position
    pub position: Vec3,
    /// Texture coordinate
    pub texture: Vec2,
}

impl FaceVertex {
    /// Create a corner
    pub fn new(position: Vec3, texture: Vec2) -> Self {
        Self { position, texture }
    }
}

/// Planar convex polygon.
///
/// Upstream construction guarantees at least three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Visibility state
    pub state: RenderState,
    /// Corners in winding order
    pub vertices: Vec<FaceVertex>,
    /// Material binding and grouping key
    pub material: Material,
    /// Highlight color (selection, hover)
    pub accent_color: Rgba8,
    /// Reference point used for transparent depth sorting
    pub origin: Vec3,
}

impl Face {
    /// Create a face whose origin is the centroid of its corners
    pub fn new(state: RenderState, material: Material, vertices: Vec<FaceVertex>) -> Self {
        let origin = centroid(vertices.iter().map(|v| &v.position));
        Self {
            state,
            vertices,
            material,
            accent_color: Rgba8::WHITE,
            origin,
        }
    }

    /// Set the accent color
    pub fn with_accent_color(mut self, color: Rgba8) -> Self {
        self.accent_color = color;
        self
    }

    /// Flat normal from the first three corners
    pub fn plane_normal(&self) -> Vec3 {
        match self.vertices.as_slice() {
            [a, b, c, ..] => plane_normal(&a.position, &b.position, &c.position),
            _ => Vec3::zeros(),
        }
    }
}

/// Straight segment
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Visibility state
    pub state: RenderState,
    /// Endpoints
    pub vertices: [Vec3; 2],
    /// Line color
    pub color: Rgba8,
    /// Highlight color
    pub accent_color: Rgba8,
}

impl Line {
    /// Create a segment
    pub fn new(state: RenderState, start: Vec3, end: Vec3, color: Rgba8) -> Self {
        Self {
            state,
            vertices: [start, end],
            color,
            accent_color: color,
        }
    }

    /// Set the accent color
    pub fn with_accent_color(mut self, color: Rgba8) -> Self {
        self.accent_color = color;
        self
    }
}

/// A primitive the batcher can pack into the vertex buffer
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableObject {
    /// Polygon face
    Face(Face),
    /// Line segment
    Line(Line),
}

impl RenderableObject {
    /// Visibility state of the underlying primitive
    pub fn state(&self) -> &RenderState {
        match self {
            Self::Face(face) => &face.state,
            Self::Line(line) => &line.state,
        }
    }

    /// Mutable visibility state
    pub fn state_mut(&mut self) -> &mut RenderState {
        match self {
            Self::Face(face) => &mut face.state,
            Self::Line(line) => &mut line.state,
        }
    }

    /// Number of vertices the codec produces for this object
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Face(face) => face.vertices.len(),
            Self::Line(line) => line.vertices.len(),
        }
    }

    /// Whether the object requests nothing under normal visibility rules
    pub fn is_hidden(&self) -> bool {
        self.state().render_flags.is_empty()
    }
}

impl From<Face> for RenderableObject {
    fn from(face: Face) -> Self {
        Self::Face(face)
    }
}

impl From<Line> for RenderableObject {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}
