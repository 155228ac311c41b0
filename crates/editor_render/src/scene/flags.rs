//! Bit flags describing how and where a renderable is drawn

use bitflags::bitflags;

bitflags! {
    /// Draw categories a renderable requests.
    ///
    /// The same type is used for both the normal request (filtered by the
    /// viewport's render options) and the forced request (always drawn).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderFlags: u8 {
        /// Filled polygons
        const POLYGON = 1 << 0;
        /// Edges
        const WIREFRAME = 1 << 1;
        /// A single point at the first vertex
        const POINT = 1 << 2;
    }
}

bitflags! {
    /// Camera projections a renderable is visible under.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CameraFlags: u8 {
        /// Orthographic (2D) viewports
        const ORTHOGRAPHIC = 1 << 0;
        /// Perspective (3D) viewports
        const PERSPECTIVE = 1 << 1;
    }
}

impl Default for CameraFlags {
    fn default() -> Self {
        Self::all()
    }
}
