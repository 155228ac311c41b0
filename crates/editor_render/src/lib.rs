//! # Editor Render
//!
//! Geometry batching and draw-subset engine for an interactive 3D scene
//! editor.
//!
//! ## Features
//!
//! - **Single buffer**: faces and lines packed into one vertex buffer and one
//!   index buffer
//! - **Partial updates**: per-object slots patched in place, only dirty bytes
//!   re-uploaded
//! - **Draw subsets**: forced/optional, opaque/transparent, polygon/wireframe/point
//! - **Ordered replay**: material-grouped opaque pass, back-to-front transparent pass
//!
//! ## Quick Start
//!
//! ```rust
//! use editor_render::prelude::*;
//!
//! let mut scene = RenderableStore::new();
//! let floor = scene.insert(Face::new(
//!     RenderState::new(RenderFlags::POLYGON | RenderFlags::WIREFRAME),
//!     Material::new("brick"),
//!     vec![
//!         FaceVertex::new(Vec3::new(0.0, 0.0, 0.0), Vec2::new(0.0, 0.0)),
//!         FaceVertex::new(Vec3::new(1.0, 0.0, 0.0), Vec2::new(1.0, 0.0)),
//!         FaceVertex::new(Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 1.0)),
//!     ],
//! ));
//!
//! let mut array = RenderableVertexArray::new();
//! array.create_array(scene.iter()).unwrap();
//! assert!(array.lookup(floor).is_some());
//! assert_eq!(array.materials(), vec![MaterialId::from("brick")]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{BatcherConfig, Config, EditorRenderConfig},
        foundation::{
            color::Rgba8,
            math::{Mat4, Vec2, Vec3},
        },
        render::{
            BatchError, BatchResult, BufferSink, FrameStats, GraphicsAdapter, PrimitiveKind,
            ProjectionMode, RenderOptions, RenderableVertexArray, SubsetKind, ViewState,
        },
        scene::{
            CameraFlags, Face, FaceVertex, Line, Material, MaterialId, ObjectId, RenderFlags,
            RenderState, RenderableObject, RenderableStore,
        },
    };
}
