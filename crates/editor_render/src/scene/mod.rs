//! Scene-side data model consumed by the batcher
//!
//! ## Architecture
//!
//! ```text
//! Scene layer (owns RenderableObject, issues ObjectId)
//!      ↓  (ObjectId, &RenderableObject)
//! RenderableVertexArray (derived buffer data only)
//! ```

pub mod flags;
pub mod material;
pub mod renderable_object;
pub mod store;

pub use flags::{CameraFlags, RenderFlags};
pub use material::{Material, MaterialId};
pub use renderable_object::{Face, FaceVertex, Line, RenderState, RenderableObject};
pub use store::{ObjectId, RenderableStore};
