//! # Render Module
//!
//! Turns a set of [`RenderableObject`](crate::scene::RenderableObject)s into
//! GPU-ready buffers and replays them for drawing.
//!
//! ## Architecture
//!
//! ```text
//! codec          object -> vertices (pure)
//! offsets        ObjectId -> vertex slot
//! subset         categorised index ranges in one index buffer
//! vertex_array   the batcher: rebuild / partial update / partial delete
//! sequencer      fixed phase order: opaque, wireframe, points, transparent
//! adapter        BufferSink + GraphicsAdapter seams to the graphics API
//! ```
//!
//! ## Frame flow
//!
//! 1. Structural scene change: [`RenderableVertexArray::create_array`]
//! 2. Geometry edits: [`RenderableVertexArray::update_partial`] /
//!    [`RenderableVertexArray::delete_partial`]
//! 3. [`RenderableVertexArray::sync`] uploads what changed
//! 4. [`RenderableVertexArray::render`] issues draw calls
//!
//! None of these may run concurrently on the same array.

pub mod adapter;
pub mod codec;
pub mod error;
pub mod offsets;
pub mod options;
pub mod sequencer;
pub mod subset;
pub mod upload;
pub mod vertex;
pub mod vertex_array;

#[cfg(test)]
mod tests;

pub use adapter::{BufferSink, GraphicsAdapter};
pub use error::{BatchError, BatchResult};
pub use offsets::{BufferSlot, OffsetTable};
pub use options::{ProjectionMode, RenderOptions, ViewState};
pub use sequencer::{FrameStats, RenderSequencer};
pub use subset::{PrimitiveKind, Subset, SubsetIndex, SubsetKind, SubsetTag};
pub use vertex::{Vertex, VertexFlags};
pub use vertex_array::{BuildStats, RenderableVertexArray};
