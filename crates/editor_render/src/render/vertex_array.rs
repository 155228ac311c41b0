//! # Renderable Vertex Array
//!
//! Packs faces and lines into one vertex buffer and one index buffer, and
//! keeps the bookkeeping needed to patch individual objects in place.
//!
//! ## Update paths
//!
//! - [`RenderableVertexArray::create_array`]: full rebuild. The only path that
//!   changes buffer layout or subset membership.
//! - [`RenderableVertexArray::update_partial`]: re-encode known objects into
//!   their existing slots.
//! - [`RenderableVertexArray::delete_partial`]: re-encode known objects as
//!   invisible under every projection. The slot stays until the next rebuild.
//!
//! ## Performance Goals
//!
//! - Rebuild cost linear in total vertices
//! - Partial updates proportional to the objects touched, with only the
//!   patched byte ranges re-uploaded

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::config::BatcherConfig;
use crate::render::adapter::{BufferSink, GraphicsAdapter};
use crate::render::codec;
use crate::render::error::{BatchError, BatchResult};
use crate::render::offsets::{BufferSlot, OffsetTable};
use crate::render::options::ViewState;
use crate::render::sequencer::{FrameStats, RenderSequencer};
use crate::render::subset::{
    first_point, linearise_loop, linearise_strip, triangulate, Subset, SubsetBuilder, SubsetIndex,
    SubsetKind, SubsetTag,
};
use crate::render::upload::PendingUpload;
use crate::render::vertex::{Vertex, VertexFlags};
use crate::scene::{
    Face, Line, MaterialId, ObjectId, RenderFlags, RenderState, RenderableObject,
};

/// Statistics of the last rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Objects passed to the rebuild
    pub objects: usize,
    /// Objects left out because they requested nothing
    pub filtered: usize,
    /// Vertices in the buffer
    pub vertices: usize,
    /// Indices across all subsets
    pub indices: usize,
    /// Distinct face materials
    pub material_groups: usize,
    /// Faces routed to the transparent pass
    pub transparent_faces: usize,
    /// Time spent rebuilding (microseconds)
    pub build_time_us: u64,
}

/// Ungrouped subsets opened once per rebuild
const UNGROUPED: [SubsetKind; 6] = [
    SubsetKind::LineWireframe,
    SubsetKind::LinePoints,
    SubsetKind::FaceWireframe,
    SubsetKind::FacePoints,
    SubsetKind::ForcedWireframe,
    SubsetKind::ForcedPoints,
];

/// Batched vertex buffer for every renderable of one view.
///
/// Owned by the view that draws it; dropped with the view.
#[derive(Debug, Default)]
pub struct RenderableVertexArray {
    vertices: Vec<Vertex>,
    offsets: OffsetTable,
    subsets: SubsetIndex,
    items: HashSet<ObjectId>,
    pending: PendingUpload,
    config: BatcherConfig,
    stats: BuildStats,
    scratch: Vec<Vertex>,
}

impl RenderableVertexArray {
    /// Create an empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty array with capacity hints from `config`
    pub fn with_config(config: BatcherConfig) -> Self {
        Self {
            vertices: Vec::with_capacity(config.vertex_capacity),
            config,
            ..Default::default()
        }
    }

    /// Rebuild the buffers from scratch.
    ///
    /// Objects whose render flags are empty are remembered (see
    /// [`contains`](Self::contains)) but get no slot. Faces are packed in
    /// material groups, in order of first appearance; lines follow.
    ///
    /// On error the array is left as after [`clear`](Self::clear).
    pub fn create_array<'a, I>(&mut self, objects: I) -> BatchResult<()>
    where
        I: IntoIterator<Item = (ObjectId, &'a RenderableObject)>,
    {
        let result = self.rebuild(objects);
        if let Err(error) = &result {
            log::warn!("rebuild failed, vertex array cleared: {error}");
            self.clear();
        }
        result
    }

    fn rebuild<'a, I>(&mut self, objects: I) -> BatchResult<()>
    where
        I: IntoIterator<Item = (ObjectId, &'a RenderableObject)>,
    {
        let started = Instant::now();

        self.vertices.clear();
        self.offsets.clear();
        self.items.clear();
        self.stats = BuildStats::default();

        let mut builder =
            SubsetBuilder::with_capacity(self.config.index_capacity / SubsetKind::COUNT);
        for kind in UNGROUPED {
            builder.start(kind);
        }

        let mut groups: Vec<(&'a MaterialId, Vec<(ObjectId, &'a Face)>)> = Vec::new();
        let mut group_slots: HashMap<&'a MaterialId, usize> = HashMap::new();
        let mut lines: Vec<(ObjectId, &'a Line)> = Vec::new();

        for (id, object) in objects {
            self.items.insert(id);
            self.stats.objects += 1;
            if object.is_hidden() {
                self.stats.filtered += 1;
                continue;
            }
            match object {
                RenderableObject::Face(face) => {
                    let material = &face.material.id;
                    let slot = *group_slots.entry(material).or_insert_with(|| {
                        groups.push((material, Vec::new()));
                        groups.len() - 1
                    });
                    groups[slot].1.push((id, face));
                }
                RenderableObject::Line(line) => lines.push((id, line)),
            }
        }

        for (material, faces) in &groups {
            builder.start(SubsetKind::FacePolygons);
            builder.start(SubsetKind::ForcedPolygons);

            for &(id, face) in faces {
                self.push_face(&mut builder, id, face)?;
            }

            let tag = SubsetTag::Material((*material).clone());
            builder.close(SubsetKind::FacePolygons, Some(tag.clone()));
            builder.close(SubsetKind::ForcedPolygons, Some(tag));
        }

        for &(id, line) in &lines {
            self.push_line(&mut builder, id, line)?;
        }

        // Every kind ends with one untagged range: the content of ungrouped
        // kinds, an empty end marker for grouped ones.
        for kind in SubsetKind::ALL {
            builder.close(kind, None);
        }

        self.subsets = builder.finish();
        self.pending.mark_full();

        self.stats.vertices = self.vertices.len();
        self.stats.indices = self.subsets.indices().len();
        self.stats.material_groups = groups.len();
        self.stats.build_time_us = started.elapsed().as_micros() as u64;

        log::debug!(
            "rebuilt vertex array: {} objects ({} filtered), {} vertices, {} indices, {} material groups in {}us",
            self.stats.objects,
            self.stats.filtered,
            self.stats.vertices,
            self.stats.indices,
            self.stats.material_groups,
            self.stats.build_time_us,
        );

        Ok(())
    }

    /// Re-encode objects into their existing slots.
    ///
    /// Objects without a slot are skipped. Transparent faces also move their
    /// depth origin, so the next frame sorts them where they are now.
    /// Returns the number of objects patched.
    ///
    /// Objects whose vertex count no longer matches their slot are left
    /// untouched; every other object is still patched and the first
    /// [`BatchError::VertexCountChanged`] is returned.
    pub fn update_partial<'a, I>(&mut self, objects: I) -> BatchResult<usize>
    where
        I: IntoIterator<Item = (ObjectId, &'a RenderableObject)>,
    {
        self.patch(objects, VertexFlags::empty())
    }

    /// Hide objects in place by re-encoding them invisible under every projection.
    ///
    /// Same skipping and failure rules as [`update_partial`](Self::update_partial).
    pub fn delete_partial<'a, I>(&mut self, objects: I) -> BatchResult<usize>
    where
        I: IntoIterator<Item = (ObjectId, &'a RenderableObject)>,
    {
        self.patch(objects, VertexFlags::INVISIBLE)
    }

    /// Distinct materials of the optional opaque polygon subset, in build order
    pub fn materials(&self) -> Vec<MaterialId> {
        let mut seen = HashSet::new();
        self.subsets
            .subsets(SubsetKind::FacePolygons)
            .iter()
            .filter_map(|subset| subset.tag.as_ref())
            .map(SubsetTag::material)
            .filter(|material| seen.insert(*material))
            .cloned()
            .collect()
    }

    /// Send pending buffer changes to `sink`
    pub fn sync<S>(&mut self, sink: &mut S)
    where
        S: BufferSink + ?Sized,
    {
        match self.pending.take() {
            PendingUpload::Clean => {}
            PendingUpload::Full => {
                sink.replace_buffers(
                    bytemuck::cast_slice(&self.vertices),
                    bytemuck::cast_slice(self.subsets.indices()),
                );
            }
            PendingUpload::Ranges(ranges) => {
                for range in ranges {
                    let first_vertex = range.start as u32;
                    sink.write_vertices(first_vertex, bytemuck::cast_slice(&self.vertices[range]));
                }
            }
        }
    }

    /// Draw through `adapter` with a one-off sequencer
    pub fn render<A>(&self, adapter: &mut A, view: &ViewState) -> FrameStats
    where
        A: GraphicsAdapter + ?Sized,
    {
        RenderSequencer::new().render(&self.subsets, adapter, view)
    }

    /// Drop every object and mark the (now empty) buffers for upload
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.offsets.clear();
        self.items.clear();
        self.subsets = SubsetIndex::default();
        self.stats = BuildStats::default();
        self.pending.mark_full();
    }

    /// The vertex buffer
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The shared index buffer
    pub fn indices(&self) -> &[u32] {
        self.subsets.indices()
    }

    /// Compiled subsets
    pub fn subset_index(&self) -> &SubsetIndex {
        &self.subsets
    }

    /// Ranges of one subset kind
    pub fn subsets(&self, kind: SubsetKind) -> &[Subset] {
        self.subsets.subsets(kind)
    }

    /// Slot of `object`, if it has one
    pub fn lookup(&self, object: ObjectId) -> Option<BufferSlot> {
        self.offsets.lookup(object)
    }

    /// The offset table
    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Whether `object` was passed to the last rebuild, slotted or not
    pub fn contains(&self, object: ObjectId) -> bool {
        self.items.contains(&object)
    }

    /// Whether buffer changes are waiting for [`sync`](Self::sync)
    pub fn has_pending_upload(&self) -> bool {
        !self.pending.is_clean()
    }

    /// Statistics of the last rebuild
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    fn push_vertices(
        &mut self,
        id: ObjectId,
        encode: impl FnOnce(&mut Vec<Vertex>),
    ) -> BatchResult<u32> {
        let first = self.vertices.len();
        encode(&mut self.vertices);
        let end = self.vertices.len();
        let limit = self.config.max_vertices;
        if end > limit as usize {
            return Err(BatchError::BufferOverflow {
                vertices: end,
                limit,
            });
        }
        self.offsets.track(id, first as u32, (end - first) as u32);
        Ok(first as u32)
    }

    fn push_face(
        &mut self,
        builder: &mut SubsetBuilder,
        id: ObjectId,
        face: &Face,
    ) -> BatchResult<()> {
        let first = self.push_vertices(id, |out| {
            codec::encode_face(face, VertexFlags::empty(), out);
        })?;
        let count = face.vertices.len() as u32;
        let state = &face.state;
        let transparent = face.material.has_transparency;

        let (forced_polygons, polygons) = if transparent {
            builder.start(SubsetKind::FaceTransparentPolygons);
            builder.start(SubsetKind::ForcedTransparentPolygons);
            (SubsetKind::ForcedTransparentPolygons, SubsetKind::FaceTransparentPolygons)
        } else {
            (SubsetKind::ForcedPolygons, SubsetKind::FacePolygons)
        };

        if let Some(kind) = classify(state, RenderFlags::POLYGON, forced_polygons, polygons) {
            builder.push(kind, first, triangulate(count));
        }
        if let Some(kind) = classify(
            state,
            RenderFlags::WIREFRAME,
            SubsetKind::ForcedWireframe,
            SubsetKind::FaceWireframe,
        ) {
            builder.push(kind, first, linearise_loop(count));
        }
        if let Some(kind) = classify(
            state,
            RenderFlags::POINT,
            SubsetKind::ForcedPoints,
            SubsetKind::FacePoints,
        ) {
            builder.push(kind, first, first_point());
        }

        if transparent {
            let tag = SubsetTag::TransparentFace {
                object: id,
                material: face.material.id.clone(),
            };
            builder.track_depth_origin(id, face.origin);
            builder.close(SubsetKind::FaceTransparentPolygons, Some(tag.clone()));
            builder.close(SubsetKind::ForcedTransparentPolygons, Some(tag));
            self.stats.transparent_faces += 1;
        }

        Ok(())
    }

    fn push_line(
        &mut self,
        builder: &mut SubsetBuilder,
        id: ObjectId,
        line: &Line,
    ) -> BatchResult<()> {
        let first = self.push_vertices(id, |out| {
            codec::encode_line(line, VertexFlags::empty(), out);
        })?;
        let count = line.vertices.len() as u32;
        let state = &line.state;

        if let Some(kind) = classify(
            state,
            RenderFlags::WIREFRAME,
            SubsetKind::ForcedWireframe,
            SubsetKind::LineWireframe,
        ) {
            builder.push(kind, first, linearise_strip(count));
        }
        if let Some(kind) = classify(
            state,
            RenderFlags::POINT,
            SubsetKind::ForcedPoints,
            SubsetKind::LinePoints,
        ) {
            builder.push(kind, first, first_point());
        }

        Ok(())
    }

    fn patch<'a, I>(&mut self, objects: I, extra: VertexFlags) -> BatchResult<usize>
    where
        I: IntoIterator<Item = (ObjectId, &'a RenderableObject)>,
    {
        let mut patched = 0;
        let mut first_error = None;
        for (id, object) in objects {
            let Some(slot) = self.offsets.lookup(id) else {
                log::trace!("{id:?} has no slot; skipped");
                continue;
            };

            self.scratch.clear();
            codec::encode_into(object, extra, &mut self.scratch);
            if self.scratch.len() != slot.vertex_count as usize {
                log::warn!(
                    "{id:?} changed from {} to {} vertices; left unpatched",
                    slot.vertex_count,
                    self.scratch.len()
                );
                first_error.get_or_insert(BatchError::VertexCountChanged {
                    object: id,
                    expected: slot.vertex_count,
                    actual: self.scratch.len(),
                });
                continue;
            }

            self.vertices[slot.range()].copy_from_slice(&self.scratch);
            self.pending.mark(slot.range());
            if let RenderableObject::Face(face) = object {
                self.subsets.refresh_depth_origin(id, face.origin);
            }
            patched += 1;
        }
        log::trace!("patched {patched} objects");
        first_error.map_or(Ok(patched), Err)
    }
}

/// Subset a capability goes to: forced wins over requested, `None` when neither applies
#[inline]
fn classify(
    state: &RenderState,
    flag: RenderFlags,
    forced_kind: SubsetKind,
    optional_kind: SubsetKind,
) -> Option<SubsetKind> {
    if state.is_forced(flag) {
        Some(forced_kind)
    } else if state.is_requested(flag) {
        Some(optional_kind)
    } else {
        None
    }
}
