//! Offset table: object handle -> vertex run in the backing buffer

use slotmap::SecondaryMap;

use crate::scene::ObjectId;

/// Position of one object's vertices in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSlot {
    /// Index of the object's first vertex
    pub first_vertex: u32,
    /// Number of vertices the object occupies
    pub vertex_count: u32,
}

impl BufferSlot {
    /// Vertex index range covered by this slot
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.first_vertex as usize;
        start..start + self.vertex_count as usize
    }
}

/// Maps object handles to their slot in the vertex buffer.
///
/// Lookups for objects that were not part of the last rebuild return `None`.
#[derive(Debug, Default)]
pub struct OffsetTable {
    slots: SecondaryMap<ObjectId, BufferSlot>,
}

impl OffsetTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `object`'s slot, replacing any previous entry
    pub fn track(&mut self, object: ObjectId, first_vertex: u32, vertex_count: u32) {
        self.slots.insert(
            object,
            BufferSlot {
                first_vertex,
                vertex_count,
            },
        );
    }

    /// Slot of `object`, if it is in the buffer
    #[inline]
    pub fn lookup(&self, object: ObjectId) -> Option<BufferSlot> {
        self.slots.get(object).copied()
    }

    /// Forget every slot
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of tracked objects
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no object is tracked
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Tracked objects and their slots
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, BufferSlot)> + '_ {
        self.slots.iter().map(|(id, slot)| (id, *slot))
    }
}
