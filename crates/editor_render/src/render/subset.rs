//! Draw subsets: named index ranges replayed by the render sequencer
//!
//! During a rebuild every [`SubsetKind`] accumulates its own index list.
//! Ranges are cut from a list with [`SubsetBuilder::close`], each carrying an
//! optional [`SubsetTag`]. [`SubsetBuilder::finish`] lays all lists out in a
//! single index buffer so every range can be drawn without rebinding.
//!
//! Every kind's range list ends with exactly one untagged range. For
//! ungrouped kinds (wireframe, points) that range holds all the content; for
//! grouped kinds (polygons) it is an empty end marker after the tagged groups.
//!
//! Transparent faces are sorted by a depth origin looked up per object at
//! draw time, so partial updates can move them without a rebuild.

use slotmap::SecondaryMap;

use crate::foundation::math::Vec3;
use crate::scene::{MaterialId, ObjectId};

/// Primitive topology of a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Triangle list
    Triangles,
    /// Line list
    Lines,
    /// Point list
    Points,
}

/// Fixed subset categories.
///
/// Optional kinds are filtered by the viewport's render options; forced kinds
/// are always drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubsetKind {
    /// Opaque face polygons
    FacePolygons,
    /// Face edges
    FaceWireframe,
    /// Face points
    FacePoints,
    /// Face polygons with a transparent material
    FaceTransparentPolygons,
    /// Line segments
    LineWireframe,
    /// Line points
    LinePoints,
    /// Forced opaque polygons
    ForcedPolygons,
    /// Forced edges (faces and lines)
    ForcedWireframe,
    /// Forced points (faces and lines)
    ForcedPoints,
    /// Forced polygons with a transparent material
    ForcedTransparentPolygons,
}

impl SubsetKind {
    /// Number of kinds
    pub const COUNT: usize = 10;

    /// Every kind, in index-buffer layout order
    pub const ALL: [Self; Self::COUNT] = [
        Self::FacePolygons,
        Self::FaceWireframe,
        Self::FacePoints,
        Self::FaceTransparentPolygons,
        Self::LineWireframe,
        Self::LinePoints,
        Self::ForcedPolygons,
        Self::ForcedWireframe,
        Self::ForcedPoints,
        Self::ForcedTransparentPolygons,
    ];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }

    /// Topology the kind is drawn with
    pub const fn primitive(self) -> PrimitiveKind {
        match self {
            Self::FacePolygons
            | Self::FaceTransparentPolygons
            | Self::ForcedPolygons
            | Self::ForcedTransparentPolygons => PrimitiveKind::Triangles,
            Self::FaceWireframe | Self::LineWireframe | Self::ForcedWireframe => {
                PrimitiveKind::Lines
            }
            Self::FacePoints | Self::LinePoints | Self::ForcedPoints => PrimitiveKind::Points,
        }
    }

    /// Whether the kind ignores the viewport's render options
    pub const fn is_forced(self) -> bool {
        matches!(
            self,
            Self::ForcedPolygons
                | Self::ForcedWireframe
                | Self::ForcedPoints
                | Self::ForcedTransparentPolygons
        )
    }

    /// Whether ranges of this kind are tagged per group
    pub const fn is_grouped(self) -> bool {
        matches!(self.primitive(), PrimitiveKind::Triangles)
    }
}

/// Grouping value attached to a range
#[derive(Debug, Clone, PartialEq)]
pub enum SubsetTag {
    /// Opaque polygons sharing a material
    Material(MaterialId),
    /// One transparent face, sorted individually by distance to its
    /// depth origin (see [`SubsetIndex::depth_origin`])
    TransparentFace {
        /// The face
        object: ObjectId,
        /// Its material
        material: MaterialId,
    },
}

impl SubsetTag {
    /// Material to bind before drawing the range
    pub fn material(&self) -> &MaterialId {
        match self {
            Self::Material(material) | Self::TransparentFace { material, .. } => material,
        }
    }
}

/// A range of the shared index buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    /// First index in the shared index buffer
    pub first_index: u32,
    /// Number of indices
    pub index_count: u32,
    /// Group tag, `None` for ungrouped content and end markers
    pub tag: Option<SubsetTag>,
}

impl Subset {
    /// Whether the range draws nothing
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }
}

/// Compiled subsets of one rebuild
#[derive(Debug, Default)]
pub struct SubsetIndex {
    indices: Vec<u32>,
    ranges: [Vec<Subset>; SubsetKind::COUNT],
    depth_origins: SecondaryMap<ObjectId, Vec3>,
}

impl SubsetIndex {
    /// Ranges of `kind`, in build order
    #[inline]
    pub fn subsets(&self, kind: SubsetKind) -> &[Subset] {
        &self.ranges[kind.slot()]
    }

    /// The shared index buffer
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Total indices referenced by `kind`
    pub fn index_count(&self, kind: SubsetKind) -> usize {
        self.subsets(kind)
            .iter()
            .map(|s| s.index_count as usize)
            .sum()
    }

    /// Indices of one range
    pub fn range_indices(&self, subset: &Subset) -> &[u32] {
        let start = subset.first_index as usize;
        &self.indices[start..start + subset.index_count as usize]
    }

    /// Current depth-sort reference point of a transparent face
    #[inline]
    pub fn depth_origin(&self, object: ObjectId) -> Option<Vec3> {
        self.depth_origins.get(object).copied()
    }

    /// Move the depth origin of a transparent face from the last build.
    /// Returns `false` (and records nothing) for any other object.
    pub fn refresh_depth_origin(&mut self, object: ObjectId, origin: Vec3) -> bool {
        match self.depth_origins.get_mut(object) {
            Some(current) => {
                *current = origin;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Default)]
struct SubsetList {
    indices: Vec<u32>,
    open: usize,
    ranges: Vec<Subset>,
}

/// Accumulates per-kind index lists during a rebuild
#[derive(Debug, Default)]
pub struct SubsetBuilder {
    lists: [SubsetList; SubsetKind::COUNT],
    depth_origins: SecondaryMap<ObjectId, Vec3>,
}

impl SubsetBuilder {
    /// Create a builder, reusing the given index capacity per kind
    pub fn with_capacity(indices_per_kind: usize) -> Self {
        let mut builder = Self::default();
        for list in &mut builder.lists {
            list.indices.reserve(indices_per_kind);
        }
        builder
    }

    /// Begin a new range of `kind` at the current end of its list.
    /// Indices pushed since the last `close` are left out of every range.
    pub fn start(&mut self, kind: SubsetKind) {
        let list = &mut self.lists[kind.slot()];
        list.open = list.indices.len();
    }

    /// Push `first_vertex + offset` for every offset
    pub fn push(&mut self, kind: SubsetKind, first_vertex: u32, offsets: impl IntoIterator<Item = u32>) {
        self.lists[kind.slot()]
            .indices
            .extend(offsets.into_iter().map(|offset| first_vertex + offset));
    }

    /// Cut the open range of `kind`, tag it, and open the next one
    pub fn close(&mut self, kind: SubsetKind, tag: Option<SubsetTag>) {
        let list = &mut self.lists[kind.slot()];
        let end = list.indices.len();
        list.ranges.push(Subset {
            first_index: list.open as u32,
            index_count: (end - list.open) as u32,
            tag,
        });
        list.open = end;
    }

    /// Record the depth origin of a transparent face
    pub fn track_depth_origin(&mut self, object: ObjectId, origin: Vec3) {
        self.depth_origins.insert(object, origin);
    }

    /// Lay every list out in one index buffer
    pub fn finish(self) -> SubsetIndex {
        let total = self.lists.iter().map(|l| l.indices.len()).sum();
        let mut index = SubsetIndex {
            indices: Vec::with_capacity(total),
            ranges: Default::default(),
            depth_origins: self.depth_origins,
        };

        for (slot, list) in self.lists.into_iter().enumerate() {
            let base = index.indices.len() as u32;
            index.indices.extend_from_slice(&list.indices);
            index.ranges[slot] = list
                .ranges
                .into_iter()
                .map(|subset| Subset {
                    first_index: base + subset.first_index,
                    ..subset
                })
                .collect();
        }

        index
    }
}

// ── index patterns ─────────────────────────────────────────────────────────

/// Fan triangulation from corner 0: `count - 2` triangles
pub fn triangulate(count: u32) -> impl Iterator<Item = u32> {
    (1..count.saturating_sub(1)).flat_map(|i| [0, i, i + 1])
}

/// Closed edge loop: `count` edges, the last one back to corner 0
pub fn linearise_loop(count: u32) -> impl Iterator<Item = u32> {
    (0..count).flat_map(move |i| [i, (i + 1) % count])
}

/// Open polyline: `count - 1` edges
pub fn linearise_strip(count: u32) -> impl Iterator<Item = u32> {
    (1..count).flat_map(|i| [i - 1, i])
}

/// A single point at corner 0
pub fn first_point() -> impl Iterator<Item = u32> {
    std::iter::once(0)
}
