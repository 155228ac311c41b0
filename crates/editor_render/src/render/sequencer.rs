//! Render sequencer: replays subsets in a fixed phase order
//!
//! 1. Opaque polygons, grouped by material (ascending identifier)
//! 2. Wireframe
//! 3. Points
//! 4. Transparent polygons, back-to-front from the eye, using each face's
//!    current depth origin
//!
//! Shader state changes once per phase, never per draw call.

use crate::foundation::math::distance_squared;
use crate::render::adapter::GraphicsAdapter;
use crate::render::options::ViewState;
use crate::render::subset::{PrimitiveKind, Subset, SubsetIndex, SubsetKind, SubsetTag};
use crate::scene::MaterialId;

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Draw calls issued
    pub draw_calls: usize,
    /// Material binds issued
    pub material_binds: usize,
    /// Ranges skipped because they were empty
    pub skipped_ranges: usize,
}

/// Issues draw calls for a [`SubsetIndex`]
#[derive(Debug, Default)]
pub struct RenderSequencer {
    stats: FrameStats,
}

impl RenderSequencer {
    /// Create a sequencer
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the last frame
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Draw every enabled subset of `subsets` through `adapter`
    pub fn render<A>(&mut self, subsets: &SubsetIndex, adapter: &mut A, view: &ViewState) -> FrameStats
    where
        A: GraphicsAdapter + ?Sized,
    {
        self.stats = FrameStats::default();
        let options = &view.options;

        adapter.set_camera(&view.camera_matrix, &view.viewport_matrix);
        adapter.set_projection_mode(view.projection);
        adapter.set_wireframe_mode(false);

        // Opaque polygons
        let mut opaque: Vec<(&MaterialId, &Subset)> = gather(
            subsets,
            &[
                (SubsetKind::ForcedPolygons, true),
                (SubsetKind::FacePolygons, options.render_face_polygons),
            ],
        )
        .filter_map(|subset| match &subset.tag {
            Some(SubsetTag::Material(material)) => Some((material, subset)),
            _ => None,
        })
        .collect();
        // Forced and optional groups were concatenated; regroup them.
        opaque.sort_by(|a, b| a.0.cmp(b.0));
        self.draw_with_materials(adapter, PrimitiveKind::Triangles, opaque);

        adapter.set_wireframe_mode(true);

        let wireframe = gather(
            subsets,
            &[
                (SubsetKind::ForcedWireframe, true),
                (SubsetKind::FaceWireframe, options.render_face_wireframe),
                (SubsetKind::LineWireframe, options.render_line_wireframe),
            ],
        );
        self.draw_all(adapter, PrimitiveKind::Lines, wireframe);

        let points = gather(
            subsets,
            &[
                (SubsetKind::ForcedPoints, true),
                (SubsetKind::FacePoints, options.render_face_points),
                (SubsetKind::LinePoints, options.render_line_points),
            ],
        );
        self.draw_all(adapter, PrimitiveKind::Points, points);

        adapter.set_wireframe_mode(false);

        // Transparent polygons, painter's order
        let mut transparent: Vec<(f32, &MaterialId, &Subset)> = gather(
            subsets,
            &[
                (SubsetKind::ForcedTransparentPolygons, true),
                (SubsetKind::FaceTransparentPolygons, options.render_face_polygons),
            ],
        )
        .filter_map(|subset| match &subset.tag {
            Some(SubsetTag::TransparentFace { object, material }) => {
                let origin = subsets.depth_origin(*object)?;
                Some((distance_squared(&view.eye, &origin), material, subset))
            }
            _ => None,
        })
        .collect();
        transparent.sort_by(|a, b| b.0.total_cmp(&a.0));
        self.draw_with_materials(
            adapter,
            PrimitiveKind::Triangles,
            transparent.into_iter().map(|(_, material, subset)| (material, subset)),
        );

        log::trace!(
            "rendered {} draw calls, {} material binds",
            self.stats.draw_calls,
            self.stats.material_binds
        );
        self.stats
    }

    fn draw_with_materials<'s, A>(
        &mut self,
        adapter: &mut A,
        primitive: PrimitiveKind,
        ranges: impl IntoIterator<Item = (&'s MaterialId, &'s Subset)>,
    ) where
        A: GraphicsAdapter + ?Sized,
    {
        let mut bound: Option<&MaterialId> = None;
        for (material, subset) in ranges {
            if subset.is_empty() {
                self.stats.skipped_ranges += 1;
                continue;
            }
            if bound != Some(material) {
                adapter.bind_material(material);
                self.stats.material_binds += 1;
                bound = Some(material);
            }
            self.draw(adapter, primitive, subset);
        }
    }

    fn draw_all<'s, A>(
        &mut self,
        adapter: &mut A,
        primitive: PrimitiveKind,
        ranges: impl IntoIterator<Item = &'s Subset>,
    ) where
        A: GraphicsAdapter + ?Sized,
    {
        for subset in ranges {
            if subset.is_empty() {
                self.stats.skipped_ranges += 1;
                continue;
            }
            self.draw(adapter, primitive, subset);
        }
    }

    fn draw<A>(&mut self, adapter: &mut A, primitive: PrimitiveKind, subset: &Subset)
    where
        A: GraphicsAdapter + ?Sized,
    {
        adapter.draw_range(primitive, subset.first_index, subset.index_count);
        self.stats.draw_calls += 1;
    }
}

/// Ranges of every enabled kind, kinds in the given order
fn gather<'s>(
    subsets: &'s SubsetIndex,
    kinds: &[(SubsetKind, bool)],
) -> impl Iterator<Item = &'s Subset> {
    let enabled: Vec<SubsetKind> = kinds
        .iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(kind, _)| *kind)
        .collect();
    enabled
        .into_iter()
        .flat_map(move |kind| subsets.subsets(kind).iter())
}
