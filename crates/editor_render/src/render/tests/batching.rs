use super::*;
use crate::config::BatcherConfig;
use crate::render::{BatchError, RenderableVertexArray, SubsetKind, SubsetTag, Vertex, VertexFlags};
use crate::scene::{CameraFlags, RenderableObject, RenderableStore};

fn build(scene: &RenderableStore) -> RenderableVertexArray {
    let mut array = RenderableVertexArray::new();
    array.create_array(scene.iter()).unwrap();
    array
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut scene = RenderableStore::new();
    scene.insert(quad("brick", RenderFlags::all()));
    scene.insert(glass_at(Vec3::new(0.0, 0.0, 5.0)));
    scene.insert(quad("stone", RenderFlags::POLYGON));
    scene.insert(segment(RenderFlags::WIREFRAME | RenderFlags::POINT));

    let mut array = build(&scene);
    let vertices = array.vertices().to_vec();
    let indices = array.indices().to_vec();
    let subsets: Vec<_> = SubsetKind::ALL
        .iter()
        .map(|&kind| array.subsets(kind).to_vec())
        .collect();

    array.create_array(scene.iter()).unwrap();
    assert_eq!(array.vertices(), vertices.as_slice());
    assert_eq!(array.indices(), indices.as_slice());
    for (kind, before) in SubsetKind::ALL.iter().zip(&subsets) {
        assert_eq!(array.subsets(*kind), before.as_slice());
    }
}

#[test]
fn test_objects_without_render_flags_get_no_slot() {
    let mut scene = RenderableStore::new();
    let hidden = scene.insert(quad("brick", RenderFlags::empty()));
    let hidden_line = scene.insert(segment(RenderFlags::empty()));
    let shown = scene.insert(quad("brick", RenderFlags::POLYGON));

    let array = build(&scene);
    assert_eq!(array.lookup(hidden), None);
    assert_eq!(array.lookup(hidden_line), None);
    assert!(array.lookup(shown).is_some());
    assert_eq!(array.offsets().len(), 1);
    assert_eq!(array.vertices().len(), 4);
    assert_eq!(array.stats().filtered, 2);

    // Still known to the array, just not slotted.
    assert!(array.contains(hidden));
}

#[test]
fn test_buffer_length_is_sum_of_vertex_counts() {
    let mut scene = RenderableStore::new();
    for n in 3..8 {
        scene.insert(polygon(n, Material::new("m"), RenderFlags::POLYGON, Vec3::zeros()));
    }
    scene.insert(segment(RenderFlags::WIREFRAME));

    let array = build(&scene);
    assert_eq!(array.vertices().len(), (3..8).sum::<usize>() + 2);

    let mut slots: Vec<_> = array.offsets().iter().map(|(_, slot)| slot.range()).collect();
    slots.sort_by_key(|r| r.start);
    assert!(slots.windows(2).all(|w| w[0].end == w[1].start));
}

#[test]
fn test_fan_triangulation_count() {
    for n in 3..10 {
        let mut scene = RenderableStore::new();
        scene.insert(polygon(n, Material::new("m"), RenderFlags::POLYGON, Vec3::zeros()));
        let array = build(&scene);
        let count = array.subset_index().index_count(SubsetKind::FacePolygons);
        assert_eq!(count, 3 * (n - 2), "{n}-gon");
    }
}

#[test]
fn test_wireframe_loop_closes() {
    let mut scene = RenderableStore::new();
    scene.insert(segment(RenderFlags::WIREFRAME));
    let face = scene.insert(polygon(5, Material::new("m"), RenderFlags::WIREFRAME, Vec3::zeros()));

    let array = build(&scene);
    let first = array.lookup(face).unwrap().first_vertex;
    let wire = &array.subsets(SubsetKind::FaceWireframe)[0];
    let pairs: Vec<_> = array
        .subset_index()
        .range_indices(wire)
        .chunks(2)
        .map(|pair| (pair[0] - first, pair[1] - first))
        .collect();

    assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
}

#[test]
fn test_forced_flags_take_precedence() {
    let mut face = quad("brick", RenderFlags::all());
    face.state.forced_render_flags = RenderFlags::POLYGON | RenderFlags::POINT;
    let mut scene = RenderableStore::new();
    scene.insert(face);

    let array = build(&scene);
    let index = array.subset_index();
    assert_eq!(index.index_count(SubsetKind::ForcedPolygons), 6);
    assert_eq!(index.index_count(SubsetKind::FacePolygons), 0);
    assert_eq!(index.index_count(SubsetKind::ForcedPoints), 1);
    assert_eq!(index.index_count(SubsetKind::FacePoints), 0);
    assert_eq!(index.index_count(SubsetKind::FaceWireframe), 8);
    assert_eq!(index.index_count(SubsetKind::ForcedWireframe), 0);
}

#[test]
fn test_transparent_faces_leave_opaque_subsets() {
    let mut scene = RenderableStore::new();
    let glass = scene.insert(glass_at(Vec3::new(1.0, 2.0, 3.0)));

    let array = build(&scene);
    let index = array.subset_index();
    assert_eq!(index.index_count(SubsetKind::FacePolygons), 0);
    assert_eq!(index.index_count(SubsetKind::FaceTransparentPolygons), 3);

    let tagged: Vec<_> = array
        .subsets(SubsetKind::FaceTransparentPolygons)
        .iter()
        .filter_map(|s| s.tag.as_ref())
        .collect();
    assert_eq!(tagged.len(), 1);
    assert!(matches!(
        tagged[0],
        SubsetTag::TransparentFace { object, .. } if *object == glass
    ));
    assert_eq!(array.stats().transparent_faces, 1);
}

#[test]
fn test_every_kind_ends_with_one_untagged_range() {
    let mut scene = RenderableStore::new();
    scene.insert(quad("a", RenderFlags::all()));
    scene.insert(quad("b", RenderFlags::all()));
    scene.insert(glass_at(Vec3::zeros()));
    scene.insert(segment(RenderFlags::all()));

    let array = build(&scene);
    for kind in SubsetKind::ALL {
        let ranges = array.subsets(kind);
        let untagged = ranges.iter().filter(|s| s.tag.is_none()).count();
        assert_eq!(untagged, 1, "{kind:?}");
        assert!(ranges.last().unwrap().tag.is_none(), "{kind:?}");
        if kind.is_grouped() {
            assert!(ranges.last().unwrap().is_empty(), "{kind:?}");
        }
    }
}

#[test]
fn test_material_groups_are_contiguous() {
    let mut scene = RenderableStore::new();
    let mut ids = Vec::new();
    for material in ["a", "b", "a", "c", "b", "a"] {
        ids.push((material, scene.insert(quad(material, RenderFlags::POLYGON))));
    }

    let array = build(&scene);
    let tags: Vec<_> = array
        .subsets(SubsetKind::FacePolygons)
        .iter()
        .filter_map(|s| s.tag.as_ref().map(|t| t.material().to_string()))
        .collect();
    assert_eq!(tags, vec!["a", "b", "c"]);

    for group in ["a", "b", "c"] {
        let mut starts: Vec<_> = ids
            .iter()
            .filter(|(m, _)| *m == group)
            .map(|(_, id)| array.lookup(*id).unwrap().range())
            .collect();
        starts.sort_by_key(|r| r.start);
        assert!(starts.windows(2).all(|w| w[0].end == w[1].start), "{group}");
    }

    // Each tagged range covers exactly its group's faces.
    let range_a = &array.subsets(SubsetKind::FacePolygons)[0];
    assert_eq!(range_a.index_count, 3 * 6);
    assert_eq!(array.stats().material_groups, 3);
}

#[test]
fn test_materials_lists_distinct_face_materials() {
    let mut scene = RenderableStore::new();
    scene.insert(quad("stone", RenderFlags::POLYGON));
    scene.insert(quad("brick", RenderFlags::POLYGON));
    scene.insert(quad("stone", RenderFlags::POLYGON));
    scene.insert(segment(RenderFlags::WIREFRAME));

    let array = build(&scene);
    assert_eq!(
        array.materials(),
        vec![MaterialId::from("stone"), MaterialId::from("brick")]
    );
}

#[test]
fn test_partial_update_preserves_structure() {
    let mut scene = RenderableStore::new();
    scene.insert(quad("a", RenderFlags::all()));
    let target = scene.insert(quad("a", RenderFlags::all()));
    scene.insert(segment(RenderFlags::all()));

    let mut array = build(&scene);
    let vertices = array.vertices().to_vec();
    let counts: Vec<_> = SubsetKind::ALL
        .iter()
        .map(|&kind| array.subset_index().index_count(kind))
        .collect();

    if let Some(RenderableObject::Face(face)) = scene.get_mut(target) {
        face.vertices[0].position += Vec3::new(0.0, 0.0, 10.0);
    }
    let patched = array.update_partial(scene.select(&[target])).unwrap();
    assert_eq!(patched, 1);

    assert_eq!(array.vertices().len(), vertices.len());
    for (kind, count) in SubsetKind::ALL.iter().zip(&counts) {
        assert_eq!(array.subset_index().index_count(*kind), *count);
    }

    let slot = array.lookup(target).unwrap().range();
    for (i, (old, new)) in vertices.iter().zip(array.vertices()).enumerate() {
        if i == slot.start {
            assert_ne!(old.position, new.position);
        } else {
            assert_eq!(old.position, new.position, "vertex {i}");
        }
    }
}

#[test]
fn test_partial_update_skips_unknown_objects() {
    let mut scene = RenderableStore::new();
    let hidden = scene.insert(quad("a", RenderFlags::empty()));
    let mut array = build(&scene);
    let late = scene.insert(quad("a", RenderFlags::POLYGON));

    assert_eq!(array.update_partial(scene.select(&[hidden, late])).unwrap(), 0);
    assert!(array.vertices().is_empty());
}

#[test]
fn test_partial_update_rejects_vertex_count_change() {
    let mut scene = RenderableStore::new();
    let id = scene.insert(quad("a", RenderFlags::POLYGON));
    let mut array = build(&scene);

    if let Some(RenderableObject::Face(face)) = scene.get_mut(id) {
        face.vertices.pop();
    }
    let err = array.update_partial(scene.select(&[id])).unwrap_err();
    assert!(matches!(
        err,
        BatchError::VertexCountChanged { expected: 4, actual: 3, .. }
    ));
}

#[test]
fn test_partial_update_patches_past_count_mismatch() {
    let mut scene = RenderableStore::new();
    let shrunk = scene.insert(quad("a", RenderFlags::POLYGON));
    let moved = scene.insert(quad("a", RenderFlags::POLYGON));
    let mut array = build(&scene);
    let shrunk_before = array.vertices()[array.lookup(shrunk).unwrap().range()].to_vec();

    if let Some(RenderableObject::Face(face)) = scene.get_mut(shrunk) {
        face.vertices.pop();
    }
    if let Some(RenderableObject::Face(face)) = scene.get_mut(moved) {
        face.vertices[0].position.z = 7.0;
    }
    let err = array.update_partial(scene.select(&[shrunk, moved])).unwrap_err();
    assert!(matches!(err, BatchError::VertexCountChanged { object, .. } if object == shrunk));

    let moved_slot = array.lookup(moved).unwrap();
    assert_eq!(array.vertices()[moved_slot.first_vertex as usize].position[2], 7.0);
    assert_eq!(
        &array.vertices()[array.lookup(shrunk).unwrap().range()],
        shrunk_before.as_slice()
    );
}

#[test]
fn test_failed_rebuild_leaves_array_cleared() {
    let mut scene = RenderableStore::new();
    let first = scene.insert(quad("a", RenderFlags::POLYGON));
    let mut array = RenderableVertexArray::with_config(BatcherConfig {
        max_vertices: 6,
        ..BatcherConfig::default()
    });
    array.create_array(scene.iter()).unwrap();
    array.sync(&mut RecordingSink::default());
    assert!(array.lookup(first).is_some());

    let second = scene.insert(quad("b", RenderFlags::POLYGON));
    let err = array.create_array(scene.iter()).unwrap_err();
    assert!(matches!(err, BatchError::BufferOverflow { vertices: 8, limit: 6 }));

    assert!(array.vertices().is_empty());
    assert!(array.indices().is_empty());
    assert!(array.offsets().is_empty());
    assert!(array.materials().is_empty());
    assert!(!array.contains(first) && !array.contains(second));
    assert!(SubsetKind::ALL.iter().all(|&kind| array.subsets(kind).is_empty()));

    let mut sink = RecordingSink::default();
    array.sync(&mut sink);
    assert_eq!(sink.replaced, vec![(0, 0)]);
}

#[test]
fn test_delete_makes_slot_invisible() {
    let mut face = quad("a", RenderFlags::POLYGON);
    face.state.camera_flags = CameraFlags::PERSPECTIVE;
    let mut scene = RenderableStore::new();
    let keep = scene.insert(quad("a", RenderFlags::POLYGON));
    let gone = scene.insert(face);

    let mut array = build(&scene);
    let indices = array.indices().to_vec();
    assert_eq!(array.delete_partial(scene.select(&[gone])).unwrap(), 1);

    let slot = array.lookup(gone).unwrap().range();
    assert!(array.vertices()[slot]
        .iter()
        .all(|v| v.vertex_flags().contains(VertexFlags::INVISIBLE)));
    let kept = array.lookup(keep).unwrap().range();
    assert!(array.vertices()[kept].iter().all(|v| v.vertex_flags().is_empty()));
    assert_eq!(array.indices(), indices.as_slice());

    // Updating restores visibility until the next rebuild.
    array.update_partial(scene.select(&[gone])).unwrap();
    let slot = array.lookup(gone).unwrap().range();
    assert!(array.vertices()[slot]
        .iter()
        .all(|v| v.vertex_flags() == VertexFlags::INVISIBLE_ORTHOGRAPHIC));
}

#[test]
fn test_sync_uploads_full_then_dirty_ranges() {
    let mut scene = RenderableStore::new();
    let a = scene.insert(quad("a", RenderFlags::POLYGON));
    let b = scene.insert(quad("a", RenderFlags::POLYGON));
    let c = scene.insert(segment(RenderFlags::WIREFRAME));

    let mut array = build(&scene);
    let mut sink = RecordingSink::default();
    array.sync(&mut sink);
    assert_eq!(
        sink.replaced,
        vec![(10 * Vertex::STRIDE, array.indices().len() * 4)]
    );
    assert!(!array.has_pending_upload());

    array.update_partial(scene.select(&[c, a, b])).unwrap();
    array.sync(&mut sink);
    assert_eq!(sink.writes, vec![(0, 10 * Vertex::STRIDE)]);

    array.sync(&mut sink);
    assert_eq!(sink.writes.len(), 1);
    assert_eq!(sink.replaced.len(), 1);
}

#[test]
fn test_clear_empties_everything() {
    let mut scene = RenderableStore::new();
    let id = scene.insert(quad("a", RenderFlags::POLYGON));
    let mut array = build(&scene);
    let mut sink = RecordingSink::default();
    array.sync(&mut sink);

    array.clear();
    assert!(array.vertices().is_empty());
    assert!(array.indices().is_empty());
    assert_eq!(array.lookup(id), None);
    assert!(!array.contains(id));
    assert!(array.has_pending_upload());
}
