//! Vertex codec: renderable object -> run of vertices
//!
//! Pure functions. One vertex per primitive corner, in the primitive's own
//! order, so the offset table's `(first_vertex, vertex_count)` maps straight
//! back onto the object.

use crate::foundation::math::up_axis;
use crate::render::vertex::{Vertex, VertexFlags};
use crate::scene::{CameraFlags, Face, Line, RenderableObject};

/// Vertex flags hiding an object from every projection it is not visible under
pub fn camera_visibility(camera_flags: CameraFlags) -> VertexFlags {
    let mut flags = VertexFlags::empty();
    if !camera_flags.contains(CameraFlags::ORTHOGRAPHIC) {
        flags |= VertexFlags::INVISIBLE_ORTHOGRAPHIC;
    }
    if !camera_flags.contains(CameraFlags::PERSPECTIVE) {
        flags |= VertexFlags::INVISIBLE_PERSPECTIVE;
    }
    flags
}

/// Encode `object`, OR-ing `extra` into every vertex's flags.
pub fn encode(object: &RenderableObject, extra: VertexFlags) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(object.vertex_count());
    encode_into(object, extra, &mut out);
    out
}

/// Append the encoding of `object` to `out`.
pub fn encode_into(object: &RenderableObject, extra: VertexFlags, out: &mut Vec<Vertex>) {
    match object {
        RenderableObject::Face(face) => encode_face(face, extra, out),
        RenderableObject::Line(line) => encode_line(line, extra, out),
    }
}

/// Append the encoding of a face to `out`.
pub fn encode_face(face: &Face, extra: VertexFlags, out: &mut Vec<Vertex>) {
    let normal: [f32; 3] = face.plane_normal().into();
    let material_color = face.material.color.to_abgr();
    let accent_color = face.accent_color.to_abgr();
    let flags = (camera_visibility(face.state.camera_flags) | extra).bits();

    out.extend(face.vertices.iter().map(|v| Vertex {
        position: v.position.into(),
        normal,
        texture: v.texture.into(),
        material_color,
        accent_color,
        tint_color: accent_color,
        flags,
    }));
}

/// Append the encoding of a line to `out`.
pub fn encode_line(line: &Line, extra: VertexFlags, out: &mut Vec<Vertex>) {
    let normal: [f32; 3] = up_axis().into();
    let material_color = line.color.to_abgr();
    let accent_color = line.accent_color.to_abgr();
    let flags = (camera_visibility(line.state.camera_flags) | extra).bits();

    out.extend(line.vertices.iter().map(|p| Vertex {
        position: (*p).into(),
        normal,
        texture: [0.0, 0.0],
        material_color,
        accent_color,
        tint_color: accent_color,
        flags,
    }));
}
