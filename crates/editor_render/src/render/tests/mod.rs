//! Scenario tests for the batcher and sequencer, driven by recording fakes

mod batching;

use crate::foundation::color::Rgba8;
use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::render::{BufferSink, GraphicsAdapter, PrimitiveKind, ProjectionMode};
use crate::scene::{Face, FaceVertex, Line, Material, MaterialId, RenderFlags, RenderState};

/// One adapter call, in submission order
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Call {
    Camera,
    Projection(ProjectionMode),
    Wireframe(bool),
    Bind(String),
    Draw(PrimitiveKind, u32, u32),
}

#[derive(Debug, Default)]
pub(super) struct RecordingAdapter {
    pub calls: Vec<Call>,
}

impl RecordingAdapter {
    pub fn binds(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Bind(material) => Some(material.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self, primitive: PrimitiveKind) -> Vec<(u32, u32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(p, first, count) if *p == primitive => Some((*first, *count)),
                _ => None,
            })
            .collect()
    }
}

impl GraphicsAdapter for RecordingAdapter {
    fn set_camera(&mut self, _camera_matrix: &Mat4, _viewport_matrix: &Mat4) {
        self.calls.push(Call::Camera);
    }

    fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.calls.push(Call::Projection(mode));
    }

    fn set_wireframe_mode(&mut self, enabled: bool) {
        self.calls.push(Call::Wireframe(enabled));
    }

    fn bind_material(&mut self, material: &MaterialId) {
        self.calls.push(Call::Bind(material.to_string()));
    }

    fn draw_range(&mut self, primitive: PrimitiveKind, first_index: u32, index_count: u32) {
        self.calls.push(Call::Draw(primitive, first_index, index_count));
    }
}

/// Records byte lengths of every upload
#[derive(Debug, Default)]
pub(super) struct RecordingSink {
    pub replaced: Vec<(usize, usize)>,
    pub writes: Vec<(u32, usize)>,
}

impl BufferSink for RecordingSink {
    fn replace_buffers(&mut self, vertices: &[u8], indices: &[u8]) {
        self.replaced.push((vertices.len(), indices.len()));
    }

    fn write_vertices(&mut self, first_vertex: u32, vertices: &[u8]) {
        self.writes.push((first_vertex, vertices.len()));
    }
}

/// Regular `n`-gon of radius 1 around `center`, in the XY plane
pub(super) fn polygon(n: usize, material: Material, flags: RenderFlags, center: Vec3) -> Face {
    let corners = (0..n)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / n as f32;
            let (s, c) = angle.sin_cos();
            FaceVertex::new(center + Vec3::new(c, s, 0.0), Vec2::new(c, s))
        })
        .collect();
    Face::new(RenderState::new(flags), material, corners)
}

pub(super) fn quad(material: &str, flags: RenderFlags) -> Face {
    polygon(4, Material::new(material), flags, Vec3::zeros())
}

pub(super) fn glass_at(center: Vec3) -> Face {
    polygon(
        3,
        Material::new("glass").with_transparency(true),
        RenderFlags::POLYGON,
        center,
    )
}

pub(super) fn segment(flags: RenderFlags) -> Line {
    Line::new(
        RenderState::new(flags),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        Rgba8::rgb(0, 255, 0),
    )
}
