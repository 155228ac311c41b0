//! Viewport demo application
//!
//! Builds a small editor scene, batches it, and replays one frame per
//! projection through logging stand-ins for the GPU. Run with
//! `RUST_LOG=debug` to see every call.

use editor_render::foundation::logging;
use editor_render::prelude::*;

/// Logs draw calls instead of issuing them
#[derive(Default)]
struct LoggingAdapter {
    calls: usize,
}

impl GraphicsAdapter for LoggingAdapter {
    fn set_camera(&mut self, _camera_matrix: &Mat4, _viewport_matrix: &Mat4) {
        log::debug!("set camera");
    }

    fn set_projection_mode(&mut self, mode: ProjectionMode) {
        log::debug!("projection: {mode:?}");
    }

    fn set_wireframe_mode(&mut self, enabled: bool) {
        log::debug!("wireframe mode: {enabled}");
    }

    fn bind_material(&mut self, material: &MaterialId) {
        log::debug!("bind material '{material}'");
    }

    fn draw_range(&mut self, primitive: PrimitiveKind, first_index: u32, index_count: u32) {
        self.calls += 1;
        log::debug!("draw {primitive:?} [{first_index}, +{index_count})");
    }
}

/// Logs uploads instead of writing GPU memory
#[derive(Default)]
struct LoggingSink {
    bytes: usize,
}

impl BufferSink for LoggingSink {
    fn replace_buffers(&mut self, vertices: &[u8], indices: &[u8]) {
        self.bytes += vertices.len() + indices.len();
        log::info!(
            "upload: {} vertex bytes, {} index bytes",
            vertices.len(),
            indices.len()
        );
    }

    fn write_vertices(&mut self, first_vertex: u32, vertices: &[u8]) {
        self.bytes += vertices.len();
        log::info!("patch: {} bytes at vertex {first_vertex}", vertices.len());
    }
}

fn quad(state: RenderState, material: Material, origin: Vec3, u: Vec3, v: Vec3) -> Face {
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    Face::new(
        state,
        material,
        corners
            .iter()
            .map(|&(s, t)| FaceVertex::new(origin + u * s + v * t, Vec2::new(s, t)))
            .collect(),
    )
}

struct DemoScene {
    store: RenderableStore,
    wall: ObjectId,
    window: ObjectId,
}

fn build_scene() -> DemoScene {
    let mut store = RenderableStore::new();
    let solid = RenderState::new(RenderFlags::POLYGON | RenderFlags::WIREFRAME);

    store.insert(quad(
        solid,
        Material::new("brick").with_color(Rgba8::rgb(150, 60, 40)),
        Vec3::new(-4.0, -4.0, 0.0),
        Vec3::new(8.0, 0.0, 0.0),
        Vec3::new(0.0, 8.0, 0.0),
    ));
    let wall = store.insert(quad(
        solid,
        Material::new("stone").with_color(Rgba8::rgb(120, 120, 120)),
        Vec3::new(-4.0, 4.0, 0.0),
        Vec3::new(8.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 3.0),
    ));
    let window = store.insert(quad(
        RenderState::new(RenderFlags::POLYGON),
        Material::new("glass")
            .with_color(Rgba8::new(180, 220, 255, 96))
            .with_transparency(true),
        Vec3::new(-1.0, 3.9, 1.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ));

    // Selection outline: forced so it survives every viewport toggle
    let mut outline = RenderState::new(RenderFlags::WIREFRAME);
    outline.forced_render_flags = RenderFlags::WIREFRAME | RenderFlags::POINT;
    store.insert(
        Line::new(
            outline,
            Vec3::new(-4.0, -4.0, 0.0),
            Vec3::new(-4.0, -4.0, 3.0),
            Rgba8::rgb(255, 200, 0),
        )
        .with_accent_color(Rgba8::rgb(255, 255, 0)),
    );

    // Hidden helper geometry, filtered out of the buffers
    store.insert(quad(
        RenderState::default(),
        Material::new("helper"),
        Vec3::zeros(),
        Vec3::x(),
        Vec3::y(),
    ));

    DemoScene {
        store,
        wall,
        window,
    }
}

fn draw(array: &RenderableVertexArray, config: &EditorRenderConfig, projection: ProjectionMode) {
    let eye = Vec3::new(0.0, -12.0, 6.0);
    let view = ViewState::new(eye, projection)
        .with_matrices(
            Mat4::new_translation(&-eye),
            Mat4::new_perspective(16.0 / 9.0, 0.8, 0.1, 100.0),
        )
        .with_options(config.render_options);

    let mut adapter = LoggingAdapter::default();
    let stats = array.render(&mut adapter, &view);
    log::info!(
        "{projection:?}: {} draw calls, {} material binds, {} empty ranges skipped",
        stats.draw_calls,
        stats.material_binds,
        stats.skipped_ranges
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "viewport.toml".to_string());
    let config = EditorRenderConfig::load_or_default(&config_path);
    log::info!("Using render options: {:?}", config.render_options);

    let mut scene = build_scene();
    let mut array = RenderableVertexArray::with_config(config.batcher);
    let mut sink = LoggingSink::default();

    array.create_array(scene.store.iter())?;
    array.sync(&mut sink);
    log::info!("Materials in use: {:?}", array.materials());

    draw(&array, &config, ProjectionMode::Perspective);
    draw(&array, &config, ProjectionMode::Orthographic);

    // Slide the window along the wall without a rebuild
    if let Some(RenderableObject::Face(face)) = scene.store.get_mut(scene.window) {
        for vertex in &mut face.vertices {
            vertex.position.x += 1.5;
        }
        face.origin.x += 1.5;
    }
    array.update_partial(scene.store.select(&[scene.window]))?;
    array.sync(&mut sink);

    array.delete_partial(scene.store.select(&[scene.wall]))?;
    array.sync(&mut sink);
    draw(&array, &config, ProjectionMode::Perspective);

    let stats = array.stats();
    println!(
        "{} objects ({} filtered), {} vertices, {} indices, {} material groups, {} transparent faces, built in {}us, {} bytes uploaded",
        stats.objects,
        stats.filtered,
        stats.vertices,
        stats.indices,
        stats.material_groups,
        stats.transparent_faces,
        stats.build_time_us,
        sink.bytes
    );

    Ok(())
}
