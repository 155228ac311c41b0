//! Math utilities and types
//!
//! Provides the vector and matrix types used by scene geometry and the
//! render sequencer.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis used as the normal of geometry that has no surface (lines).
#[inline]
pub fn up_axis() -> Vec3 {
    Vec3::z()
}

/// Squared distance between two points.
///
/// Used for depth sorting, where only relative order matters.
#[inline]
pub fn distance_squared(a: &Vec3, b: &Vec3) -> f32 {
    (a - b).norm_squared()
}

/// Unit normal of the plane through three points, following the winding
/// `a -> b -> c`. Collinear points yield the zero vector.
pub fn plane_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    (b - a)
        .cross(&(c - a))
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vec3::zeros)
}

/// Arithmetic mean of a set of points, or the origin when empty.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Vec3 {
    let (sum, count) = points
        .into_iter()
        .fold((Vec3::zeros(), 0_u32), |(sum, n), p| (sum + p, n + 1));
    if count == 0 {
        Vec3::zeros()
    } else {
        sum / count as f32
    }
}
