//! Material references carried by renderables

use std::fmt;
use std::sync::Arc;

use crate::foundation::color::Rgba8;

/// Stable identifier of a material, used as the grouping and sorting key.
///
/// Cloning is cheap (shared string). Ordering is lexicographic on the
/// identifier, which is the order opaque polygon groups are drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(Arc<str>);

impl MaterialId {
    /// Create an identifier
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MaterialId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// The subset of material state the batcher needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Binding key
    pub id: MaterialId,
    /// Flat color written into every vertex
    pub color: Rgba8,
    /// Whether faces using this material are drawn in the sorted transparent pass
    pub has_transparency: bool,
}

impl Material {
    /// Create an opaque material
    pub fn new(id: impl Into<MaterialId>) -> Self {
        Self {
            id: id.into(),
            color: Rgba8::WHITE,
            has_transparency: false,
        }
    }

    /// Set the flat color
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    /// Mark as transparent
    pub fn with_transparency(mut self, has_transparency: bool) -> Self {
        self.has_transparency = has_transparency;
        self
    }
}
