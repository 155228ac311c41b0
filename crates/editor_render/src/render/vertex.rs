//! Vertex layout shared by every primitive in the batched buffer
//!
//! The layout is backend-agnostic: adapters build their vertex input state
//! from [`Vertex::ATTRIBUTES`] instead of hard-coding offsets.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

bitflags! {
    /// Per-vertex rendering modifiers evaluated by the shader
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VertexFlags: u32 {
        /// Discarded when the viewport uses an orthographic projection
        const INVISIBLE_ORTHOGRAPHIC = 1 << 0;
        /// Discarded when the viewport uses a perspective projection
        const INVISIBLE_PERSPECTIVE = 1 << 1;
        /// Discarded under every projection
        const INVISIBLE = Self::INVISIBLE_ORTHOGRAPHIC.bits() | Self::INVISIBLE_PERSPECTIVE.bits();
    }
}

/// One entry of the batched vertex buffer.
///
/// `#[repr(C)]` with no padding, so the buffer can be uploaded as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Flat surface normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub texture: [f32; 2],
    /// Material color, packed ABGR
    pub material_color: u32,
    /// Accent color, packed ABGR
    pub accent_color: u32,
    /// Tint color, packed ABGR
    pub tint_color: u32,
    /// Raw [`VertexFlags`] bits
    pub flags: u32,
}

/// Component format of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFormat {
    /// Two 32-bit floats
    Float32x2,
    /// Three 32-bit floats
    Float32x3,
    /// One 32-bit unsigned integer
    Uint32,
}

/// Location, format and byte offset of one vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub location: u32,
    /// Component format
    pub format: AttributeFormat,
    /// Byte offset inside [`Vertex`]
    pub offset: u32,
}

impl Vertex {
    /// Size of one vertex in bytes
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Attribute table matching the field order of [`Vertex`]
    pub const ATTRIBUTES: [VertexAttribute; 7] = [
        VertexAttribute { location: 0, format: AttributeFormat::Float32x3, offset: 0 },
        VertexAttribute { location: 1, format: AttributeFormat::Float32x3, offset: 12 },
        VertexAttribute { location: 2, format: AttributeFormat::Float32x2, offset: 24 },
        VertexAttribute { location: 3, format: AttributeFormat::Uint32, offset: 32 },
        VertexAttribute { location: 4, format: AttributeFormat::Uint32, offset: 36 },
        VertexAttribute { location: 5, format: AttributeFormat::Uint32, offset: 40 },
        VertexAttribute { location: 6, format: AttributeFormat::Uint32, offset: 44 },
    ];

    /// Decoded flag bits
    #[inline]
    pub const fn vertex_flags(&self) -> VertexFlags {
        VertexFlags::from_bits_truncate(self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn test_layout_matches_attributes() {
        assert_eq!(Vertex::STRIDE, 48);
        let offsets = [
            offset_of!(Vertex, position),
            offset_of!(Vertex, normal),
            offset_of!(Vertex, texture),
            offset_of!(Vertex, material_color),
            offset_of!(Vertex, accent_color),
            offset_of!(Vertex, tint_color),
            offset_of!(Vertex, flags),
        ];
        for (attribute, offset) in Vertex::ATTRIBUTES.iter().zip(offsets) {
            assert_eq!(attribute.offset as usize, offset);
        }
    }

    #[test]
    fn test_invisible_is_both_projections() {
        let v = Vertex {
            flags: VertexFlags::INVISIBLE.bits(),
            ..Default::default()
        };
        assert!(v.vertex_flags().contains(VertexFlags::INVISIBLE_ORTHOGRAPHIC));
        assert!(v.vertex_flags().contains(VertexFlags::INVISIBLE_PERSPECTIVE));
    }
}
