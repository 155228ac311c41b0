//! Packed colors for vertex data

use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color with 8 bits per channel.
///
/// Vertices carry colors packed into a single `u32` (see [`Rgba8::to_abgr`]),
/// which keeps the vertex record small and lets shaders unpack with a single
/// `unpackUnorm4x8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Opaque black
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Create a color from its channels
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Pack as `0xAABBGGRR`, i.e. bytes `[r, g, b, a]` in little-endian memory order.
    #[inline]
    pub const fn to_abgr(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    /// Inverse of [`Rgba8::to_abgr`].
    #[inline]
    pub const fn from_abgr(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self { r, g, b, a }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abgr_layout() {
        let c = Rgba8::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_abgr(), 0x4433_2211);
        assert_eq!(Rgba8::from_abgr(0x4433_2211), c);
    }
}
