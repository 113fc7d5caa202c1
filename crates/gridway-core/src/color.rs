//! Packed RGB [`Color`] used for map rendering and bitmap import.

use std::fmt;

/// 24-bit colour stored as `0x00RRGGBB`.
///
/// Use [`Color::from_packed`] for host-supplied integers whose high byte
/// may be set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xFFFFFF);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([0, r, g, b]))
    }

    /// Keep the low 24 bits of `rgb`.
    #[inline]
    pub const fn from_packed(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    /// `[r, g, b]`, the byte order `image` uses for RGB pixels.
    #[inline]
    pub const fn to_rgb(self) -> [u8; 3] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r, g, b]
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.to_rgb()[0]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.to_rgb()[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.to_rgb()[2]
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}
