/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image bit depth information
//!
//! The bit depth tag names the storage representation of a buffer,
//! it is the discriminant of the texel store so a buffer always has
//! exactly one live representation.

/// The pixel storage depth of an image buffer.
///
/// There are exactly two representations, the low dynamic range one
/// backed by `u8` components and the wide one backed by `f32`
/// components holding linear light values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BitDepth {
    /// Eight bit unsigned components.
    ///
    /// Uses the whole 0-255 range, alpha at 255 is fully opaque.
    Eight,
    /// 32-bit float components.
    ///
    /// Values are linear light, nominally inside `0.0..=1.0` for
    /// display range content but unbounded above for HDR content.
    ///
    /// Wide content is kept as `f32` rather than a packed half float
    /// so that lifting and lowering flat arrays never quantizes.
    F32
}

impl BitDepth {
    /// Number of bytes a single component of this depth occupies.
    ///
    /// # Example
    /// ```
    /// use tessel_core::bit_depth::BitDepth;
    ///
    /// assert_eq!(BitDepth::Eight.size_of(), 1);
    /// assert_eq!(BitDepth::F32.size_of(), 4);
    /// ```
    pub const fn size_of(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::F32 => 4
        }
    }

    /// The full scale value of a component at this depth.
    ///
    /// Values above this are representable for [`BitDepth::F32`] but
    /// fall outside the display range.
    pub const fn max_value(self) -> f32 {
        match self {
            Self::Eight => 255.0,
            Self::F32 => 1.0
        }
    }

    /// Return true if this depth can hold values outside display range
    pub const fn is_hdr(self) -> bool {
        matches!(self, Self::F32)
    }
}

#[cfg(test)]
mod tests {
    use crate::bit_depth::BitDepth;

    #[test]
    fn full_scale_matches_depth() {
        assert_eq!(BitDepth::Eight.max_value(), 255.0);
        assert_eq!(BitDepth::F32.max_value(), 1.0);
        assert!(!BitDepth::Eight.is_hdr());
        assert!(BitDepth::F32.is_hdr());
    }
}
