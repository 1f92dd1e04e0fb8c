/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Channel swizzle selectors
//!
//! The codec boundary exchanges a per-channel remapping together with
//! every encode and decode request, this module defines that mapping.
//!
//! A swizzle never changes buffer contents, it only describes how the
//! codec should read or write the four stored channels.

/// A single channel source selector
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Swizzle {
    /// Take the red channel of the source texel
    R,
    /// Take the green channel of the source texel
    G,
    /// Take the blue channel of the source texel
    B,
    /// Take the alpha channel of the source texel
    A,
    /// Emit constant zero
    Zero,
    /// Emit constant full scale
    One,
    /// Reconstruct a unit vector Z component from the red and green
    /// channels, used when two-channel normal maps cross the codec
    /// boundary
    Z
}

/// A four channel swizzle, mapping each output channel to a source
/// selector.
///
/// The default mapping is the identity `RGBA` pass-through.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChannelSwizzle {
    pub r: Swizzle,
    pub g: Swizzle,
    pub b: Swizzle,
    pub a: Swizzle
}

impl Default for ChannelSwizzle {
    fn default() -> Self {
        ChannelSwizzle {
            r: Swizzle::R,
            g: Swizzle::G,
            b: Swizzle::B,
            a: Swizzle::A
        }
    }
}

impl ChannelSwizzle {
    /// Apply this swizzle to a single `[r, g, b, a]` texel.
    ///
    /// # Example
    /// ```
    /// use tessel_core::swizzle::{ChannelSwizzle, Swizzle};
    ///
    /// // store luminance + alpha as rrrg
    /// let swz = ChannelSwizzle {
    ///     r: Swizzle::R,
    ///     g: Swizzle::R,
    ///     b: Swizzle::R,
    ///     a: Swizzle::G
    /// };
    /// assert_eq!(swz.apply([0.5, 0.25, 0.0, 1.0]), [0.5, 0.5, 0.5, 0.25]);
    /// ```
    #[must_use]
    pub fn apply(&self, texel: [f32; 4]) -> [f32; 4] {
        [
            select(self.r, texel),
            select(self.g, texel),
            select(self.b, texel),
            select(self.a, texel)
        ]
    }
}

fn select(swizzle: Swizzle, texel: [f32; 4]) -> f32 {
    match swizzle {
        Swizzle::R => texel[0],
        Swizzle::G => texel[1],
        Swizzle::B => texel[2],
        Swizzle::A => texel[3],
        Swizzle::Zero => 0.0,
        Swizzle::One => 1.0,
        Swizzle::Z => {
            // r and g carry the x and y of a unit normal mapped into
            // 0..1, rebuild the implied z in the same encoding
            let x = texel[0].mul_add(2.0, -1.0);
            let y = texel[1].mul_add(2.0, -1.0);
            let z = (1.0 - x * x - y * y).max(0.0).sqrt();

            z.mul_add(0.5, 0.5)
        }
    }
}
