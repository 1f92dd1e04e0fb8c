/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single padded image buffer
//!
//! An image is represented as
//!
//! - one texel store of a certain bit depth
//!     - holding four channels per texel, always
//!         - over a 3D grid, padded on x and y
//!
//! The buffer is the unit of work a block codec consumes, the padding
//! exists so block overlap reads near the image border never touch
//! undefined memory once [`fill_padding`](crate::pad::fill_padding)
//! has run.
use core::ops::Range;

use tessel_core::bit_depth::BitDepth;

use crate::errors::ImgErrors;

/// Maximum supported color channels
pub const MAX_CHANNELS: usize = 4;

/// The texel storage of an image.
///
/// This is a sum type keyed on [`BitDepth`], a buffer always has
/// exactly one live representation so mixed or absent storage states
/// are unrepresentable.
pub enum PixelStore {
    /// Low dynamic range, `u8` components
    U8(Vec<[u8; MAX_CHANNELS]>),
    /// Wide range, linear `f32` components
    F32(Vec<[f32; MAX_CHANNELS]>)
}

impl PixelStore {
    /// The bit depth tag matching the live representation
    pub const fn depth(&self) -> BitDepth {
        match self {
            PixelStore::U8(_) => BitDepth::Eight,
            PixelStore::F32(_) => BitDepth::F32
        }
    }
}

/// Per-texel neighborhood statistics over the unpadded region.
///
/// These are only present when the consuming encoder asked for error
/// weighted compression, each map carries one entry per unpadded
/// texel in `z`, `y`, `x` order.
#[derive(Clone, Debug, Default)]
pub struct RegionStats {
    /// Neighborhood average per channel
    pub averages:       Vec<[f32; MAX_CHANNELS]>,
    /// Neighborhood variance per channel
    pub variances:      Vec<[f32; MAX_CHANNELS]>,
    /// Neighborhood average of alpha alone
    pub alpha_averages: Vec<f32>
}

/// A single padded image buffer.
///
/// Texels are addressed as `[z][y][x][channel]` with four channels
/// always present, sources with fewer real channels carry zero color
/// and full scale alpha in the unused slots so every consumer can
/// treat the buffer as uniform RGBA.
///
/// The x and y axes accept indices in `-padding..extent + padding`,
/// the z axis is never padded.
pub struct Image {
    store:            PixelStore,
    width:            usize,
    height:           usize,
    depth:            usize,
    padding:          usize,
    linearized_srgb:  bool,
    stats:            Option<RegionStats>
}

impl Image {
    /// Allocate a zero filled image buffer.
    ///
    /// # Arguments
    /// - `bit_depth`: Which of the two texel representations to allocate
    /// - `width`, `height`, `depth`: Extents of the usable region, all
    ///    must be at least one
    /// - `padding`: Border width added on every side of the x and y axes
    ///
    /// # Errors
    /// Returns [`ImgErrors::BadAllocRequest`] when an extent is zero or
    /// the padded texel count overflows `usize`.
    pub fn alloc(
        bit_depth: BitDepth, width: usize, height: usize, depth: usize, padding: usize
    ) -> Result<Image, ImgErrors> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(ImgErrors::BadAllocRequest(width, height, depth));
        }
        let texels = padded_texel_count(width, height, depth, padding)
            .ok_or(ImgErrors::BadAllocRequest(width, height, depth))?;

        let store = match bit_depth {
            BitDepth::Eight => PixelStore::U8(vec![[0; MAX_CHANNELS]; texels]),
            BitDepth::F32 => PixelStore::F32(vec![[0.0; MAX_CHANNELS]; texels])
        };

        Ok(Image {
            store,
            width,
            height,
            depth,
            padding,
            linearized_srgb: false,
            stats: None
        })
    }

    /// Get the unpadded image extents as `(width, height, depth)`
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Get the border width applied to the x and y axes
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// Get the allocated extents of a single depth slice as
    /// `(padded_width, padded_height)`
    pub const fn padded_dimensions(&self) -> (usize, usize) {
        (
            self.width + 2 * self.padding,
            self.height + 2 * self.padding
        )
    }

    /// The bit depth of the live texel store
    pub const fn bit_depth(&self) -> BitDepth {
        self.store.depth()
    }

    /// Borrow the texel store
    pub const fn store(&self) -> &PixelStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut PixelStore {
        &mut self.store
    }

    /// Whether an sRGB to linear transfer was applied while this
    /// buffer was populated.
    ///
    /// Later stages use this to know which domain the stored values
    /// are in, the buffer itself never converts.
    pub const fn linearized_srgb(&self) -> bool {
        self.linearized_srgb
    }

    /// Record whether the contents went through sRGB linearization
    pub fn set_linearized_srgb(&mut self, linearized: bool) {
        self.linearized_srgb = linearized;
    }

    /// Index of the texel at padded coordinates.
    ///
    /// `x` and `y` may be negative down to `-padding`, callers are
    /// expected to stay inside the padded extent.
    fn texel_index(&self, x: isize, y: isize, z: usize) -> usize {
        let pad = self.padding as isize;
        let (padded_w, padded_h) = self.padded_dimensions();

        debug_assert!(x >= -pad && x < self.width as isize + pad);
        debug_assert!(y >= -pad && y < self.height as isize + pad);
        debug_assert!(z < self.depth);

        let px = (x + pad) as usize;
        let py = (y + pad) as usize;

        (z * padded_h + py) * padded_w + px
    }

    /// Texel index range of one unpadded interior row
    pub(crate) fn interior_row(&self, y: usize, z: usize) -> Range<usize> {
        let start = self.texel_index(0, y as isize, z);

        start..start + self.width
    }

    /// Fetch one texel, promoting `u8` components to float.
    ///
    /// Eight bit components map onto `0.0..=1.0` by dividing with 255,
    /// wide components are returned verbatim.
    pub fn texel_f32(&self, x: isize, y: isize, z: usize) -> [f32; MAX_CHANNELS] {
        let idx = self.texel_index(x, y, z);

        match &self.store {
            PixelStore::U8(texels) => {
                let t = texels[idx];
                [
                    f32::from(t[0]) / 255.0,
                    f32::from(t[1]) / 255.0,
                    f32::from(t[2]) / 255.0,
                    f32::from(t[3]) / 255.0
                ]
            }
            PixelStore::F32(texels) => texels[idx]
        }
    }

    /// Fetch one texel quantized to `u8` components.
    ///
    /// Eight bit stores return their texel verbatim, wide stores are
    /// clamped to display range and rounded to the nearest step.
    pub fn texel_unorm8(&self, x: isize, y: isize, z: usize) -> [u8; MAX_CHANNELS] {
        let idx = self.texel_index(x, y, z);

        match &self.store {
            PixelStore::U8(texels) => texels[idx],
            PixelStore::F32(texels) => {
                let t = texels[idx];

                [
                    quantize_unorm8(t[0]),
                    quantize_unorm8(t[1]),
                    quantize_unorm8(t[2]),
                    quantize_unorm8(t[3])
                ]
            }
        }
    }

    /// Borrow the raw `u8` texels of the whole padded grid.
    ///
    /// # Errors
    /// [`ImgErrors::WrongDepth`] when the buffer is stored as floats.
    pub fn u8_texels(&self) -> Result<&[[u8; MAX_CHANNELS]], ImgErrors> {
        match &self.store {
            PixelStore::U8(texels) => Ok(texels),
            PixelStore::F32(_) => Err(ImgErrors::WrongDepth(BitDepth::Eight, BitDepth::F32))
        }
    }

    /// Mutably borrow the raw `u8` texels of the whole padded grid.
    ///
    /// # Errors
    /// [`ImgErrors::WrongDepth`] when the buffer is stored as floats.
    pub fn u8_texels_mut(&mut self) -> Result<&mut [[u8; MAX_CHANNELS]], ImgErrors> {
        match &mut self.store {
            PixelStore::U8(texels) => Ok(texels),
            PixelStore::F32(_) => Err(ImgErrors::WrongDepth(BitDepth::Eight, BitDepth::F32))
        }
    }

    /// Borrow the raw `f32` texels of the whole padded grid.
    ///
    /// # Errors
    /// [`ImgErrors::WrongDepth`] when the buffer is stored as `u8`.
    pub fn f32_texels(&self) -> Result<&[[f32; MAX_CHANNELS]], ImgErrors> {
        match &self.store {
            PixelStore::F32(texels) => Ok(texels),
            PixelStore::U8(_) => Err(ImgErrors::WrongDepth(BitDepth::F32, BitDepth::Eight))
        }
    }

    /// Mutably borrow the raw `f32` texels of the whole padded grid.
    ///
    /// # Errors
    /// [`ImgErrors::WrongDepth`] when the buffer is stored as `u8`.
    pub fn f32_texels_mut(&mut self) -> Result<&mut [[f32; MAX_CHANNELS]], ImgErrors> {
        match &mut self.store {
            PixelStore::F32(texels) => Ok(texels),
            PixelStore::U8(_) => Err(ImgErrors::WrongDepth(BitDepth::F32, BitDepth::Eight))
        }
    }

    /// Attach neighborhood statistics computed by the encoder.
    ///
    /// # Errors
    /// [`ImgErrors::WrongStatsLength`] when any of the maps does not
    /// carry exactly one entry per unpadded texel.
    pub fn set_region_stats(&mut self, stats: RegionStats) -> Result<(), ImgErrors> {
        let expected = self.width * self.height * self.depth;

        for found in [
            stats.averages.len(),
            stats.variances.len(),
            stats.alpha_averages.len()
        ] {
            if found != expected {
                return Err(ImgErrors::WrongStatsLength(expected, found));
            }
        }
        self.stats = Some(stats);

        Ok(())
    }

    /// Borrow the attached neighborhood statistics, if any
    pub fn region_stats(&self) -> Option<&RegionStats> {
        self.stats.as_ref()
    }

    /// Detach and return the neighborhood statistics, if any
    pub fn take_region_stats(&mut self) -> Option<RegionStats> {
        self.stats.take()
    }
}

/// Quantize a display range float component to the nearest `u8` step
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn quantize_unorm8(v: f32) -> u8 {
    (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

/// Texel count of the padded grid, `None` on overflow
fn padded_texel_count(
    width: usize, height: usize, depth: usize, padding: usize
) -> Option<usize> {
    let padded_w = width.checked_add(padding.checked_mul(2)?)?;
    let padded_h = height.checked_add(padding.checked_mul(2)?)?;

    padded_w.checked_mul(padded_h)?.checked_mul(depth)
}

#[cfg(test)]
mod tests {
    use tessel_core::bit_depth::BitDepth;

    use crate::image::{Image, RegionStats};

    #[test]
    fn alloc_rejects_zero_extent() {
        assert!(Image::alloc(BitDepth::Eight, 0, 10, 1, 0).is_err());
        assert!(Image::alloc(BitDepth::Eight, 10, 0, 1, 0).is_err());
        assert!(Image::alloc(BitDepth::Eight, 10, 10, 0, 0).is_err());
    }

    #[test]
    fn alloc_rejects_overflowing_extent() {
        assert!(Image::alloc(BitDepth::F32, usize::MAX, 2, 1, 1).is_err());
    }

    #[test]
    fn store_matches_bit_depth() {
        let image = Image::alloc(BitDepth::Eight, 4, 4, 1, 1).unwrap();

        assert_eq!(image.bit_depth(), BitDepth::Eight);
        assert!(image.u8_texels().is_ok());
        assert!(image.f32_texels().is_err());
    }

    #[test]
    fn padded_addressing_reaches_border() {
        let mut image = Image::alloc(BitDepth::Eight, 4, 4, 1, 2).unwrap();
        let (padded_w, padded_h) = image.padded_dimensions();

        assert_eq!((padded_w, padded_h), (8, 8));

        // top left border texel is index 0 of the padded grid
        image.u8_texels_mut().unwrap()[0] = [1, 2, 3, 4];
        assert_eq!(image.texel_unorm8(-2, -2, 0), [1, 2, 3, 4]);
    }

    #[test]
    fn float_promotion_is_full_scale_exact() {
        let mut image = Image::alloc(BitDepth::Eight, 1, 1, 1, 0).unwrap();

        image.u8_texels_mut().unwrap()[0] = [255, 0, 255, 255];
        assert_eq!(image.texel_f32(0, 0, 0), [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn region_stats_length_is_validated() {
        let mut image = Image::alloc(BitDepth::F32, 3, 3, 1, 1).unwrap();

        let bad = RegionStats {
            averages:       vec![[0.0; 4]; 4],
            variances:      vec![[0.0; 4]; 9],
            alpha_averages: vec![0.0; 9]
        };
        assert!(image.set_region_stats(bad).is_err());

        let good = RegionStats {
            averages:       vec![[0.0; 4]; 9],
            variances:      vec![[0.0; 4]; 9],
            alpha_averages: vec![0.0; 9]
        };
        assert!(image.set_region_stats(good).is_ok());
        assert!(image.region_stats().is_some());
        assert!(image.take_region_stats().is_some());
        assert!(image.region_stats().is_none());
    }
}
