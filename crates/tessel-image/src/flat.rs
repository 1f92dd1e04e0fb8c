/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversions between flat component arrays and padded image buffers
//!
//! Format decoders produce, and format writers consume, a flat
//! unpadded array of `height` rows times `width` RGBA texels. This
//! module lifts such arrays into padded [`Image`] buffers and lowers
//! buffers back down.
//!
//! Lifting leaves the padding band untouched, callers that need it
//! defined run [`fill_padding`](crate::pad::fill_padding) afterwards,
//! callers that do not skip that cost.
//!
//! `y_flip` is strictly an I/O boundary transform, it reverses the row
//! order while copying and never changes the in-memory convention. A
//! load and a store must agree on it for a round trip to reproduce the
//! original row order.
use tessel_core::bit_depth::BitDepth;

use crate::errors::ImgErrors;
use crate::image::{quantize_unorm8, Image, PixelStore, MAX_CHANNELS};

/// Lift a flat `f32` RGBA array into a wide padded buffer.
///
/// `data` holds `height` rows of `width` texels, four components
/// each, top row first unless `y_flip` is set. Components may exceed
/// display range, they are stored verbatim.
///
/// # Errors
/// - [`ImgErrors::WrongArrayLength`] when `data` is not exactly
///   `width * height * 4` components long
/// - [`ImgErrors::BadAllocRequest`] when the extents are invalid
pub fn from_f32_array(
    data: &[f32], width: usize, height: usize, padding: usize, y_flip: bool
) -> Result<Image, ImgErrors> {
    check_flat_len(data.len(), width, height)?;

    let mut image = Image::alloc(BitDepth::F32, width, height, 1, padding)?;
    let padded_w = width + 2 * padding;

    let src: &[[f32; MAX_CHANNELS]] = bytemuck::cast_slice(data);
    let texels = image.f32_texels_mut()?;

    for (y, row) in src.chunks_exact(width).enumerate() {
        let dy = if y_flip { height - 1 - y } else { y };
        let start = (dy + padding) * padded_w + padding;

        texels[start..start + width].copy_from_slice(row);
    }

    Ok(image)
}

/// Lift a flat `u8` RGBA array into a narrow padded buffer.
///
/// Same layout contract as [`from_f32_array`], components are copied
/// bit exact.
///
/// # Errors
/// - [`ImgErrors::WrongArrayLength`] when `data` is not exactly
///   `width * height * 4` components long
/// - [`ImgErrors::BadAllocRequest`] when the extents are invalid
pub fn from_u8_array(
    data: &[u8], width: usize, height: usize, padding: usize, y_flip: bool
) -> Result<Image, ImgErrors> {
    check_flat_len(data.len(), width, height)?;

    let mut image = Image::alloc(BitDepth::Eight, width, height, 1, padding)?;
    let padded_w = width + 2 * padding;

    let src: &[[u8; MAX_CHANNELS]] = bytemuck::cast_slice(data);
    let texels = image.u8_texels_mut()?;

    for (y, row) in src.chunks_exact(width).enumerate() {
        let dy = if y_flip { height - 1 - y } else { y };
        let start = (dy + padding) * padded_w + padding;

        texels[start..start + width].copy_from_slice(row);
    }

    Ok(image)
}

/// Lower a buffer to a flat `f32` RGBA array, padding excluded.
///
/// Depth slices are emitted back to back, each as `height` rows of
/// `width` texels with `y_flip` applied per slice. Wide stores are
/// copied verbatim, narrow stores are promoted by dividing with 255.
#[must_use]
pub fn to_f32_array(image: &Image, y_flip: bool) -> Vec<f32> {
    let (width, height, depth) = image.dimensions();
    let mut out = Vec::with_capacity(width * height * depth * MAX_CHANNELS);

    for z in 0..depth {
        for y in 0..height {
            let sy = if y_flip { height - 1 - y } else { y };
            let range = image.interior_row(sy, z);

            match image.store() {
                PixelStore::F32(texels) => {
                    out.extend_from_slice(bytemuck::cast_slice(&texels[range]));
                }
                PixelStore::U8(texels) => {
                    for t in &texels[range] {
                        out.extend_from_slice(&[
                            f32::from(t[0]) / 255.0,
                            f32::from(t[1]) / 255.0,
                            f32::from(t[2]) / 255.0,
                            f32::from(t[3]) / 255.0
                        ]);
                    }
                }
            }
        }
    }
    out
}

/// Lower a buffer to a flat `u8` RGBA array, padding excluded.
///
/// Same layout contract as [`to_f32_array`]. Narrow stores are copied
/// bit exact, wide stores are clamped to display range and rounded to
/// the nearest step.
#[must_use]
pub fn to_u8_array(image: &Image, y_flip: bool) -> Vec<u8> {
    let (width, height, depth) = image.dimensions();
    let mut out = Vec::with_capacity(width * height * depth * MAX_CHANNELS);

    for z in 0..depth {
        for y in 0..height {
            let sy = if y_flip { height - 1 - y } else { y };
            let range = image.interior_row(sy, z);

            match image.store() {
                PixelStore::U8(texels) => {
                    out.extend_from_slice(bytemuck::cast_slice(&texels[range]));
                }
                PixelStore::F32(texels) => {
                    for t in &texels[range] {
                        out.extend_from_slice(&[
                            quantize_unorm8(t[0]),
                            quantize_unorm8(t[1]),
                            quantize_unorm8(t[2]),
                            quantize_unorm8(t[3])
                        ]);
                    }
                }
            }
        }
    }
    out
}

fn check_flat_len(found: usize, width: usize, height: usize) -> Result<(), ImgErrors> {
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(MAX_CHANNELS))
        .ok_or(ImgErrors::BadAllocRequest(width, height, 1))?;

    if found != expected {
        return Err(ImgErrors::WrongArrayLength(expected, found));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::flat::{from_f32_array, from_u8_array, to_f32_array, to_u8_array};
    use crate::pad::fill_padding;

    fn random_u8_texels(width: usize, height: usize) -> Vec<u8> {
        let mut data = vec![0u8; width * height * 4];
        nanorand::WyRand::new().fill(&mut data);
        data
    }

    #[test]
    fn narrow_round_trip_is_bit_exact() {
        let (width, height) = (13, 9);
        let data = random_u8_texels(width, height);

        for flip in [false, true] {
            let image = from_u8_array(&data, width, height, 2, flip).unwrap();
            assert_eq!(to_u8_array(&image, flip), data);
        }
    }

    #[test]
    fn wide_round_trip_is_exact_float() {
        let (width, height) = (7, 5);
        let mut rng = nanorand::WyRand::new();
        // include values far outside display range, lifting and
        // lowering wide data must never clamp or quantize
        let data: Vec<f32> = (0..width * height * 4)
            .map(|_| rng.generate::<u16>() as f32 * 0.37 - 100.0)
            .collect();

        for flip in [false, true] {
            let image = from_f32_array(&data, width, height, 3, flip).unwrap();
            assert_eq!(to_f32_array(&image, flip), data);
        }
    }

    #[test]
    fn y_flip_reverses_row_order() {
        let width = 2;
        // two rows, distinguishable by their red component
        let data: Vec<u8> = vec![
            10, 0, 0, 255, 10, 0, 0, 255, //
            20, 0, 0, 255, 20, 0, 0, 255,
        ];

        let image = from_u8_array(&data, width, 2, 0, true).unwrap();
        // flipped on the way in: row 0 in memory is the bottom source row
        assert_eq!(image.texel_unorm8(0, 0, 0)[0], 20);

        // lowering without a flip keeps the flipped order
        let lowered = to_u8_array(&image, false);
        assert_eq!(lowered[0], 20);
        assert_eq!(lowered[width * 4], 10);
    }

    #[test]
    fn cross_depth_lowering_converts() {
        let data = [0.0f32, 0.5, 1.0, 2.0];
        let image = from_f32_array(&data, 1, 1, 0, false).unwrap();

        // clamp then round to the nearest step
        assert_eq!(to_u8_array(&image, false), vec![0, 128, 255, 255]);

        let data = [0u8, 51, 255, 255];
        let image = from_u8_array(&data, 1, 1, 0, false).unwrap();
        assert_eq!(to_f32_array(&image, false), vec![0.0, 0.2, 1.0, 1.0]);
    }

    #[test]
    fn lowering_ignores_the_padding_band() {
        let (width, height) = (4, 4);
        let data = random_u8_texels(width, height);

        let mut image = from_u8_array(&data, width, height, 2, false).unwrap();
        fill_padding(&mut image);

        assert_eq!(to_u8_array(&image, false), data);
    }

    #[test]
    fn length_mismatch_is_reported() {
        let data = vec![0u8; 4 * 4 * 4];

        assert!(from_u8_array(&data, 4, 3, 0, false).is_err());
        assert!(from_f32_array(&[0.0; 8], 4, 4, 1, false).is_err());
    }
}
