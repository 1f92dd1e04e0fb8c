/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Border fill for padded image buffers
//!
//! Block based access patterns read a fixed size neighborhood around
//! every texel, near the image border those reads land in the padding
//! band. This module fills that band by replicating the nearest
//! interior texel outward
//!
//! ```text
//!  a,b,c
//!  d,e,f
//! ```
//! Becomes
//! ```text
//! a a,b,c c
//! a a,b,c c
//! d d,e,f f
//! d d,e,f f
//! ```
use tessel_core::log::trace;

use crate::image::{Image, PixelStore, MAX_CHANNELS};

/// Fill the padding band of an image with replicated edge texels.
///
/// Every border texel ends up equal to the interior texel found by
/// clamping its coordinates into the unpadded region, independently
/// per depth slice. The interior is never touched and the border is
/// always re-derived from it, so running this twice is the same as
/// running it once.
///
/// Run this after the interior has been fully populated and before
/// handing the buffer to anything that does neighborhood reads.
pub fn fill_padding(image: &mut Image) {
    let (width, height, _) = image.dimensions();
    let padding = image.padding();

    if padding == 0 {
        trace!("image has no padding band, nothing to fill");
        return;
    }
    let (padded_w, padded_h) = image.padded_dimensions();
    let slice_len = padded_w * padded_h;

    match image.store_mut() {
        PixelStore::U8(texels) => {
            for slice in texels.chunks_exact_mut(slice_len) {
                replicate_slice(slice, width, height, padding);
            }
        }
        PixelStore::F32(texels) => {
            for slice in texels.chunks_exact_mut(slice_len) {
                replicate_slice(slice, width, height, padding);
            }
        }
    }
}

/// Replicate border texels for a single padded depth slice
fn replicate_slice<T: Copy>(
    texels: &mut [[T; MAX_CHANNELS]], width: usize, height: usize, padding: usize
) {
    let padded_w = width + 2 * padding;
    let start = padding;
    let end = padded_w - padding;

    // extend every interior row sideways into the left and right bands
    for row in texels
        .chunks_exact_mut(padded_w)
        .skip(padding)
        .take(height)
    {
        let left = row[start];
        let right = row[end - 1];

        row[..start].fill(left);
        row[end..].fill(right);
    }

    // replicate the first interior row upward, its side bands are
    // already filled so the corners come along for free
    let (top, rest) = texels.split_at_mut(padding * padded_w);
    let first_row = &rest[..padded_w];

    for row in top.chunks_exact_mut(padded_w) {
        row.copy_from_slice(first_row);
    }

    // and the last interior row downward
    let len = texels.len();
    let (rest, bottom) = texels.split_at_mut(len - padding * padded_w);
    let last_row = &rest[rest.len() - padded_w..];

    for row in bottom.chunks_exact_mut(padded_w) {
        row.copy_from_slice(last_row);
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use tessel_core::bit_depth::BitDepth;

    use crate::image::Image;
    use crate::pad::fill_padding;

    fn write_interior(image: &mut Image, mut texel_of: impl FnMut(usize, usize) -> [u8; 4]) {
        let (width, height, _) = image.dimensions();

        for y in 0..height {
            let range = image.interior_row(y, 0);
            let row = &mut image.u8_texels_mut().unwrap()[range];

            for (x, texel) in row.iter_mut().enumerate() {
                *texel = texel_of(x, y);
            }
        }
    }

    // the concrete scenario: 4x4, padding 1, texel (x,y) = (x*16, y*16, 0, 255)
    #[test]
    fn corner_and_edge_replication() {
        let mut image = Image::alloc(BitDepth::Eight, 4, 4, 1, 1).unwrap();

        write_interior(&mut image, |x, y| [(x * 16) as u8, (y * 16) as u8, 0, 255]);
        fill_padding(&mut image);

        assert_eq!(image.texel_unorm8(-1, -1, 0), [0, 0, 0, 255]);
        assert_eq!(image.texel_unorm8(4, 2, 0), [48, 32, 0, 255]);
        assert_eq!(image.texel_unorm8(4, 4, 0), [48, 48, 0, 255]);
        // interior untouched
        assert_eq!(image.texel_unorm8(2, 3, 0), [32, 48, 0, 255]);
    }

    #[test]
    fn border_equals_clamped_interior_lookup() {
        let (width, height, depth, padding) = (5usize, 7usize, 3usize, 2usize);
        let mut image = Image::alloc(BitDepth::F32, width, height, depth, padding).unwrap();

        let mut rng = nanorand::WyRand::new();
        for z in 0..depth {
            for y in 0..height {
                let range = image.interior_row(y, z);
                for texel in &mut image.f32_texels_mut().unwrap()[range] {
                    *texel = [
                        rng.generate::<u16>() as f32,
                        rng.generate::<u16>() as f32,
                        rng.generate::<u16>() as f32,
                        rng.generate::<u16>() as f32
                    ];
                }
            }
        }
        fill_padding(&mut image);

        let pad = padding as isize;
        for z in 0..depth {
            for y in -pad..height as isize + pad {
                for x in -pad..width as isize + pad {
                    let cx = x.clamp(0, width as isize - 1);
                    let cy = y.clamp(0, height as isize - 1);

                    assert_eq!(
                        image.texel_f32(x, y, z),
                        image.texel_f32(cx, cy, z),
                        "border texel ({x},{y},{z}) does not replicate its nearest interior texel"
                    );
                }
            }
        }
    }

    #[test]
    fn filling_twice_changes_nothing() {
        let mut image = Image::alloc(BitDepth::Eight, 6, 4, 1, 3).unwrap();

        let mut rng = nanorand::WyRand::new();
        write_interior(&mut image, |_, _| {
            [
                rng.generate(),
                rng.generate(),
                rng.generate(),
                rng.generate()
            ]
        });

        fill_padding(&mut image);
        let once = image.u8_texels().unwrap().to_vec();

        fill_padding(&mut image);
        assert_eq!(image.u8_texels().unwrap(), &once[..]);
    }
}
