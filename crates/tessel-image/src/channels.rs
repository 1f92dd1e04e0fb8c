/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Minimal channel count detection
//!
//! Buffers always carry four channels, but a grayscale photograph
//! stored as RGBA still only has one channel of real information.
//! This module finds the smallest channel count that represents a
//! buffer without loss, used for reporting and for picking output
//! formats.
//!
//! It is a heuristic over the pixel data, overcounting is acceptable
//! and harmless, undercounting would lose information and is not.
use crate::image::{Image, PixelStore, MAX_CHANNELS};

/// Determine the minimal number of meaningful channels in a buffer.
///
/// Scans the whole unpadded interior, every depth slice:
/// - any alpha below full scale means 4 channels
/// - else any blue differing from red means real chroma, 3 channels
/// - else any green differing from red means 2 channels
/// - else the image is pure luminance, 1 channel
pub fn determine_channel_count(image: &Image) -> usize {
    let (_, height, depth) = image.dimensions();

    let mut alpha_varies = false;
    let mut blue_varies = false;
    let mut green_varies = false;

    for z in 0..depth {
        for y in 0..height {
            let range = image.interior_row(y, z);

            let (a, b, g) = match image.store() {
                PixelStore::U8(texels) => scan_row(&texels[range], 255),
                PixelStore::F32(texels) => scan_row(&texels[range], 1.0)
            };
            alpha_varies |= a;
            blue_varies |= b;
            green_varies |= g;
        }
    }

    if alpha_varies {
        4
    } else if blue_varies {
        3
    } else if green_varies {
        2
    } else {
        1
    }
}

fn scan_row<T: Copy + PartialEq>(
    row: &[[T; MAX_CHANNELS]], full_scale: T
) -> (bool, bool, bool) {
    let mut alpha_varies = false;
    let mut blue_varies = false;
    let mut green_varies = false;

    for texel in row {
        alpha_varies |= texel[3] != full_scale;
        blue_varies |= texel[2] != texel[0];
        green_varies |= texel[1] != texel[0];
    }
    (alpha_varies, blue_varies, green_varies)
}

#[cfg(test)]
mod tests {
    use tessel_core::bit_depth::BitDepth;

    use crate::channels::determine_channel_count;
    use crate::flat::from_u8_array;
    use crate::image::Image;

    #[test]
    fn pure_luminance_is_one_channel() {
        let data: Vec<u8> = (0u8..16).flat_map(|v| [v * 16, v * 16, v * 16, 255]).collect();
        let image = from_u8_array(&data, 4, 4, 1, false).unwrap();

        assert_eq!(determine_channel_count(&image), 1);
    }

    #[test]
    fn one_translucent_texel_forces_four_channels() {
        let mut data: Vec<u8> = (0u8..16).flat_map(|v| [v * 16, v * 16, v * 16, 255]).collect();
        // alpha of the texel at (2, 1)
        data[(1 * 4 + 2) * 4 + 3] = 254;
        let image = from_u8_array(&data, 4, 4, 1, false).unwrap();

        assert_eq!(determine_channel_count(&image), 4);
    }

    #[test]
    fn chroma_in_blue_is_three_channels() {
        let mut data: Vec<u8> = (0u8..16).flat_map(|v| [v * 16, v * 16, v * 16, 255]).collect();
        data[2] = 13;
        let image = from_u8_array(&data, 4, 4, 0, false).unwrap();

        assert_eq!(determine_channel_count(&image), 3);
    }

    #[test]
    fn luminance_plus_green_is_two_channels() {
        let mut data: Vec<u8> = (0u8..16).flat_map(|v| [v * 16, v * 16, v * 16, 255]).collect();
        data[1] = 13;
        let image = from_u8_array(&data, 4, 4, 0, false).unwrap();

        assert_eq!(determine_channel_count(&image), 2);
    }

    #[test]
    fn zeroed_padding_does_not_leak_into_the_scan() {
        // a freshly allocated border is all zeros, alpha included,
        // only the interior may decide the count
        let mut image = Image::alloc(BitDepth::Eight, 2, 2, 1, 2).unwrap();
        for y in 0..2 {
            let range = image.interior_row(y, 0);
            for texel in &mut image.u8_texels_mut().unwrap()[range] {
                *texel = [9, 9, 9, 255];
            }
        }

        assert_eq!(determine_channel_count(&image), 1);
    }

    #[test]
    fn float_buffers_use_unit_full_scale() {
        let mut image = Image::alloc(BitDepth::F32, 2, 2, 1, 0).unwrap();
        for texel in image.f32_texels_mut().unwrap() {
            *texel = [0.25, 0.25, 0.25, 1.0];
        }

        assert_eq!(determine_channel_count(&image), 1);
    }
}
