/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Objective quality metrics between an original and a reconstructed
//! buffer
//!
//! The scores are the PSNR family: per channel mean squared error
//! converted with `10 * log10(peak^2 / mse)`. LDR content gets one
//! score per contributing channel plus a combined score, HDR content
//! additionally gets a PSNR per simulated exposure stop and a
//! log-domain MSE that catches highlight and shadow errors which
//! exposure mapped PSNR alone would hide.
//!
//! Nothing here prints, the caller decides how to present an
//! [`ErrorMetrics`], its [`Display`] impl is one ready made option.
use std::fmt::{Display, Formatter};

use tessel_core::log::trace;

use crate::errors::ImgErrors;
use crate::image::{Image, MAX_CHANNELS};

/// Full scale of a channel in the 0-255 PSNR convention
const PEAK: f64 = 255.0;

/// Keeps log-domain differences finite on zero valued texels
const LOG_EPSILON: f64 = 1e-6;

/// Mean squared error and the PSNR derived from it for one channel
/// or one channel aggregate
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelMetrics {
    pub mse:  f64,
    /// `f64::INFINITY` when the compared data is identical
    pub psnr: f64
}

/// PSNR of both images tone mapped at one simulated exposure
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExposureMetrics {
    /// The exposure stop, linear values were scaled by `2^fstop`
    /// and clamped to display range before scoring
    pub fstop: i32,
    pub psnr:  f64
}

/// The structured result of one metrics computation.
///
/// Only the first `input_components` entries of `channels` carry
/// data, the rest stay at zero error. `exposures` and `log_mse` are
/// populated in HDR mode only.
#[derive(Clone, Debug)]
pub struct ErrorMetrics {
    /// How many channels contributed to the scores
    pub input_components: usize,
    /// Per channel scores in `R`, `G`, `B`, `A` order
    pub channels:         [ChannelMetrics; MAX_CHANNELS],
    /// Aggregate score over all contributing channels
    pub combined:         ChannelMetrics,
    /// One entry per simulated exposure stop, low to high
    pub exposures:        Vec<ExposureMetrics>,
    /// Mean squared difference of `ln(value + epsilon)` over the
    /// contributing color channels of the raw linear values
    pub log_mse:          Option<f64>
}

impl Display for ErrorMetrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        const NAMES: [&str; MAX_CHANNELS] = ["R", "G", "B", "A"];

        for (name, metrics) in NAMES.iter().zip(&self.channels).take(self.input_components) {
            writeln!(
                f,
                "{name} channel: MSE {:.6}, PSNR {:.4} dB",
                metrics.mse, metrics.psnr
            )?;
        }
        writeln!(
            f,
            "Combined ({} channels): MSE {:.6}, PSNR {:.4} dB",
            self.input_components, self.combined.mse, self.combined.psnr
        )?;

        for exposure in &self.exposures {
            writeln!(f, "PSNR at {:+} fstop: {:.4} dB", exposure.fstop, exposure.psnr)?;
        }
        if let Some(log_mse) = self.log_mse {
            writeln!(f, "log MSE: {log_mse:.6}")?;
        }
        Ok(())
    }
}

/// Compute error metrics between an original and a reconstructed
/// buffer.
///
/// Both buffers are walked over their unpadded interior, every depth
/// slice, with texels fetched in the unified float domain so the two
/// buffers may differ in bit depth. Channels at index
/// `input_components` and above are ignored even when present, alpha
/// therefore only contributes when `input_components` is 4.
///
/// In HDR mode (`compute_hdr`), each integer stop in
/// `fstop_lo..=fstop_hi` scales the linear values by `2^stop` with a
/// clamp to display range before scoring, and the log-domain MSE of
/// the unscaled values is computed alongside. Equal stops degrade to
/// single exposure scoring. Exposure and log scores are over color
/// channels only.
///
/// # Errors
/// - [`ImgErrors::WrongComponents`] when `input_components` is not in `1..=4`
/// - [`ImgErrors::DimensionsMisMatch`] when the buffer extents differ
/// - [`ImgErrors::InvalidFstopRange`] when `fstop_lo > fstop_hi` in HDR mode
pub fn compute_error_metrics(
    compute_hdr: bool, input_components: usize, original: &Image, reconstructed: &Image,
    fstop_lo: i32, fstop_hi: i32
) -> Result<ErrorMetrics, ImgErrors> {
    if !(1..=MAX_CHANNELS).contains(&input_components) {
        return Err(ImgErrors::WrongComponents(input_components));
    }
    if original.dimensions() != reconstructed.dimensions() {
        return Err(ImgErrors::DimensionsMisMatch(
            original.dimensions(),
            reconstructed.dimensions()
        ));
    }
    if compute_hdr && fstop_lo > fstop_hi {
        return Err(ImgErrors::InvalidFstopRange(fstop_lo, fstop_hi));
    }

    let (width, height, depth) = original.dimensions();
    let texel_count = (width * height * depth) as f64;

    trace!(
        "scoring {input_components} components over a {width}x{height}x{depth} pair, hdr={compute_hdr}"
    );

    // exposure mapped and log scores are over color channels only
    let color_components = input_components.min(3);

    let stops: Vec<i32> = if compute_hdr {
        (fstop_lo..=fstop_hi).collect()
    } else {
        Vec::new()
    };

    let mut channel_sse = [0.0f64; MAX_CHANNELS];
    let mut stop_sse = vec![0.0f64; stops.len()];
    let mut log_sse = 0.0f64;

    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let o = original.texel_f32(x as isize, y as isize, z);
                let r = reconstructed.texel_f32(x as isize, y as isize, z);

                for c in 0..input_components {
                    let diff = (f64::from(o[c]) - f64::from(r[c])) * PEAK;
                    channel_sse[c] += diff * diff;
                }

                if !compute_hdr {
                    continue;
                }
                for (sse, stop) in stop_sse.iter_mut().zip(&stops) {
                    let scale = f64::from(*stop).exp2();

                    for c in 0..color_components {
                        let om = (f64::from(o[c]) * scale).clamp(0.0, 1.0) * PEAK;
                        let rm = (f64::from(r[c]) * scale).clamp(0.0, 1.0) * PEAK;
                        let diff = om - rm;

                        *sse += diff * diff;
                    }
                }
                for c in 0..color_components {
                    let diff = (f64::from(o[c]) + LOG_EPSILON).ln()
                        - (f64::from(r[c]) + LOG_EPSILON).ln();

                    log_sse += diff * diff;
                }
            }
        }
    }

    let mut channels = [ChannelMetrics {
        mse:  0.0,
        psnr: f64::INFINITY
    }; MAX_CHANNELS];

    for (metrics, sse) in channels.iter_mut().zip(&channel_sse).take(input_components) {
        let mse = sse / texel_count;

        *metrics = ChannelMetrics {
            mse,
            psnr: psnr_from_mse(mse)
        };
    }

    let combined_mse =
        channel_sse[..input_components].iter().sum::<f64>() / (texel_count * input_components as f64);
    let combined = ChannelMetrics {
        mse:  combined_mse,
        psnr: psnr_from_mse(combined_mse)
    };

    let exposures = stops
        .iter()
        .zip(&stop_sse)
        .map(|(&fstop, sse)| {
            let mse = sse / (texel_count * color_components as f64);

            ExposureMetrics {
                fstop,
                psnr: psnr_from_mse(mse)
            }
        })
        .collect();

    let log_mse = compute_hdr.then(|| log_sse / (texel_count * color_components as f64));

    Ok(ErrorMetrics {
        input_components,
        channels,
        combined,
        exposures,
        log_mse
    })
}

/// PSNR in the 0-255 peak convention, infinite for identical data
fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (PEAK * PEAK / mse).log10()
    }
}
