/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Padded image buffers and quality metrics for block based texture
//! codecs
//!
//! This crate owns the unit of work a block codec operates on: a four
//! channel, optionally padded 2D/3D pixel grid stored at one of two
//! bit depths, plus the routines that surround it
//!
//! - lifting flat decoder output into a padded buffer and lowering it
//!   back ([`flat`])
//! - replicating edge texels into the padding band ([`pad`])
//! - finding the minimal meaningful channel count ([`channels`])
//! - scoring a reconstruction against its original with the PSNR
//!   family, including multi exposure HDR scoring ([`metrics`])
//!
//! The codec itself, file format decoding and the CLI all live
//! elsewhere and exchange buffers or flat arrays with this crate.
//!
//! # Example
//! - Lift decoder output, finalize the border, score a round trip
//! ```
//! use tessel_image::flat::from_u8_array;
//! use tessel_image::metrics::compute_error_metrics;
//! use tessel_image::pad::fill_padding;
//!
//! let decoded = vec![128u8; 4 * 4 * 4];
//! let mut image = from_u8_array(&decoded, 4, 4, 1, false)?;
//! fill_padding(&mut image);
//!
//! let metrics = compute_error_metrics(false, 3, &image, &image, 0, 0)?;
//! assert_eq!(metrics.combined.mse, 0.0);
//! # Ok::<(), tessel_image::errors::ImgErrors>(())
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

pub mod channels;
pub mod errors;
pub mod flat;
pub mod image;
pub mod metrics;
pub mod pad;
