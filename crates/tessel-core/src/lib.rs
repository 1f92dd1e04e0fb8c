/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core primitives shared by the `tessel` family of crates
//!
//! This crate carries the small vocabulary types that both the image
//! buffer layer and the codec boundary need to agree on
//!
//! It currently contains
//!
//! - The bit depth tag selecting how texels are stored
//! - Channel swizzle selectors exchanged with the codec boundary
//! - A logging facade, either forwarding to the `log` crate or
//!   compiling to nothing depending on the `log` feature
//!
#![warn(clippy::correctness, clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod bit_depth;
pub mod swizzle;

#[cfg(feature = "log")]
pub use log;

#[cfg(not(feature = "log"))]
pub mod log;
