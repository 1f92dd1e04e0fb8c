/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when allocating, converting and scoring image buffers
use std::fmt::{Debug, Display, Formatter};

use tessel_core::bit_depth::BitDepth;

/// All possible errors that the buffer and metrics layer can report.
pub enum ImgErrors {
    /// Two compared images do not share the same extents.
    ///
    /// Carries `(expected, found)` as `(width, height, depth)` tuples
    DimensionsMisMatch((usize, usize, usize), (usize, usize, usize)),
    /// An allocation request had a zero extent or its texel count
    /// overflows `usize`.
    ///
    /// Carries the requested `(width, height, depth)`
    BadAllocRequest(usize, usize, usize),
    /// A flat array does not contain `width * height * 4` components.
    ///
    /// Carries `(expected, found)` component counts
    WrongArrayLength(usize, usize),
    /// A component count outside the supported `1..=4` range
    WrongComponents(usize),
    /// The low exposure stop is above the high exposure stop
    InvalidFstopRange(i32, i32),
    /// Typed texel access did not match the live storage representation.
    ///
    /// Carries `(expected, found)` bit depths
    WrongDepth(BitDepth, BitDepth),
    /// A region statistics map whose length does not cover every
    /// unpadded texel.
    ///
    /// Carries `(expected, found)` entry counts
    WrongStatsLength(usize, usize),
    /// Generic errors
    GenericStr(&'static str),
    /// Generic errors which have more context
    GenericString(String)
}

impl Debug for ImgErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected:?} but found {found:?}"
                )
            }
            Self::BadAllocRequest(width, height, depth) => {
                writeln!(
                    f,
                    "Cannot allocate a {width}x{height}x{depth} image, extents must be non zero and the texel count must fit in usize"
                )
            }
            Self::WrongArrayLength(expected, found) => {
                writeln!(
                    f,
                    "Flat array length mismatch, expected {expected} components but found {found}"
                )
            }
            Self::WrongComponents(found) => {
                writeln!(f, "Expected between 1 and 4 components, found {found}")
            }
            Self::InvalidFstopRange(lo, hi) => {
                writeln!(f, "Low exposure stop {lo} is above high exposure stop {hi}")
            }
            Self::WrongDepth(expected, found) => {
                writeln!(
                    f,
                    "Expected an image stored as {expected:?} but found {found:?}"
                )
            }
            Self::WrongStatsLength(expected, found) => {
                writeln!(
                    f,
                    "Region statistics must have one entry per unpadded texel, expected {expected} but found {found}"
                )
            }
            Self::GenericStr(err) => {
                writeln!(f, "{err}")
            }
            Self::GenericString(err) => {
                writeln!(f, "{err}")
            }
        }
    }
}

impl Display for ImgErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for ImgErrors {}

impl From<String> for ImgErrors {
    fn from(s: String) -> ImgErrors {
        ImgErrors::GenericString(s)
    }
}

impl From<&'static str> for ImgErrors {
    fn from(s: &'static str) -> ImgErrors {
        ImgErrors::GenericStr(s)
    }
}
