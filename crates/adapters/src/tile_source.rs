// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tile-region image reading.
//!
//! The original reference implementation tries a tiled whole-slide reader
//! (OpenSlide) before falling back to a general decoder (PIL). No
//! whole-slide-format crate is in this workspace's dependency stack, so
//! only the general-decoder path is implemented here; [`TileSource`] is the
//! seam a future OpenSlide-backed implementation would slot into without
//! touching `tl-executor`.

use image::{DynamicImage, GenericImageView, RgbImage};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TileSourceError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// One decoded tile, already cropped to its requested bounds (clipped at
/// the image edge by the caller).
pub struct TileRegion {
    pub x: u32,
    pub y: u32,
    pub image: RgbImage,
}

/// A source of pixel data addressable by tile region.
pub trait TileSource: Send {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Read an RGB region `[x, y, x+w, y+h)`, clipped to image bounds by the
    /// caller before invocation.
    fn read_region(&self, x: u32, y: u32, w: u32, h: u32) -> TileRegion;
}

/// General-decoder backed `TileSource`, built on the `image`/`tiff` crates.
/// Decodes the whole image into memory up front; fine for the tile sizes
/// this service targets, but not a whole-slide-pyramid reader.
pub struct GeneralDecoderSource {
    image: RgbImage,
}

impl GeneralDecoderSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TileSourceError> {
        let decoded: DynamicImage = image::open(path)?;
        Ok(Self { image: decoded.to_rgb8() })
    }
}

impl TileSource for GeneralDecoderSource {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn read_region(&self, x: u32, y: u32, w: u32, h: u32) -> TileRegion {
        let sub = self.image.view(x, y, w, h).to_image();
        TileRegion { x, y, image: sub }
    }
}

#[cfg(test)]
#[path = "tile_source_tests.rs"]
mod tests;
