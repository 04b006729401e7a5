// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-tile compute kernels: `tile_image -> mask`.
//!
//! `ComputeKernel` is the pluggable seam the executor dispatches to per
//! `JobType`. The only implementation shipped here is [`FallbackKernel`], a
//! deterministic mean-luminance threshold — the same fallback the original
//! reference implementation uses for both `SEGMENT_CELLS` and `TISSUE_MASK`
//! when the real model is unavailable. `tl-executor` is responsible for the
//! "try the real kernel, fall through to this on error" policy (spec §7);
//! this crate does not carry a real-kernel implementation because no such
//! crate exists in the workspace's dependency stack (DESIGN.md records this
//! as a resolved Open Question).

use image::{GrayImage, Luma, RgbImage};
use thiserror::Error;
use tl_core::JobType;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("kernel produced no output for an empty tile")]
    EmptyTile,
}

pub struct KernelOutput {
    pub mask: GrayImage,
}

/// A per-tile compute kernel, dispatched by [`tl_core::JobType`].
pub trait ComputeKernel: Send + Sync {
    fn run(&self, job_type: JobType, tile: &RgbImage) -> Result<KernelOutput, KernelError>;
}

/// Deterministic mean-luminance threshold: pixels brighter than the tile's
/// mean luminance are foreground (255), the rest background (0). Used for
/// both `SEGMENT_CELLS` and `TISSUE_MASK` — the original's real-model path
/// (InstanSeg, Otsu threshold) is out of reach without those dependencies,
/// but this keeps the job pipeline functional end to end.
#[derive(Default)]
pub struct FallbackKernel;

impl ComputeKernel for FallbackKernel {
    fn run(&self, _job_type: JobType, tile: &RgbImage) -> Result<KernelOutput, KernelError> {
        if tile.width() == 0 || tile.height() == 0 {
            return Err(KernelError::EmptyTile);
        }

        let sum: u64 = tile.pixels().map(|p| luminance(p.0) as u64).sum();
        let mean = (sum / (tile.width() as u64 * tile.height() as u64)) as u8;

        let mask = GrayImage::from_fn(tile.width(), tile.height(), |x, y| {
            let px = tile.get_pixel(x, y);
            if luminance(px.0) > mean {
                Luma([255])
            } else {
                Luma([0])
            }
        });

        Ok(KernelOutput { mask })
    }
}

fn luminance(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb;
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) as u8
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
