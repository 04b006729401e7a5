// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Preview composition: a single RGBA canvas, scaled so its long edge is at
//! most 2048px, with each tile's mask pasted back as a translucent color
//! overlay (spec §4.4 phase 7).

use crate::tiling::TileBounds;
use image::{imageops::FilterType, GrayImage, Rgba, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};

const MAX_PREVIEW_EDGE: u32 = 2048;

/// RGBA color for the translucent overlay: red for cell segmentation, green
/// for tissue masking (spec §4.4 phase 7).
pub fn overlay_color(job_type: tl_core::JobType) -> Rgba<u8> {
    match job_type {
        tl_core::JobType::SegmentCells => Rgba([255, 0, 0, 120]),
        tl_core::JobType::TissueMask => Rgba([0, 255, 0, 120]),
    }
}

/// Build `job_dir/preview.png` from whichever `mask_{x}_{y}.png` files were
/// written for `tiles`. Tiles with no mask on disk are simply skipped.
pub fn build_preview(
    job_dir: &Path,
    width: u32,
    height: u32,
    tiles: &[TileBounds],
    color: Rgba<u8>,
) -> io::Result<PathBuf> {
    let scale = if width.max(height) > 0 {
        (MAX_PREVIEW_EDGE as f64 / width.max(height) as f64).min(1.0)
    } else {
        1.0
    };
    let preview_w = ((width as f64 * scale) as u32).max(1);
    let preview_h = ((height as f64 * scale) as u32).max(1);
    let mut canvas = RgbaImage::new(preview_w, preview_h);

    for tile in tiles {
        let mask_path = job_dir.join(format!("mask_{}_{}.png", tile.x, tile.y));
        if !mask_path.exists() {
            continue;
        }
        let mask: GrayImage = image::open(&mask_path)?.to_luma8();

        let scaled_w = ((tile.w as f64 * scale) as u32).max(1);
        let scaled_h = ((tile.h as f64 * scale) as u32).max(1);
        let resized = image::imageops::resize(&mask, scaled_w, scaled_h, FilterType::Triangle);

        let dest_x = (tile.x as f64 * scale) as u32;
        let dest_y = (tile.y as f64 * scale) as u32;

        for (mx, my, px) in resized.enumerate_pixels() {
            let cx = dest_x + mx;
            let cy = dest_y + my;
            if cx >= preview_w || cy >= preview_h {
                continue;
            }
            let mask_alpha = px.0[0] as f64 / 255.0;
            let overlay_alpha = mask_alpha * (color.0[3] as f64 / 255.0);
            if overlay_alpha <= 0.0 {
                continue;
            }
            let dest = canvas.get_pixel_mut(cx, cy);
            blend_in_place(dest, color, overlay_alpha);
        }
    }

    let preview_path = job_dir.join("preview.png");
    canvas.save(&preview_path).map_err(io::Error::other)?;
    Ok(preview_path)
}

fn blend_in_place(dest: &mut Rgba<u8>, src: Rgba<u8>, src_alpha: f64) {
    let dest_alpha = dest.0[3] as f64 / 255.0;
    let out_alpha = src_alpha + dest_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return;
    }
    for c in 0..3 {
        let s = src.0[c] as f64;
        let d = dest.0[c] as f64;
        let out = (s * src_alpha + d * dest_alpha * (1.0 - src_alpha)) / out_alpha;
        dest.0[c] = out.round().clamp(0.0, 255.0) as u8;
    }
    dest.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
#[path = "preview_tests.rs"]
mod tests;
