//! Image preprocessing for stable shape extraction
//!
//! Turns a color input into a denoised, contrast-enhanced grayscale
//! image that the downstream fixed-threshold binarization can rely on.
//!
//! # Algorithm
//!
//! 1. Grayscale conversion (standard luminance weights)
//! 2. 7x7 Gaussian blur, sigma derived from the kernel size
//! 3. CLAHE: clipped adaptive histogram equalization on an 8x8 tile
//!    grid, bilinear interpolation between tile lookup tables
//!
//! Each step produces a new image; inputs are never mutated.

use image::{imageops, GrayImage, RgbImage};
use imageproc::filter::gaussian_blur_f32;

use crate::options::DetectOptions;

/// Preprocess a color image into an enhanced grayscale image of the
/// same dimensions. Pure transform; always succeeds on a non-empty
/// image.
pub fn preprocess(image: &RgbImage, options: &DetectOptions) -> GrayImage {
    let gray = imageops::grayscale(image);
    let blurred = gaussian_blur_f32(&gray, options.blur_sigma());
    clahe(
        &blurred,
        options.clahe_clip_limit,
        options.clahe_tile_grid,
    )
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is partitioned into a `tiles x tiles` grid (even integer
/// partition, so edge tiles absorb the remainder pixels). Each tile
/// gets a clipped, equalized lookup table; per-pixel output is the
/// bilinear blend of the four surrounding tile tables. Clipping keeps
/// flat regions flat instead of amplifying them to full range.
pub fn clahe(src: &GrayImage, clip_limit: f32, tiles: u32) -> GrayImage {
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return src.clone();
    }

    let tiles_x = tiles.clamp(1, width) as usize;
    let tiles_y = tiles.clamp(1, height) as usize;

    // Tile boundaries: tile i covers [bounds[i], bounds[i + 1])
    let x_bounds: Vec<u32> = (0..=tiles_x)
        .map(|i| (i as u64 * width as u64 / tiles_x as u64) as u32)
        .collect();
    let y_bounds: Vec<u32> = (0..=tiles_y)
        .map(|i| (i as u64 * height as u64 / tiles_y as u64) as u32)
        .collect();

    // Per-tile equalization lookup tables
    let mut luts = vec![[0u8; 256]; tiles_x * tiles_y];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut hist = [0u32; 256];
            let mut count = 0u32;
            for y in y_bounds[ty]..y_bounds[ty + 1] {
                for x in x_bounds[tx]..x_bounds[tx + 1] {
                    hist[src.get_pixel(x, y).0[0] as usize] += 1;
                    count += 1;
                }
            }
            luts[ty * tiles_x + tx] = tile_lut(&hist, count, clip_limit);
        }
    }

    // Tile centers for interpolation
    let x_centers: Vec<f32> = (0..tiles_x)
        .map(|i| (x_bounds[i] + x_bounds[i + 1]) as f32 / 2.0)
        .collect();
    let y_centers: Vec<f32> = (0..tiles_y)
        .map(|i| (y_bounds[i] + y_bounds[i + 1]) as f32 / 2.0)
        .collect();

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        let (ty0, ty1, wy) = interp_coords(y as f32 + 0.5, &y_centers);
        for x in 0..width {
            let (tx0, tx1, wx) = interp_coords(x as f32 + 0.5, &x_centers);
            let v = src.get_pixel(x, y).0[0] as usize;

            let v00 = luts[ty0 * tiles_x + tx0][v] as f32;
            let v01 = luts[ty0 * tiles_x + tx1][v] as f32;
            let v10 = luts[ty1 * tiles_x + tx0][v] as f32;
            let v11 = luts[ty1 * tiles_x + tx1][v] as f32;

            let top = v00 * (1.0 - wx) + v01 * wx;
            let bottom = v10 * (1.0 - wx) + v11 * wx;
            let value = (top * (1.0 - wy) + bottom * wy).round().clamp(0.0, 255.0);
            out.put_pixel(x, y, image::Luma([value as u8]));
        }
    }

    out
}

/// Build one tile's clipped equalization LUT from its histogram.
fn tile_lut(hist: &[u32; 256], count: u32, clip_limit: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    if count == 0 {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }

    // Clip bins and collect the excess
    let limit = ((clip_limit * count as f32 / 256.0) as u32).max(1);
    let mut clipped = [0u32; 256];
    let mut excess = 0u32;
    for i in 0..256 {
        if hist[i] > limit {
            clipped[i] = limit;
            excess += hist[i] - limit;
        } else {
            clipped[i] = hist[i];
        }
    }

    // Redistribute the excess evenly; leftover goes one per bin from 0
    let per_bin = excess / 256;
    let leftover = (excess % 256) as usize;
    for (i, bin) in clipped.iter_mut().enumerate() {
        *bin += per_bin + u32::from(i < leftover);
    }

    // Cumulative distribution scaled to the output range
    let mut cdf = 0u64;
    for i in 0..256 {
        cdf += clipped[i] as u64;
        lut[i] = ((cdf * 255 + count as u64 / 2) / count as u64).min(255) as u8;
    }
    lut
}

/// Find the two neighboring tile indices bracketing `pos` and the blend
/// weight toward the second one. Positions outside the first/last tile
/// center clamp to that tile.
fn interp_coords(pos: f32, centers: &[f32]) -> (usize, usize, f32) {
    if centers.len() == 1 || pos <= centers[0] {
        return (0, 0, 0.0);
    }
    let last = centers.len() - 1;
    if pos >= centers[last] {
        return (last, last, 0.0);
    }
    let mut i = 0;
    while pos > centers[i + 1] {
        i += 1;
    }
    let w = (pos - centers[i]) / (centers[i + 1] - centers[i]);
    (i, i + 1, w)
}

// ============================================================
// Tests
// ============================================================
