//! Annotation rendering
//!
//! Draws detected rectangles and their nesting-level labels onto a copy
//! of the original image for visual inspection. Peripheral to the
//! detection core: nothing here feeds back into the pipeline.
//!
//! Labels are single digits drawn from an embedded 3x5 glyph table; the
//! crate ships no font asset. Label x-offsets alternate per record
//! index so labels of closely nested boxes do not overprint.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::nesting::NestedRect;

/// Box outline color.
const BOX_COLOR: Rgb<u8> = Rgb([0, 238, 0]);

/// Label color.
const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 238]);

/// Box outline stroke width in pixels.
const BOX_STROKE: u32 = 2;

/// Horizontal label offset applied on even record indices.
const LABEL_OFFSET: u32 = 20;

/// Integer upscale factor for the 3x5 digit glyphs.
const GLYPH_SCALE: u32 = 2;

/// 3x5 digit glyphs, one row byte per scanline, low 3 bits used.
const DIGIT_GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Render the records onto a fresh copy of `image`.
pub fn annotate(image: &RgbImage, records: &[NestedRect]) -> RgbImage {
    let mut canvas = image.clone();
    annotate_mut(&mut canvas, records);
    canvas
}

/// Render the records onto `canvas` in place.
pub fn annotate_mut(canvas: &mut RgbImage, records: &[NestedRect]) {
    for (i, record) in records.iter().enumerate() {
        draw_box(canvas, record);

        let space = if i % 2 == 0 { LABEL_OFFSET } else { 0 };
        let label_x = record.top_left.0 + space;
        let label_y = record
            .top_left
            .1
            .saturating_sub(5 * GLYPH_SCALE + 1);
        draw_label(canvas, label_x, label_y, record.level);
    }
}

/// Hollow box with a fixed stroke width, drawn inward from the record's
/// bounding box.
fn draw_box(canvas: &mut RgbImage, record: &NestedRect) {
    let (x, y) = record.top_left;
    let (x2, y2) = record.bottom_right;
    let width = x2.saturating_sub(x);
    let height = y2.saturating_sub(y);

    for inset in 0..BOX_STROKE {
        if width <= 2 * inset || height <= 2 * inset {
            break;
        }
        let rect = Rect::at((x + inset) as i32, (y + inset) as i32)
            .of_size(width - 2 * inset, height - 2 * inset);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}

/// Draw a non-negative number with the embedded digit glyphs, most
/// significant digit first.
fn draw_label(canvas: &mut RgbImage, x: u32, y: u32, value: u32) {
    let digits: Vec<usize> = {
        let mut v = value;
        let mut ds = Vec::new();
        loop {
            ds.push((v % 10) as usize);
            v /= 10;
            if v == 0 {
                break;
            }
        }
        ds.reverse();
        ds
    };

    let advance = 4 * GLYPH_SCALE;
    for (i, &digit) in digits.iter().enumerate() {
        draw_digit(canvas, x + i as u32 * advance, y, digit);
    }
}

fn draw_digit(canvas: &mut RgbImage, x: u32, y: u32, digit: usize) {
    let (width, height) = canvas.dimensions();
    let glyph = &DIGIT_GLYPHS[digit];
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..3u32 {
            if bits & (0b100 >> col) == 0 {
                continue;
            }
            for dy in 0..GLYPH_SCALE {
                for dx in 0..GLYPH_SCALE {
                    let px = x + col * GLYPH_SCALE + dx;
                    let py = y + row as u32 * GLYPH_SCALE + dy;
                    if px < width && py < height {
                        canvas.put_pixel(px, py, LABEL_COLOR);
                    }
                }
            }
        }
    }
}

// ============================================================
// Tests
// ============================================================
