//! Antialiased drawing primitives over an RGBA8 framebuffer.
//!
//! Coordinates passed in here are physical pixels; the scene scales logical
//! units before calling into this module.

use rusttype::{point, Font, PositionedGlyph, Scale};
use std::f64::consts::TAU;

use crate::config::Color;

// ============================================================================
// CANVAS
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    scale: f64,
}

impl<'a> Canvas<'a> {
    /// Wraps a frame of `width * height` RGBA pixels drawn at `scale` pixels
    /// per logical unit.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize, scale: f64) -> Self {
        debug_assert_eq!(frame.len(), width * height * 4);
        Self {
            frame,
            width,
            height,
            scale,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Alpha-blends `color` over the pixel at (x, y). Out of bounds is a no-op.
    pub fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, s) in src.iter().enumerate() {
            let d = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (s * a + d * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

// ============================================================================
// STROKES
// ============================================================================

/// Clips an inclusive pixel range to `0..limit`.
fn clip(min: f64, max: f64, limit: usize) -> (i64, i64) {
    let lo = (min.floor() as i64).max(0);
    let hi = (max.ceil() as i64).min(limit as i64 - 1);
    (lo, hi)
}

/// Coverage of a pixel whose center lies `dist` away from a stroke's spine.
fn stroke_coverage(dist: f64, width: f64) -> f32 {
    (width / 2.0 + 0.5 - dist).clamp(0.0, 1.0) as f32
}

/// Thick antialiased line with round caps.
pub fn stroke_line(
    canvas: &mut Canvas,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    width: f64,
    color: Color,
) {
    let pad = width / 2.0 + 1.0;
    let (min_x, max_x) = clip(x0.min(x1) - pad, x0.max(x1) + pad, canvas.width);
    let (min_y, max_y) = clip(y0.min(y1) - pad, y0.max(y1) + pad, canvas.height);
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            let t = if len_sq > 0.0 {
                (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let lx = x0 + t * dx;
            let ly = y0 + t * dy;
            let dist = ((lx - px).powi(2) + (ly - py).powi(2)).sqrt();
            let aa = stroke_coverage(dist, width);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

/// Thick antialiased arc, swept counterclockwise on screen (decreasing
/// angle, y pointing down) from `start_angle` by `sweep` radians. A sweep of
/// a full turn or more strokes the whole circle.
pub fn stroke_arc(
    canvas: &mut Canvas,
    (cx, cy): (f64, f64),
    radius: f64,
    start_angle: f64,
    sweep: f64,
    width: f64,
    color: Color,
) {
    if sweep <= 0.0 || radius <= 0.0 {
        return;
    }
    let full = sweep >= TAU;
    let pad = radius + width / 2.0 + 1.0;
    let (min_x, max_x) = clip(cx - pad, cx + pad, canvas.width);
    let (min_y, max_y) = clip(cy - pad, cy + pad, canvas.height);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let aa = stroke_coverage((dist - radius).abs(), width);
            if aa <= 0.01 {
                continue;
            }
            if !full {
                let angle = dy.atan2(dx);
                let behind_start = (start_angle - angle).rem_euclid(TAU);
                if behind_start > sweep {
                    continue;
                }
            }
            canvas.blend(x, y, color, aa);
        }
    }
}

pub fn stroke_circle(
    canvas: &mut Canvas,
    center: (f64, f64),
    radius: f64,
    width: f64,
    color: Color,
) {
    stroke_arc(canvas, center, radius, 0.0, TAU, width, color);
}

// ============================================================================
// TEXT
// ============================================================================

/// Draws `text` centered on (x, y) with a font size in pixels.
pub fn draw_text(
    canvas: &mut Canvas,
    (x, y): (f64, f64),
    text: &str,
    font: &Font,
    size: f32,
    color: Color,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    if min_x >= max_x || min_y >= max_y {
        return;
    }
    let offset_x = x.round() as i64 - i64::from(max_x - min_x) / 2;
    let offset_y = y.round() as i64 - i64::from(max_y - min_y) / 2;
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + i64::from(gx as i32 + bb.min.x - min_x);
                let py = offset_y + i64::from(gy as i32 + bb.min.y - min_y);
                canvas.blend(px, py, color, v);
            });
        }
    }
}
