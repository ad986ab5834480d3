//! Retained-mode dial scene.
//!
//! [`Scene::for_progress`] is the pure part of rendering: the same progress
//! always yields the same commands. [`Scene::render`] rasterizes them.

use rusttype::Font;
use std::f64::consts::TAU;

use crate::config::{Color, TimerConfig};
use crate::controls::{DurationInputs, Field, ToggleGlyph};
use crate::raster::{self, Canvas};

// ============================================================================
// GEOMETRY
// ============================================================================

/// Clamps progress into [0,1]; NaN counts as complete.
pub fn normalize_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        1.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Angle of the hand: the reference angle minus one full turn per unit of
/// progress, so the hand sweeps counterclockwise.
pub fn hand_angle(reference_angle: f64, progress: f64) -> f64 {
    reference_angle - TAU * normalize_progress(progress)
}

/// Point `length` away from `center` along `angle` (y pointing down).
pub fn polar(center: (f64, f64), length: f64, angle: f64) -> (f64, f64) {
    (
        center.0 + length * angle.cos(),
        center.1 + length * angle.sin(),
    )
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

/// One primitive, in logical units.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: (f64, f64),
        radius: f64,
        width: f64,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
    /// Counterclockwise from `start_angle` by `sweep` radians.
    Arc {
        center: (f64, f64),
        radius: f64,
        start_angle: f64,
        sweep: f64,
        width: f64,
        color: Color,
    },
    Text {
        at: (f64, f64),
        text: String,
        size: f32,
        color: Color,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// The dial for one progress value: clear, track, reference marker, hand,
    /// and the arc of remaining time unless progress is complete.
    pub fn for_progress(progress: f64, config: &TimerConfig) -> Self {
        let progress = normalize_progress(progress);
        let center = config.center();
        let width = config.stroke_width;
        let color = config.stroke_color;
        let reference = config.reference_angle();
        let dynamic = hand_angle(reference, progress);

        let mut scene = Scene::new();
        scene.add_command(DrawCommand::Clear(config.background_color));
        scene.add_command(DrawCommand::Circle {
            center,
            radius: config.inner_radius,
            width,
            color,
        });
        scene.add_command(DrawCommand::Line {
            from: center,
            to: polar(center, config.hand_length(), reference),
            width,
            color,
        });
        scene.add_command(DrawCommand::Line {
            from: center,
            to: polar(center, config.hand_length(), dynamic),
            width,
            color,
        });
        if progress < 1.0 {
            scene.add_command(DrawCommand::Arc {
                center,
                radius: config.radius,
                start_angle: dynamic,
                sweep: TAU * (1.0 - progress),
                width,
                color,
            });
        }
        scene
    }

    /// Rasterizes every command, scaling logical units by the canvas scale.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font>) {
        let s = canvas.scale();
        let px = |(x, y): (f64, f64)| (x * s, y * s);
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Circle {
                    center,
                    radius,
                    width,
                    color,
                } => {
                    raster::stroke_circle(canvas, px(*center), radius * s, width * s, *color);
                }
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    raster::stroke_line(canvas, px(*from), px(*to), width * s, *color);
                }
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep,
                    width,
                    color,
                } => {
                    raster::stroke_arc(
                        canvas,
                        px(*center),
                        radius * s,
                        *start_angle,
                        *sweep,
                        width * s,
                        *color,
                    );
                }
                DrawCommand::Text {
                    at,
                    text,
                    size,
                    color,
                } => {
                    if let Some(font) = font {
                        raster::draw_text(canvas, px(*at), text, font, size * s as f32, *color);
                    }
                }
            }
        }
    }
}

// ============================================================================
// OVERLAY
// ============================================================================

/// Everything drawn on top of the dial.
#[derive(Debug, Clone)]
pub struct Overlay<'a> {
    pub time_text: &'a str,
    pub controls_visible: bool,
    pub glyph: ToggleGlyph,
    pub inputs: &'a DurationInputs,
}

impl Scene {
    /// Adds the readout, the duration inputs and the toggle glyph.
    pub fn add_overlay(&mut self, overlay: &Overlay, config: &TimerConfig) {
        let width = config.stroke_width;
        let color = config.stroke_color;

        self.add_command(DrawCommand::Text {
            at: config.center(),
            text: overlay.time_text.to_string(),
            size: config.readout_font_size,
            color,
        });

        if overlay.controls_visible {
            let (cx, cy) = config.center();
            let y = cy + config.readout_font_size as f64;
            let inputs = [
                (Field::Minutes, overlay.inputs.minutes_text(), "m", cx - 30.0),
                (Field::Seconds, overlay.inputs.seconds_text(), "s", cx + 30.0),
            ];
            for (field, text, unit, x) in inputs {
                let color = if overlay.inputs.focus() == field {
                    config.accent_color
                } else {
                    color
                };
                let shown = if text.is_empty() { "0" } else { text };
                self.add_command(DrawCommand::Text {
                    at: (x, y),
                    text: format!("{shown}{unit}"),
                    size: config.input_font_size,
                    color,
                });
            }
        }

        let (gx, gy) = config.glyph_center;
        let h = config.glyph_size / 2.0;
        match overlay.glyph {
            ToggleGlyph::Play => {
                let a = (gx - h * 0.8, gy - h);
                let b = (gx - h * 0.8, gy + h);
                let c = (gx + h, gy);
                for (from, to) in [(a, b), (b, c), (c, a)] {
                    self.add_command(DrawCommand::Line {
                        from,
                        to,
                        width,
                        color,
                    });
                }
            }
            ToggleGlyph::Pause => {
                for x in [gx - h * 0.5, gx + h * 0.5] {
                    self.add_command(DrawCommand::Line {
                        from: (x, gy - h),
                        to: (x, gy + h),
                        width: width * 2.0,
                        color,
                    });
                }
            }
        }
    }
}

/// Whether a logical point falls on the toggle glyph.
pub fn hits_glyph(point: (f64, f64), config: &TimerConfig) -> bool {
    let (gx, gy) = config.glyph_center;
    let reach = config.glyph_size;
    (point.0 - gx).abs() <= reach && (point.1 - gy).abs() <= reach
}
