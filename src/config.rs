use bon::Builder;
use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// TIMING CONFIGURATION
// ============================================================================

/// How each tick derives the new remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickMode {
    /// Subtract one tick period per tick. Scheduler jitter accumulates as drift.
    #[default]
    FixedStep,
    /// Recompute remaining time from the instant the countdown was (re)started.
    Anchored,
}

// ============================================================================
// TIMER CONFIGURATION
// ============================================================================

/// Immutable configuration for the dial geometry, window and timing.
///
/// All lengths are in logical units of the square drawing surface; the
/// renderer multiplies them by the surface scale factor.
#[derive(Debug, Clone, Builder)]
pub struct TimerConfig {
    #[builder(into, default = "Countdown".to_string())]
    pub title: String,

    // Surface
    #[builder(default = 300)]
    pub logical_size: u32,
    /// Overrides the window's scale factor as the device pixel ratio.
    pub scale_factor: Option<f64>,

    // Dial geometry
    #[builder(default = 120.0)]
    pub radius: f64,
    #[builder(default = 100.0)]
    pub inner_radius: f64,
    #[builder(default = 20.0)]
    pub line_extension: f64,
    #[builder(default = 3.0)]
    pub stroke_width: f64,

    // Colors
    #[builder(default = Color::BLACK)]
    pub stroke_color: Color,
    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = Color::new(0xd0, 0x20, 0x20))]
    pub accent_color: Color,

    // Timing
    #[builder(default = Duration::from_millis(16))]
    pub tick_period: Duration,
    #[builder(default)]
    pub tick_mode: TickMode,

    // Text overlay
    pub font_path: Option<PathBuf>,
    #[builder(default = 40.0)]
    pub readout_font_size: f32,
    #[builder(default = 20.0)]
    pub input_font_size: f32,

    // Start/pause glyph
    #[builder(default = (270.0, 270.0))]
    pub glyph_center: (f64, f64),
    #[builder(default = 24.0)]
    pub glyph_size: f64,

    // Prefilled inputs
    #[builder(into, default = String::new())]
    pub initial_minutes: String,
    #[builder(into, default = String::new())]
    pub initial_seconds: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TimerConfig {
    /// Center of the drawing surface in logical units.
    pub fn center(&self) -> (f64, f64) {
        let half = self.logical_size as f64 / 2.0;
        (half, half)
    }

    /// Angle of the 12 o'clock reference marker, in radians.
    pub fn reference_angle(&self) -> f64 {
        -FRAC_PI_2
    }

    /// Length of both the reference marker and the hand.
    pub fn hand_length(&self) -> f64 {
        self.radius + self.line_extension
    }
}
