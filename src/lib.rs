//! A countdown timer drawn as a shrinking arc on a 2D pixel surface.
//!
//! The [`clock`] module owns the countdown state and pushes a progress value
//! through a [`TimerView`] on every tick; [`render`] turns a progress value
//! into a deterministic [`Scene`] that is rasterized into the window's
//! framebuffer by [`CountdownApp`].

pub mod app;
pub mod clock;
pub mod config;
pub mod controls;
pub mod error;
pub mod raster;
pub mod render;
pub mod ticker;

pub use app::{CountdownApp, Surface, WindowView};
pub use clock::{format_mmss, CountdownClock, Phase, TimerState, TimerView};
pub use config::{Color, TickMode, TimerConfig};
pub use controls::{parse_lenient, ControlAction, DurationInputs, ToggleGlyph};
pub use error::DialError;
pub use render::{DrawCommand, Scene};
pub use ticker::Ticker;
