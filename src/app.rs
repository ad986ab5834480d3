//! Window shell: winit event loop, pixels surface and the view the clock
//! draws through.

use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::WindowBuilder;

use crate::clock::{CountdownClock, TimerView};
use crate::config::TimerConfig;
use crate::controls::{action_for_named, action_for_text, ControlAction, DurationInputs, ToggleGlyph};
use crate::error::DialError;
use crate::raster::Canvas;
use crate::render::{hits_glyph, Overlay, Scene};

// ============================================================================
// SURFACE
// ============================================================================

/// Square drawing surface of fixed logical size backed by a framebuffer
/// scaled by the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    logical: u32,
    scale: f64,
}

impl Surface {
    pub fn new(logical: u32, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self { logical, scale }
    }

    pub fn logical_size(&self) -> u32 {
        self.logical
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Side of the backing framebuffer in pixels.
    pub fn physical_size(&self) -> u32 {
        ((self.logical as f64 * self.scale).round() as u32).max(1)
    }
}

/// Converts a cursor position in window pixels into logical units.
pub fn to_logical(position: PhysicalPosition<f64>, window_scale: f64) -> (f64, f64) {
    let scale = if window_scale > 0.0 { window_scale } else { 1.0 };
    (position.x / scale, position.y / scale)
}

// ============================================================================
// VIEW
// ============================================================================

/// Latest state pushed by the clock, rendered on the next redraw.
#[derive(Debug, Clone)]
pub struct WindowView {
    progress: f64,
    time_text: String,
    controls_visible: bool,
    glyph: ToggleGlyph,
    dirty: bool,
    title_dirty: bool,
}

impl Default for WindowView {
    fn default() -> Self {
        Self {
            progress: 0.0,
            time_text: String::new(),
            controls_visible: true,
            glyph: ToggleGlyph::Play,
            dirty: true,
            title_dirty: true,
        }
    }
}

impl WindowView {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn glyph(&self) -> ToggleGlyph {
        self.glyph
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a redraw is needed, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Window title with the toggle glyph and readout, if either changed
    /// since the last call.
    pub fn take_title(&mut self, base: &str) -> Option<String> {
        if std::mem::take(&mut self.title_dirty) {
            Some(format!("{} {} {}", base, self.glyph.as_str(), self.time_text))
        } else {
            None
        }
    }
}

impl TimerView for WindowView {
    fn draw(&mut self, progress: f64) {
        self.progress = progress;
        self.dirty = true;
    }

    fn show_time(&mut self, text: &str) {
        if self.time_text != text {
            self.time_text.clear();
            self.time_text.push_str(text);
            self.title_dirty = true;
            self.dirty = true;
        }
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
        self.dirty = true;
    }

    fn set_toggle_glyph(&mut self, glyph: ToggleGlyph) {
        if self.glyph != glyph {
            self.glyph = glyph;
            self.title_dirty = true;
        }
        self.dirty = true;
    }
}

/// Routes one control action to the clock or the duration inputs. The inputs
/// only accept edits while the controls are visible.
pub fn apply_action(
    action: ControlAction,
    now: Instant,
    clock: &mut CountdownClock,
    inputs: &mut DurationInputs,
    view: &mut WindowView,
) {
    let edited = match action {
        ControlAction::Toggle => {
            clock.toggle(inputs.minutes(), inputs.seconds(), now, view);
            false
        }
        ControlAction::Reset => {
            clock.reset(view);
            false
        }
        _ if !view.controls_visible() => false,
        ControlAction::NextField => {
            inputs.next_field();
            true
        }
        ControlAction::Backspace => inputs.backspace(),
        ControlAction::Digit(c) => inputs.push_digit(c),
    };
    if edited {
        view.mark_dirty();
    }
}

pub fn load_font(path: &Path) -> Result<Font<'static>, DialError> {
    let data = std::fs::read(path).map_err(|source| DialError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(data).ok_or_else(|| DialError::FontParse {
        path: path.to_path_buf(),
    })
}

// ============================================================================
// APPLICATION
// ============================================================================

pub struct CountdownApp {
    config: TimerConfig,
    font: Option<Font<'static>>,
}

impl CountdownApp {
    pub fn new(config: TimerConfig) -> Result<Self, DialError> {
        let font = match &config.font_path {
            Some(path) => {
                let font = load_font(path)?;
                info!(path = %path.display(), "font loaded");
                Some(font)
            }
            None => None,
        };
        Ok(Self { config, font })
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> Result<(), DialError> {
        let config = &self.config;
        let logical = config.logical_size as f64;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(logical, logical))
            .with_resizable(false)
            .build(&event_loop)?;
        let window = Arc::new(window);

        let mut surface = Surface::new(
            config.logical_size,
            config.scale_factor.unwrap_or_else(|| window.scale_factor()),
        );
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(
            surface.physical_size(),
            surface.physical_size(),
            surface_texture,
        )?;
        info!(
            scale = surface.scale(),
            side = surface.physical_size(),
            "surface ready"
        );

        let mut clock = CountdownClock::from_config(config);
        let mut inputs = DurationInputs::new(&config.initial_minutes, &config.initial_seconds);
        let mut view = WindowView::default();
        clock.init(&mut view);

        let mut cursor: Option<PhysicalPosition<f64>> = None;
        let mut failure: Option<DialError> = None;

        event_loop.run(|event, target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    target.exit();
                }
                WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                    let action = match &event.logical_key {
                        Key::Named(named) => action_for_named(*named),
                        Key::Character(text) => action_for_text(text),
                        _ => None,
                    };
                    if let Some(action) = action {
                        debug!(?action, "key");
                        apply_action(action, Instant::now(), &mut clock, &mut inputs, &mut view);
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = Some(position);
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    let on_glyph = cursor
                        .map(|p| hits_glyph(to_logical(p, window.scale_factor()), config))
                        .unwrap_or(false);
                    if on_glyph {
                        apply_action(
                            ControlAction::Toggle,
                            Instant::now(),
                            &mut clock,
                            &mut inputs,
                            &mut view,
                        );
                    }
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    if config.scale_factor.is_none() {
                        surface = Surface::new(config.logical_size, scale_factor);
                        let side = surface.physical_size();
                        debug!(scale_factor, side, "scale factor changed");
                        if let Err(err) = pixels.resize_buffer(side, side) {
                            warn!(%err, "failed to resize pixel buffer");
                            failure = Some(err.into());
                            target.exit();
                        }
                        view.mark_dirty();
                    }
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width > 0 && new_size.height > 0 {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!(%err, "failed to resize surface");
                            failure = Some(err.into());
                            target.exit();
                        }
                        view.mark_dirty();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let mut scene = Scene::for_progress(view.progress(), config);
                    scene.add_overlay(
                        &Overlay {
                            time_text: view.time_text(),
                            controls_visible: view.controls_visible(),
                            glyph: view.glyph(),
                            inputs: &inputs,
                        },
                        config,
                    );
                    let side = surface.physical_size() as usize;
                    let mut canvas = Canvas::new(pixels.frame_mut(), side, side, surface.scale());
                    scene.render(&mut canvas, self.font.as_ref());
                    if let Err(err) = pixels.render() {
                        warn!(%err, "render failed");
                        failure = Some(err.into());
                        target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                clock.poll(Instant::now(), &mut view);
                if let Some(title) = view.take_title(&config.title) {
                    window.set_title(&title);
                }
                if view.take_dirty() {
                    window.request_redraw();
                }
                target.set_control_flow(match clock.next_deadline() {
                    Some(deadline) => ControlFlow::WaitUntil(deadline),
                    None => ControlFlow::Wait,
                });
            }
            _ => {}
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
