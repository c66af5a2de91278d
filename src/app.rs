//! The host window: two clocks, one visible at a time.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::raster::{Canvas, Typeface};
use crate::scheduler::{SystemTimeSource, TimeSource};
use crate::style::{ClockStyle, Color};
use crate::view::ClockView;

/// Which of the two clocks is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Showing {
    Primary,
    Secondary,
}

impl Showing {
    pub fn toggled(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Two clock instances sharing one window, one of them visible at a time.
///
/// Both stay attached while the window is open, so the hidden one keeps its
/// time current and shows the right time the moment it is switched in.
#[derive(Debug)]
pub struct ClockHost {
    primary: ClockView,
    secondary: ClockView,
    showing: Showing,
    background: Color,
}

impl ClockHost {
    /// The secondary clock gets a red hour hand and a red border on top of its
    /// configured style.
    pub fn new(primary: ClockStyle, secondary: ClockStyle, background: Color) -> Self {
        let mut secondary = ClockView::new("secondary", secondary);
        secondary.set_hour_hand_color(Color::RED);
        secondary.set_border_color(Color::RED);

        Self {
            primary: ClockView::new("primary", primary),
            secondary,
            showing: Showing::Primary,
            background,
        }
    }

    pub fn showing(&self) -> Showing {
        self.showing
    }

    pub fn clock(&self, which: Showing) -> &ClockView {
        match which {
            Showing::Primary => &self.primary,
            Showing::Secondary => &self.secondary,
        }
    }

    fn clock_mut(&mut self, which: Showing) -> &mut ClockView {
        match which {
            Showing::Primary => &mut self.primary,
            Showing::Secondary => &mut self.secondary,
        }
    }

    pub fn visible(&self) -> &ClockView {
        self.clock(self.showing)
    }

    fn views_mut(&mut self) -> [&mut ClockView; 2] {
        [&mut self.primary, &mut self.secondary]
    }

    /// Flips the switch. The newly shown clock is invalidated.
    pub fn toggle(&mut self) -> Showing {
        self.set_showing(self.showing.toggled())
    }

    pub fn set_showing(&mut self, showing: Showing) -> Showing {
        if self.showing != showing {
            log::info!("switching to the {} clock", showing.label());
            self.showing = showing;
            self.clock_mut(showing).invalidate();
        }
        self.showing
    }

    /// Lays both clocks out over the full window area.
    pub fn resize(&mut self, width: u32, height: u32) {
        for view in self.views_mut() {
            let (w, h) = view.measure(width, height);
            view.size_changed(w, h);
        }
    }

    pub fn attach(&mut self, time: &dyn TimeSource) {
        for view in self.views_mut() {
            view.attached(time);
        }
    }

    pub fn detach(&mut self) {
        for view in self.views_mut() {
            view.detached();
        }
    }

    /// Delivers due ticks and reports whether the window needs repainting.
    /// Redraw requests from the hidden clock are dropped.
    pub fn poll(&mut self, time: &dyn TimeSource) -> bool {
        for view in self.views_mut() {
            view.poll(time);
        }
        let hidden = self.showing.toggled();
        self.clock_mut(hidden).take_redraw_request();
        self.clock_mut(self.showing).take_redraw_request()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        [self.primary.next_deadline(), self.secondary.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn paint(&self, canvas: &mut Canvas, typeface: &Typeface) {
        canvas.clear(self.background);
        self.visible().draw(canvas, typeface);
    }
}

/// Window settings for [`run`].
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowOptions {
    fn title_for(&self, showing: Showing) -> String {
        format!("{} ({})", self.title, showing.label())
    }
}

/// Opens the window and runs until it is closed.
pub fn run(options: WindowOptions, mut host: ClockHost, typeface: Typeface) -> Result<()> {
    let time = SystemTimeSource::new();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let window = WindowBuilder::new()
        .with_title(options.title_for(host.showing()))
        .with_inner_size(LogicalSize::new(
            options.width as f64,
            options.height as f64,
        ))
        .build(&event_loop)
        .context("failed to create window")?;

    let window = Arc::new(window);
    let window_clone = window.clone();

    let size = window.inner_size();
    let mut fb_width = size.width;
    let mut fb_height = size.height;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels =
        Pixels::new(size.width, size.height, surface_texture).context("failed to create surface")?;
    host.resize(fb_width, fb_height);

    event_loop
        .run(move |event, window_target| match event {
            Event::NewEvents(StartCause::Init) => {
                host.attach(&time);
                window_clone.request_redraw();
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    host.detach();
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    // The frame keeps its old size if the buffer cannot be resized.
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        log::error!("failed to resize buffer: {err}");
                        return;
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        log::error!("failed to resize surface: {err}");
                    }
                    fb_width = new_size.width;
                    fb_height = new_size.height;
                    host.resize(fb_width, fb_height);
                    window_clone.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => match logical_key {
                    Key::Named(NamedKey::Space | NamedKey::Tab | NamedKey::Enter) => {
                        let showing = host.toggle();
                        window_clone.set_title(&options.title_for(showing));
                        window_clone.request_redraw();
                    }
                    Key::Named(NamedKey::Escape) => {
                        host.detach();
                        window_target.exit();
                    }
                    _ => {}
                },
                WindowEvent::RedrawRequested => {
                    let frame = pixels.frame_mut();
                    let mut canvas = Canvas::new(frame, fb_width as usize, fb_height as usize);
                    host.paint(&mut canvas, &typeface);
                    if let Err(err) = pixels.render() {
                        log::error!("render failed: {err}");
                        host.detach();
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if host.poll(&time) {
                    window_clone.request_redraw();
                }
                match host.next_deadline() {
                    Some(deadline) => window_target.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => window_target.set_control_flow(ControlFlow::Wait),
                }
            }
            Event::LoopExiting => host.detach(),
            _ => {}
        })
        .context("event loop terminated with error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ManualTimeSource, SchedulerState};
    use std::time::Duration;

    fn host() -> ClockHost {
        ClockHost::new(ClockStyle::default(), ClockStyle::default(), Color::WHITE)
    }

    #[test]
    fn secondary_clock_is_restyled() {
        let host = host();
        let secondary = host.clock(Showing::Secondary).style();
        assert_eq!(secondary.hour_hand_color, Color::RED);
        assert_eq!(secondary.border_color, Color::RED);
        assert_eq!(
            host.clock(Showing::Primary).style().hour_hand_color,
            Color::BLACK
        );
    }

    #[test]
    fn toggle_flips_visibility_and_invalidates() {
        let mut host = host();
        assert_eq!(host.showing(), Showing::Primary);
        assert_eq!(host.toggle(), Showing::Secondary);
        assert!(host.visible().redraw_pending());
        assert_eq!(host.toggle(), Showing::Primary);
        assert_eq!(host.set_showing(Showing::Primary), Showing::Primary);
    }

    #[test]
    fn resize_lays_out_both_clocks() {
        let mut host = host();
        host.resize(600, 400);
        for which in [Showing::Primary, Showing::Secondary] {
            let geometry = host.clock(which).geometry().unwrap();
            assert_eq!((geometry.width, geometry.height), (600, 400));
            assert_eq!(geometry.radius, 180.0);
        }
    }

    #[test]
    fn poll_reports_only_visible_redraws() {
        let source = ManualTimeSource::at(8, 0, 0);
        let mut host = host();
        host.resize(100, 100);
        host.attach(&source);
        assert!(host.poll(&source));
        assert!(!host.poll(&source));

        source.advance(Duration::from_secs(1));
        assert!(host.poll(&source));
        // Hidden clock ticked too.
        assert_eq!(
            host.clock(Showing::Secondary).reading(),
            host.clock(Showing::Primary).reading()
        );
        assert!(!host.clock(Showing::Secondary).redraw_pending());
    }

    #[test]
    fn detach_stops_both_clocks() {
        let source = ManualTimeSource::at(8, 0, 0);
        let mut host = host();
        host.attach(&source);
        assert!(host.next_deadline().is_some());
        host.detach();
        assert_eq!(host.next_deadline(), None);
        for which in [Showing::Primary, Showing::Secondary] {
            assert_eq!(host.clock(which).scheduler_state(), SchedulerState::Stopped);
        }
        source.advance(Duration::from_secs(5));
        assert!(!host.poll(&source));
    }

    #[test]
    fn paint_shows_only_the_visible_clock() {
        let source = ManualTimeSource::at(3, 0, 0);
        let mut host = host();
        host.resize(200, 200);
        host.attach(&source);

        let mut frame = vec![0u8; 200 * 200 * 4];
        let mut canvas = Canvas::new(&mut frame, 200, 200);
        host.paint(&mut canvas, &Typeface::Stroke);
        // Primary: black hour hand toward 3 o'clock.
        assert_eq!(canvas.pixel(130, 100), Some([0, 0, 0, 0xff]));

        host.toggle();
        host.paint(&mut canvas, &Typeface::Stroke);
        assert_eq!(canvas.pixel(130, 100), Some([0xff, 0, 0, 0xff]));
    }
}
