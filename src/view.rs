//! The clock view: owns one clock's style, its measured geometry and its
//! redraw scheduler, and exposes the lifecycle hooks a host calls into.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::face::render_clock;
use crate::geometry::{GeometrySnapshot, TimeReading};
use crate::raster::{Canvas, Typeface};
use crate::scene::Scene;
use crate::scheduler::{RedrawScheduler, SchedulerState, TimeSource, DEFAULT_TICK_INTERVAL};
use crate::style::{ClockStyle, Color};

/// One analog clock instance.
///
/// Redraw requests coalesce: any number of [`invalidate`](Self::invalidate)
/// calls between two [`take_redraw_request`](Self::take_redraw_request) calls
/// produce a single paint.
#[derive(Debug)]
pub struct ClockView {
    name: String,
    style: Arc<ClockStyle>,
    geometry: Option<GeometrySnapshot>,
    reading: TimeReading,
    scheduler: RedrawScheduler,
    redraw_pending: bool,
    invalidations: u64,
    refreshes: u64,
}

impl ClockView {
    pub fn new(name: impl Into<String>, style: ClockStyle) -> Self {
        Self::with_interval(name, style, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_interval(name: impl Into<String>, style: ClockStyle, interval: Duration) -> Self {
        Self {
            name: name.into(),
            style: Arc::new(style),
            geometry: None,
            reading: TimeReading::default(),
            scheduler: RedrawScheduler::new(interval),
            redraw_pending: false,
            invalidations: 0,
            refreshes: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> &ClockStyle {
        &self.style
    }

    /// Shared handle to the current style. Later setter calls do not affect
    /// handles taken earlier.
    pub fn style_snapshot(&self) -> Arc<ClockStyle> {
        Arc::clone(&self.style)
    }

    pub fn geometry(&self) -> Option<&GeometrySnapshot> {
        self.geometry.as_ref()
    }

    pub fn reading(&self) -> TimeReading {
        self.reading
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Total number of redraw requests issued so far.
    pub fn invalidation_count(&self) -> u64 {
        self.invalidations
    }

    /// Total number of time refreshes so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    // ------------------------------------------------------------------
    // Lifecycle hooks
    // ------------------------------------------------------------------

    /// The clock takes all the space it is offered.
    pub fn measure(&self, available_width: u32, available_height: u32) -> (u32, u32) {
        (available_width, available_height)
    }

    /// Recomputes the geometry snapshot if the size differs from the last
    /// one. Returns true when it was recomputed.
    pub fn size_changed(&mut self, width: u32, height: u32) -> bool {
        if let Some(geometry) = &self.geometry {
            if geometry.width == width && geometry.height == height {
                return false;
            }
        }
        self.recompute_geometry(width, height);
        true
    }

    fn recompute_geometry(&mut self, width: u32, height: u32) {
        let geometry = GeometrySnapshot::new(width, height, self.style.font_size_scale);
        log::debug!(
            "{}: geometry {}x{} radius {} padding {}",
            self.name,
            width,
            height,
            geometry.radius,
            geometry.padding
        );
        self.geometry = Some(geometry);
        self.invalidate();
    }

    /// Starts the once-per-second refresh. The time is read and a redraw is
    /// requested immediately.
    pub fn attached(&mut self, time: &dyn TimeSource) {
        if self.scheduler.activate(time.now()) {
            log::info!("{}: attached, ticking every {:?}", self.name, self.scheduler.interval());
            self.refresh(time);
        } else {
            log::debug!("{}: attach ignored in state {:?}", self.name, self.scheduler.state());
        }
    }

    /// Stops the refresh for good; nothing is requested after this returns.
    pub fn detached(&mut self) {
        if self.scheduler.is_scheduled() {
            log::info!("{}: detached", self.name);
        }
        self.scheduler.cancel();
        self.redraw_pending = false;
    }

    /// Delivers a due tick, if any. Returns true when the time was refreshed.
    pub fn poll(&mut self, time: &dyn TimeSource) -> bool {
        if !self.scheduler.poll(time.now()) {
            return false;
        }
        self.refresh(time);
        log::trace!("{}: tick {}", self.name, self.reading);
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    fn refresh(&mut self, time: &dyn TimeSource) {
        self.reading = time.reading();
        self.refreshes += 1;
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.redraw_pending = true;
        self.invalidations += 1;
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Clears and returns the pending-redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Scene for the current geometry and reading; `None` before the first
    /// size is known.
    pub fn scene(&self) -> Option<Scene> {
        self.geometry
            .as_ref()
            .map(|geometry| render_clock(geometry, &self.reading, &self.style))
    }

    pub fn draw(&self, canvas: &mut Canvas, typeface: &Typeface) {
        match self.scene() {
            Some(scene) => scene.render(canvas, typeface),
            None => log::debug!("{}: draw before first layout, skipped", self.name),
        }
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    fn update_style(&mut self, apply: impl FnOnce(&mut ClockStyle)) {
        apply(Arc::make_mut(&mut self.style));
        self.invalidate();
    }

    pub fn set_hour_hand_color(&mut self, color: Color) {
        self.update_style(|style| style.hour_hand_color = color);
    }

    pub fn set_minute_hand_color(&mut self, color: Color) {
        self.update_style(|style| style.minute_hand_color = color);
    }

    pub fn set_second_hand_color(&mut self, color: Color) {
        self.update_style(|style| style.second_hand_color = color);
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.update_style(|style| style.border_color = color);
    }

    pub fn set_hour_text_color(&mut self, color: Color) {
        self.update_style(|style| style.hour_text_color = color);
    }

    pub fn set_border_width(&mut self, width: f32) {
        self.update_style(|style| style.border_width = width);
    }

    /// Replaces the whole style. A new font scale re-derives the geometry.
    pub fn set_style(&mut self, style: ClockStyle) {
        let rescale = style.font_size_scale != self.style.font_size_scale;
        self.style = Arc::new(style);
        match self.geometry {
            Some(geometry) if rescale => self.recompute_geometry(geometry.width, geometry.height),
            _ => self.invalidate(),
        }
    }
}
