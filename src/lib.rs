//! Analog clock face rendering.
//!
//! A [`ClockView`] turns the current wall-clock time into a drawing of a
//! clock face (disc, ticks, numerals, three hands, center dot, border) and
//! refreshes itself once per second while attached. [`app`] hosts two
//! differently styled clocks in a window and switches between them.
//!
//! ```no_run
//! use clockface::{ClockStyle, ClockView, Color, SystemTimeSource};
//!
//! let mut view = ClockView::new("clock", ClockStyle::default());
//! view.size_changed(400, 400);
//! view.attached(&SystemTimeSource::new());
//! view.set_hour_hand_color(Color::RED);
//! let scene = view.scene().unwrap();
//! assert!(!scene.is_empty());
//! ```

// ============================================================================
// MODULES
// ============================================================================

pub mod app;
pub mod config;
pub mod face;
pub mod geometry;
pub mod logging;
pub mod raster;
pub mod scene;
pub mod scheduler;
pub mod stroke_font;
pub mod style;
pub mod view;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use face::render_clock;
pub use geometry::{GeometrySnapshot, Hand, HandAngles, TimeReading};
pub use raster::{Canvas, Typeface};
pub use scene::{DrawCommand, Scene};
pub use scheduler::{
    ManualTimeSource, RedrawScheduler, SchedulerState, SystemTimeSource, TimeSource,
    DEFAULT_TICK_INTERVAL,
};
pub use style::{ClockStyle, Color};
pub use view::ClockView;
