//! Clock face renderer: turns a geometry snapshot, a time reading and a style
//! into an ordered [`Scene`].

use std::f64::consts::PI;

use crate::geometry::{GeometrySnapshot, Hand, HandAngles, TimeReading};
use crate::scene::{DrawCommand, Scene};
use crate::style::ClockStyle;

pub const MINUTE_TICKS: u32 = 60;
pub const HOUR_TICKS: u32 = 12;

/// Builds the full face in paint order: face disc, minute ticks, hour ticks,
/// numerals, hour/minute/second hands, center dot, border ring.
pub fn render_clock(
    geometry: &GeometrySnapshot,
    reading: &TimeReading,
    style: &ClockStyle,
) -> Scene {
    let mut scene = Scene::new();
    let center = (geometry.cx, geometry.cy);

    scene.add_command(DrawCommand::Disc {
        center,
        radius: geometry.face_radius(),
        color: style.clock_color,
    });

    add_ticks(&mut scene, geometry, style, MINUTE_TICKS, (0.5, 1.0));
    add_ticks(&mut scene, geometry, style, HOUR_TICKS, (0.5, 1.5));

    for n in 1..=12 {
        let (x, baseline) = geometry.numeral_anchor(n);
        scene.add_command(DrawCommand::Text {
            x,
            baseline,
            text: n.to_string(),
            size: geometry.text_size,
            color: style.hour_text_color,
        });
    }

    let angles = HandAngles::from_reading(reading);
    for (hand, angle, thickness, color) in [
        (
            Hand::Hour,
            angles.hour,
            style.hour_hand_width,
            style.hour_hand_color,
        ),
        (
            Hand::Minute,
            angles.minute,
            style.minute_hand_width,
            style.minute_hand_color,
        ),
        (
            Hand::Second,
            angles.second,
            style.second_hand_width,
            style.second_hand_color,
        ),
    ] {
        scene.add_command(DrawCommand::Hand {
            hand,
            from: center,
            to: geometry.hand_end(hand, angle),
            thickness,
            color,
        });
    }

    scene.add_command(DrawCommand::Disc {
        center,
        radius: geometry.center_radius,
        color: style.second_hand_color,
    });

    scene.add_command(DrawCommand::Ring {
        center,
        radius: geometry.radius,
        width: style.border_width,
        color: style.border_color,
    });

    scene
}

/// Ticks evenly spaced around the dial, starting at 12 o'clock. `insets` are
/// the start and end distances inward from the radius, in units of padding.
fn add_ticks(
    scene: &mut Scene,
    geometry: &GeometrySnapshot,
    style: &ClockStyle,
    count: u32,
    insets: (f64, f64),
) {
    let start = geometry.radius - insets.0 * geometry.padding;
    let end = geometry.radius - insets.1 * geometry.padding;
    for i in 0..count {
        let bearing = 2.0 * PI / count as f64 * i as f64;
        scene.add_command(DrawCommand::Tick {
            from: geometry.point_at_bearing(bearing, start),
            to: geometry.point_at_bearing(bearing, end),
            thickness: style.marking_width,
            color: style.marking_color,
        });
    }
}
