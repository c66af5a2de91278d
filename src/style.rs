//! Colors and the per-clock visual style.

use bon::Builder;

/// Color representation for clock elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xff, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xff);
    pub const YELLOW: Color = Color::new(0xff, 0xff, 0x00);
    pub const CYAN: Color = Color::new(0x00, 0xff, 0xff);
    pub const MAGENTA: Color = Color::new(0xff, 0x00, 0xff);
    pub const GRAY: Color = Color::new(0x88, 0x88, 0x88);
    pub const DARK_GRAY: Color = Color::new(0x44, 0x44, 0x44);
    pub const LIGHT_GRAY: Color = Color::new(0xcc, 0xcc, 0xcc);
    pub const TRANSPARENT: Color = Color::with_alpha(0x00, 0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packs an `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Parses `#RRGGBB`, `#AARRGGBB` or a named color.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            let value = u32::from_str_radix(hex, 16).ok()?;
            return match hex.len() {
                6 => Some(Self::from_argb(0xff00_0000 | value)),
                8 => Some(Self::from_argb(value)),
                _ => None,
            };
        }
        let named = match input.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "yellow" => Self::YELLOW,
            "cyan" => Self::CYAN,
            "magenta" => Self::MAGENTA,
            "gray" | "grey" => Self::GRAY,
            "darkgray" | "darkgrey" => Self::DARK_GRAY,
            "lightgray" | "lightgrey" => Self::LIGHT_GRAY,
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(named)
    }
}

/// Visual parameters of one clock instance.
///
/// Values are fixed when the view is created; the view's setters swap in a
/// modified copy and invalidate.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ClockStyle {
    // Hands
    #[builder(default = Color::BLACK)]
    pub hour_hand_color: Color,
    #[builder(default = Color::BLACK)]
    pub minute_hand_color: Color,
    #[builder(default = Color::BLACK)]
    pub second_hand_color: Color,
    #[builder(default = 5.0)]
    pub hour_hand_width: f32,
    #[builder(default = 3.0)]
    pub minute_hand_width: f32,
    #[builder(default = 2.0)]
    pub second_hand_width: f32,

    // Dial
    #[builder(default = Color::BLACK)]
    pub hour_text_color: Color,
    #[builder(default = Color::BLACK)]
    pub marking_color: Color,
    #[builder(default = 1.0)]
    pub marking_width: f32,
    #[builder(default = Color::WHITE)]
    pub clock_color: Color,
    #[builder(default = 0.1)]
    pub font_size_scale: f32,

    // Border
    #[builder(default = Color::BLACK)]
    pub border_color: Color,
    #[builder(default = 40.0)]
    pub border_width: f32,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}
