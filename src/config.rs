//! Configuration file support.
//!
//! Every field is optional; anything missing or unusable falls back to its
//! documented default with a logged warning.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::logging::LoggingConfig;
use crate::raster::Typeface;
use crate::style::{ClockStyle, Color};

/// Fonts tried, in order, when none is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid color {value:?} for {option}")]
    InvalidColor { option: &'static str, value: String },
    #[error("{} is not a usable font", .path.display())]
    InvalidFont { path: PathBuf },
}

/// Configuration for the application window
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background: Option<String>,
    pub start_with_secondary: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Clock".to_string(),
            width: 400,
            height: 400,
            background: None,
            start_with_secondary: false,
        }
    }
}

impl WindowConfig {
    pub fn background_color(&self) -> Color {
        resolve_color("background", self.background.as_deref(), Color::WHITE)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub filter: Option<String>,
}

impl LoggingSection {
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.filter.clone(),
            ..LoggingConfig::default()
        }
    }
}

/// Styling options of one clock, named as in layout attributes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub hour_hand_color: Option<String>,
    pub minute_hand_color: Option<String>,
    pub second_hand_color: Option<String>,
    pub hour_text_color: Option<String>,
    pub marking_color: Option<String>,
    pub clock_color: Option<String>,
    pub hour_hand_width: Option<f32>,
    pub minute_hand_width: Option<f32>,
    pub second_hand_width: Option<f32>,
    pub marking_width: Option<f32>,
    pub font_size_scale: Option<f32>,
    pub border_color: Option<String>,
    pub border_width: Option<f32>,
}

impl StyleConfig {
    /// Builds a style, substituting defaults for missing or invalid values.
    pub fn resolve(&self) -> ClockStyle {
        let defaults = ClockStyle::default();
        ClockStyle::builder()
            .hour_hand_color(resolve_color(
                "hourHandColor",
                self.hour_hand_color.as_deref(),
                defaults.hour_hand_color,
            ))
            .minute_hand_color(resolve_color(
                "minuteHandColor",
                self.minute_hand_color.as_deref(),
                defaults.minute_hand_color,
            ))
            .second_hand_color(resolve_color(
                "secondHandColor",
                self.second_hand_color.as_deref(),
                defaults.second_hand_color,
            ))
            .hour_text_color(resolve_color(
                "hourTextColor",
                self.hour_text_color.as_deref(),
                defaults.hour_text_color,
            ))
            .marking_color(resolve_color(
                "markingColor",
                self.marking_color.as_deref(),
                defaults.marking_color,
            ))
            .clock_color(resolve_color(
                "clockColor",
                self.clock_color.as_deref(),
                defaults.clock_color,
            ))
            .border_color(resolve_color(
                "borderColor",
                self.border_color.as_deref(),
                defaults.border_color,
            ))
            .hour_hand_width(resolve_width(
                "hourHandWidth",
                self.hour_hand_width,
                defaults.hour_hand_width,
            ))
            .minute_hand_width(resolve_width(
                "minuteHandWidth",
                self.minute_hand_width,
                defaults.minute_hand_width,
            ))
            .second_hand_width(resolve_width(
                "secondHandWidth",
                self.second_hand_width,
                defaults.second_hand_width,
            ))
            .marking_width(resolve_width(
                "markingWidth",
                self.marking_width,
                defaults.marking_width,
            ))
            .font_size_scale(resolve_width(
                "fontSizeScale",
                self.font_size_scale,
                defaults.font_size_scale,
            ))
            .border_width(resolve_width(
                "borderWidth",
                self.border_width,
                defaults.border_width,
            ))
            .build()
    }
}

/// Main configuration struct
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub font: Option<PathBuf>,
    pub window: WindowConfig,
    pub logging: LoggingSection,
    pub primary: StyleConfig,
    pub secondary: StyleConfig,
}

impl AppConfig {
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &text)
    }
}

pub fn parse_color(option: &'static str, value: &str) -> Result<Color, ConfigError> {
    Color::parse(value).ok_or_else(|| ConfigError::InvalidColor {
        option,
        value: value.to_string(),
    })
}

fn resolve_color(option: &'static str, value: Option<&str>, default: Color) -> Color {
    match value.map(|v| parse_color(option, v)) {
        None => default,
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            log::warn!("{err}, using default");
            default
        }
    }
}

fn resolve_width(option: &'static str, value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            log::warn!("invalid value {v} for {option}, using default {default}");
            default
        }
        None => default,
    }
}

pub fn load_font(path: &Path) -> Result<Typeface, ConfigError> {
    let data = std::fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Typeface::from_bytes(data).ok_or_else(|| ConfigError::InvalidFont {
        path: path.to_path_buf(),
    })
}

/// Loads the configured font, else the first usable system font, else the
/// built-in stroke numerals.
pub fn load_typeface(configured: Option<&Path>) -> Typeface {
    let candidates: Vec<&Path> = SYSTEM_FONT_CANDIDATES.iter().map(Path::new).collect();
    search_typeface(configured, &candidates)
}

fn search_typeface(configured: Option<&Path>, candidates: &[&Path]) -> Typeface {
    if let Some(path) = configured {
        match load_font(path) {
            Ok(typeface) => {
                log::info!("using font {}", path.display());
                return typeface;
            }
            Err(err) => log::warn!("{err}"),
        }
    }

    for &candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match load_font(candidate) {
            Ok(typeface) => {
                log::info!("using font {}", candidate.display());
                return typeface;
            }
            Err(err) => log::debug!("{err}"),
        }
    }

    log::warn!("no usable font found, drawing numerals with the built-in stroke font");
    Typeface::Stroke
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml(Path::new("empty.toml"), "").unwrap();
        assert_eq!(config.window.title, "Clock");
        assert_eq!(config.window.width, 400);
        assert_eq!(config.primary.resolve(), ClockStyle::default());
        assert_eq!(config.secondary.resolve(), ClockStyle::default());
        assert_eq!(config.window.background_color(), Color::WHITE);
    }

    #[test]
    fn camel_case_style_options_are_read() {
        let text = r##"
            font = "/tmp/some.ttf"

            [window]
            title = "Two clocks"
            width = 640
            background = "#202020"
            start_with_secondary = true

            [logging]
            filter = "debug"

            [primary]
            hourHandColor = "red"
            secondHandWidth = 1.5
            fontSizeScale = 0.12

            [secondary]
            borderColor = "#FF00FF00"
            borderWidth = 8
        "##;
        let config = AppConfig::from_toml(Path::new("test.toml"), text).unwrap();
        assert_eq!(config.font.as_deref(), Some(Path::new("/tmp/some.ttf")));
        assert_eq!(config.window.title, "Two clocks");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 400);
        assert!(config.window.start_with_secondary);
        assert_eq!(config.window.background_color(), Color::new(0x20, 0x20, 0x20));
        assert_eq!(
            config.logging.to_logging_config().env_filter.as_deref(),
            Some("debug")
        );

        let primary = config.primary.resolve();
        assert_eq!(primary.hour_hand_color, Color::RED);
        assert_eq!(primary.second_hand_width, 1.5);
        assert_eq!(primary.font_size_scale, 0.12);
        assert_eq!(primary.minute_hand_color, Color::BLACK);

        let secondary = config.secondary.resolve();
        assert_eq!(secondary.border_color, Color::GREEN);
        assert_eq!(secondary.border_width, 8.0);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let style = StyleConfig {
            hour_hand_color: Some("not-a-color".into()),
            clock_color: Some("#12".into()),
            border_width: Some(-4.0),
            marking_width: Some(f32::NAN),
            ..StyleConfig::default()
        };
        let resolved = style.resolve();
        assert_eq!(resolved.hour_hand_color, Color::BLACK);
        assert_eq!(resolved.clock_color, Color::WHITE);
        assert_eq!(resolved.border_width, 40.0);
        assert_eq!(resolved.marking_width, 1.0);
    }

    #[test]
    fn parse_color_reports_option_name() {
        let err = parse_color("borderColor", "mauve").unwrap_err();
        assert_eq!(err.to_string(), "invalid color \"mauve\" for borderColor");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window\ntitle = ").unwrap();
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn wrong_types_are_parse_errors() {
        let err = AppConfig::from_toml(Path::new("t.toml"), "[window]\nwidth = \"wide\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn config_file_round_trip_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[secondary]\nhourHandColor = \"blue\"").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.secondary.resolve().hour_hand_color, Color::BLUE);
    }

    #[test]
    fn unusable_fonts_fall_back_to_stroke() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        assert!(matches!(
            load_font(file.path()),
            Err(ConfigError::InvalidFont { .. })
        ));

        let missing = dir.path().join("missing.ttf");
        let candidates = [missing.as_path(), file.path()];
        assert!(search_typeface(Some(file.path()), &candidates).is_stroke());
        assert!(search_typeface(None, &[]).is_stroke());
    }

    #[test]
    fn missing_configured_font_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_font(&dir.path().join("absent.ttf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
