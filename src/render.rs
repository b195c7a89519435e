//! QR symbol generation for WiFi payloads.
//!
//! This module is the boundary to the QR encoder. It maps a [`RecoveryLevel`]
//! to the encoder's error correction level and wraps the resulting symbol in
//! an [`Image`], which can be rasterized, drawn as SVG or printed as a block
//! of Unicode text.

use std::fmt;
use std::str::FromStr;

use ::qrcode::render::{svg, unicode};
use ::qrcode::{EcLevel, QrCode};
use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;

/// Pixels per module in rasterized images.
pub const MODULE_PIXELS: u32 = 10;

/// The QR code recovery and error detection level.
///
/// Medium is a good default for most applications, and it is what an unset
/// or unrecognized level resolves to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "RecoveryLevelRepr", into = "RecoveryLevelRepr")]
pub enum RecoveryLevel {
    /// Tolerates ~15% erroneous codewords.
    #[default]
    Medium,
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~25% erroneous codewords.
    High,
    /// Tolerates ~30% erroneous codewords.
    Highest,
    /// A raw value outside the known range.
    Unknown(i32),
}

impl RecoveryLevel {
    /// Returns the encoder's error correction level for this recovery level.
    ///
    /// The encoder's own default is not used: anything other than `Low`,
    /// `High` or `Highest` becomes [`EcLevel::M`].
    pub fn ec_level(self) -> EcLevel {
        match self {
            Self::Low => EcLevel::L,
            Self::High => EcLevel::Q,
            Self::Highest => EcLevel::H,
            Self::Medium | Self::Unknown(_) => EcLevel::M,
        }
    }
}

impl From<i32> for RecoveryLevel {
    fn from(raw: i32) -> Self {
        match raw {
            0 => Self::Medium,
            1 => Self::Low,
            2 => Self::High,
            3 => Self::Highest,
            n => Self::Unknown(n),
        }
    }
}

impl From<RecoveryLevel> for i32 {
    fn from(level: RecoveryLevel) -> Self {
        match level {
            RecoveryLevel::Medium => 0,
            RecoveryLevel::Low => 1,
            RecoveryLevel::High => 2,
            RecoveryLevel::Highest => 3,
            RecoveryLevel::Unknown(n) => n,
        }
    }
}

impl fmt::Display for RecoveryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medium => f.write_str("medium"),
            Self::Low => f.write_str("low"),
            Self::High => f.write_str("high"),
            Self::Highest => f.write_str("highest"),
            Self::Unknown(n) => write!(f, "unknown ({n})"),
        }
    }
}

impl FromStr for RecoveryLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "medium" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            "high" | "q" => Ok(Self::High),
            "highest" | "h" => Ok(Self::Highest),
            _ => s.parse::<i32>().map(Self::from).map_err(|_| Error::Parse {
                kind: "recovery level",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RecoveryLevelRepr {
    Raw(i32),
    Name(String),
}

impl TryFrom<RecoveryLevelRepr> for RecoveryLevel {
    type Error = Error;

    fn try_from(repr: RecoveryLevelRepr) -> Result<Self, Self::Error> {
        match repr {
            RecoveryLevelRepr::Raw(n) => Ok(Self::from(n)),
            RecoveryLevelRepr::Name(s) => s.parse(),
        }
    }
}

impl From<RecoveryLevel> for RecoveryLevelRepr {
    fn from(level: RecoveryLevel) -> Self {
        match level {
            RecoveryLevel::Unknown(n) => Self::Raw(n),
            known => Self::Name(known.to_string()),
        }
    }
}

/// A WiFi QR code which may be rendered in a variety of formats for display.
pub struct Image {
    payload: String,
    code: QrCode,
}

impl Image {
    /// Generates the QR code for `cfg`.
    ///
    /// # Errors
    ///
    /// Validation errors from [`Config::encode`] are returned as is. A
    /// payload that does not fit in a QR symbol yields [`Error::Render`].
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        let payload = cfg.encode()?;
        let ec_level = cfg.recovery_level.ec_level();
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ec_level)?;

        tracing::debug!(
            recovery_level = %cfg.recovery_level,
            ?ec_level,
            width = code.width(),
            "generated WiFi QR code"
        );

        Ok(Self { payload, code })
    }

    /// The encoded `WIFI:` payload carried by this code.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The error correction level the symbol was built with.
    pub fn ec_level(&self) -> EcLevel {
        self.code.error_correction_level()
    }

    /// Width of the symbol in modules, not counting the quiet zone.
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Returns a grayscale image with [`MODULE_PIXELS`] pixels per module
    /// and a quiet zone.
    pub fn to_image(&self) -> ImageBuffer<Luma<u8>, Vec<u8>> {
        self.code
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .build()
    }

    /// Returns a compact Unicode rendering suitable for display in a
    /// terminal. Colors are inverted so the code reads as dark on light on
    /// terminals with a dark background.
    pub fn to_text(&self) -> String {
        let mut text = self
            .code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build();
        text.push('\n');
        text
    }

    /// Returns an SVG document depicting this code.
    pub fn to_svg(&self) -> String {
        self.code
            .render::<svg::Color<'_>>()
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("payload", &self.payload)
            .field("ec_level", &self.ec_level())
            .field("width", &self.width())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Authentication;
    use pretty_assertions::assert_eq;

    fn example() -> Config {
        Config::new("Example")
            .authentication(Authentication::Wpa)
            .password("thisisanexample")
    }

    #[test]
    fn test_ec_level() {
        let cases = [
            (RecoveryLevel::default(), EcLevel::M),
            (RecoveryLevel::from(100), EcLevel::M),
            (RecoveryLevel::Low, EcLevel::L),
            (RecoveryLevel::Medium, EcLevel::M),
            (RecoveryLevel::High, EcLevel::Q),
            (RecoveryLevel::Highest, EcLevel::H),
        ];

        for (level, want) in cases {
            assert_eq!(level.ec_level(), want, "level: {level:?}");
        }
    }

    #[test]
    fn test_recovery_level_from_str() {
        assert_eq!("Highest".parse::<RecoveryLevel>().unwrap(), RecoveryLevel::Highest);
        assert_eq!("l".parse::<RecoveryLevel>().unwrap(), RecoveryLevel::Low);
        assert_eq!("7".parse::<RecoveryLevel>().unwrap(), RecoveryLevel::Unknown(7));
        assert!("extreme".parse::<RecoveryLevel>().is_err());
    }

    #[test]
    fn test_image_new() {
        let img = Image::new(&example()).unwrap();
        assert_eq!(img.payload(), "WIFI:T:WPA;S:Example;P:thisisanexample;;");
        assert_eq!(img.ec_level(), EcLevel::M);
        // 41 bytes at medium fits in a version 3 symbol.
        assert_eq!(img.width(), 29);
    }

    #[test]
    fn test_image_new_recovery_level() {
        let img = Image::new(&example().recovery_level(RecoveryLevel::Highest)).unwrap();
        assert_eq!(img.ec_level(), EcLevel::H);
    }

    #[test]
    fn test_image_new_invalid_config() {
        let err = Image::new(&Config::new("Foo").password("xxx")).unwrap_err();
        assert!(matches!(err, Error::InvalidPassword));
    }

    #[test]
    fn test_image_new_too_long() {
        let cfg = Config::new("x".repeat(4000)).recovery_level(RecoveryLevel::Highest);
        assert!(matches!(Image::new(&cfg), Err(Error::Render(_))));
    }

    #[test]
    fn test_to_image() {
        let img = Image::new(&example()).unwrap();
        let buf = img.to_image();
        // 29 modules plus a 4 module quiet zone on each side.
        assert_eq!(buf.dimensions(), (370, 370));
        assert_eq!(buf.get_pixel(0, 0), &Luma([255u8]));
        assert_eq!(buf.get_pixel(40, 40), &Luma([0u8]));
    }

    #[test]
    fn test_to_text() {
        let text = Image::new(&example()).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();

        // Two module rows per line: (29 + 8) rows -> 19 lines.
        assert_eq!(lines.len(), 19);
        assert!(lines.iter().all(|line| line.chars().count() == 37));
        assert!(lines[0].chars().all(|c| c == '█'));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_to_svg() {
        let svg = Image::new(&example()).unwrap().to_svg();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }
}
