//! # wifiqr
//!
//! A Rust library for generating WiFi QR codes.
//!
//! `wifiqr` turns a network description (authentication type, SSID, password and
//! visibility) into the `WIFI:` text payload understood by phone cameras, then
//! encodes that payload as a QR code. The code can be rendered as a PNG image,
//! an SVG document, or a compact block of Unicode text for terminals.
//!
//! ## Features
//!
//! - Validate network descriptions before any QR code is produced: open
//!   networks must not carry a password, WEP and WPA networks must.
//! - Deterministic payloads: fields are always emitted as `T`, `S`, `P`, `H`.
//! - Four recovery levels, defaulting to medium.
//! - Render QR codes as text, PNG images, SVGs, or in-memory image buffers.
//!
//! ## Example
//!
//! Generate a QR code for a WPA network and print it to the terminal:
//!
//! ```rust
//! use wifiqr::config::{Authentication, Config};
//!
//! let cfg = Config::new("Example")
//!     .authentication(Authentication::Wpa)
//!     .password("thisisanexample");
//!
//! let img = wifiqr::new(&cfg).unwrap();
//! assert_eq!(img.payload(), "WIFI:T:WPA;S:Example;P:thisisanexample;;");
//! print!("{img}");
//! ```
//!
//! Save it as a PNG:
//!
//! ```rust,no_run
//! use wifiqr::config::{Authentication, Config};
//! use wifiqr::helper::save_png;
//!
//! let cfg = Config::new("Example")
//!     .authentication(Authentication::Wpa)
//!     .password("thisisanexample");
//!
//! let img = wifiqr::new(&cfg).unwrap();
//! save_png(&img, None, Some("example")).expect("Failed to save image");
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Network descriptions and their validation rules.
//! - [`payload`]: The `WIFI:` text encoding.
//! - [`render`]: Recovery levels and QR symbol generation.
//! - [`helper`]: Utilities for writing QR codes in various formats.
//! - [`error`]: The error type shared by all of the above.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod helper;
pub mod payload;
pub mod render;

pub use config::{Authentication, Config};
pub use error::Error;
pub use render::{Image, RecoveryLevel};

/// Generates a WiFi QR code using the parameters defined in `cfg`.
///
/// See [`Config`] for the validation rules.
pub fn new(cfg: &Config) -> Result<Image, Error> {
    Image::new(cfg)
}
