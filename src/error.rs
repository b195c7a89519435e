//! Error types for WiFi QR code generation.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::Authentication;

/// Errors returned while encoding or rendering a WiFi QR code.
///
/// The validation variants are never retried or wrapped: they reach the
/// caller exactly as the config check produced them.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    // ── Validation ───────────────────────────────────────────────────

    #[error("cannot set a password with no authentication type")]
    #[diagnostic(
        code(wifiqr::invalid_password),
        help("Remove the password, or pick WEP or WPA authentication.")
    )]
    InvalidPassword,

    #[error("a password must be set for {auth} authentication")]
    #[diagnostic(code(wifiqr::missing_password))]
    MissingPassword { auth: Authentication },

    #[error("invalid authentication type")]
    #[diagnostic(
        code(wifiqr::invalid_authentication),
        help("Authentication must be one of: none, wep, wpa.")
    )]
    InvalidAuthentication(i32),

    #[error("no SSID is set")]
    #[diagnostic(code(wifiqr::missing_ssid))]
    MissingSsid,

    // ── Parsing ──────────────────────────────────────────────────────

    #[error("invalid {kind}: '{value}'")]
    #[diagnostic(code(wifiqr::parse))]
    Parse { kind: &'static str, value: String },

    // ── Rendering & output ───────────────────────────────────────────

    #[error("failed to build QR code")]
    #[diagnostic(
        code(wifiqr::render),
        help("The SSID and password may be too long to fit in a QR code.")
    )]
    Render(#[from] ::qrcode::types::QrError),

    #[error("failed to write image")]
    #[diagnostic(code(wifiqr::image))]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    #[diagnostic(code(wifiqr::io))]
    Io(#[from] std::io::Error),
}
