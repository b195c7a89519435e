//! The `WIFI:` payload text format.
//!
//! A payload is a list of `<key>:<value>;` pairs wrapped as
//! `WIFI:<pairs>;`, for example `WIFI:T:WPA;S:Example;P:secret;;`. Pairs are
//! always emitted in the order `T`, `S`, `P`, `H`; `P` and `H` are left out
//! when the network has no password or is not hidden.
//!
//! Values are written literally. Characters such as `;` or `:` inside an
//! SSID or password are not escaped.

use std::fmt;

use crate::config::Config;
use crate::error::Error;

/// A single key/value pair of a payload.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Kv<'a> {
    pub key: &'static str,
    pub value: &'a str,
}

impl<'a> Kv<'a> {
    pub(crate) const fn new(key: &'static str, value: &'a str) -> Self {
        Self { key, value }
    }
}

impl fmt::Display for Kv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{};", self.key, self.value)
    }
}

/// Encodes `cfg` as text suitable for a WiFi QR code.
///
/// # Errors
///
/// Authentication errors from the config are returned unchanged. If those
/// pass, an empty SSID yields [`Error::MissingSsid`].
///
/// # Example
///
/// ```rust
/// use wifiqr::config::Config;
/// use wifiqr::payload::encode;
///
/// assert_eq!(encode(&Config::new("Foo")).unwrap(), "WIFI:T:;S:Foo;;");
/// ```
pub fn encode(cfg: &Config) -> Result<String, Error> {
    let auth = cfg.auth_kv()?;

    if cfg.ssid.is_empty() {
        return Err(Error::MissingSsid);
    }

    let mut kvs = vec![auth, Kv::new("S", &cfg.ssid)];
    if !cfg.password.is_empty() {
        kvs.push(Kv::new("P", &cfg.password));
    }
    if cfg.hidden {
        kvs.push(Kv::new("H", "true"));
    }

    let pairs: String = kvs.iter().map(Kv::to_string).collect();
    Ok(format!("WIFI:{pairs};"))
}
