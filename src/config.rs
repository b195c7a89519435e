//! Network descriptors for WiFi QR codes.
//!
//! A [`Config`] holds everything a phone needs to join a network: the
//! authentication type, the SSID, the password and whether the network is
//! hidden. It also carries the [`RecoveryLevel`] used when the payload is
//! turned into a QR symbol.
//!
//! # Example
//!
//! ```rust
//! use wifiqr::config::{Authentication, Config};
//!
//! let cfg = Config::new("Example")
//!     .authentication(Authentication::Wpa)
//!     .password("thisisanexample");
//!
//! assert_eq!(cfg.encode().unwrap(), "WIFI:T:WPA;S:Example;P:thisisanexample;;");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::payload::{self, Kv};
use crate::render::RecoveryLevel;

/// The type of WiFi authentication used by a network.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "AuthenticationRepr", into = "AuthenticationRepr")]
pub enum Authentication {
    /// An open network. No password may be set.
    #[default]
    None,
    /// WEP. Requires a password.
    Wep,
    /// WPA/WPA2. Requires a password.
    Wpa,
    /// A raw value outside the known range. Always rejected when encoding.
    Unknown(i32),
}

impl Authentication {
    /// The value emitted in the `T` field of the payload.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::None => Some(""),
            Self::Wep => Some("WEP"),
            Self::Wpa => Some("WPA"),
            Self::Unknown(_) => None,
        }
    }
}

impl From<i32> for Authentication {
    fn from(raw: i32) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Wep,
            2 => Self::Wpa,
            n => Self::Unknown(n),
        }
    }
}

impl From<Authentication> for i32 {
    fn from(auth: Authentication) -> Self {
        match auth {
            Authentication::None => 0,
            Authentication::Wep => 1,
            Authentication::Wpa => 2,
            Authentication::Unknown(n) => n,
        }
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Wep => f.write_str("WEP"),
            Self::Wpa => f.write_str("WPA"),
            Self::Unknown(n) => write!(f, "unknown ({n})"),
        }
    }
}

impl FromStr for Authentication {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "none" | "nopass" | "open" => Ok(Self::None),
            "wep" => Ok(Self::Wep),
            "wpa" | "wpa2" => Ok(Self::Wpa),
            _ => s.parse::<i32>().map(Self::from).map_err(|_| Error::Parse {
                kind: "authentication type",
                value: s.to_string(),
            }),
        }
    }
}

/// Serde form of [`Authentication`]: either a name or a raw integer.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AuthenticationRepr {
    Raw(i32),
    Name(String),
}

impl TryFrom<AuthenticationRepr> for Authentication {
    type Error = Error;

    fn try_from(repr: AuthenticationRepr) -> Result<Self, Self::Error> {
        match repr {
            AuthenticationRepr::Raw(n) => Ok(Self::from(n)),
            AuthenticationRepr::Name(s) => s.parse(),
        }
    }
}

impl From<Authentication> for AuthenticationRepr {
    fn from(auth: Authentication) -> Self {
        match auth {
            Authentication::None => Self::Name("none".into()),
            Authentication::Wep => Self::Name("wep".into()),
            Authentication::Wpa => Self::Name("wpa".into()),
            Authentication::Unknown(n) => Self::Raw(n),
        }
    }
}

/// The parameters for generating a WiFi QR code.
///
/// The SSID is always required. A password must be set for WEP or WPA
/// networks and must be empty for open ones. If no recovery level is given,
/// [`RecoveryLevel::Medium`] is used.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub authentication: Authentication,
    pub ssid: String,
    pub password: String,
    pub hidden: bool,
    #[serde(alias = "recovery")]
    pub recovery_level: RecoveryLevel,
}

impl Config {
    /// Creates an open network config for `ssid`.
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            ..Self::default()
        }
    }

    pub fn authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = authentication;
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn recovery_level(mut self, level: RecoveryLevel) -> Self {
        self.recovery_level = level;
        self
    }

    /// Encodes this config as a `WIFI:` payload string.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: authentication rules are
    /// checked before the SSID.
    pub fn encode(&self) -> Result<String, Error> {
        payload::encode(self)
    }

    /// Validates the password against the authentication type and returns
    /// the `T` pair.
    pub(crate) fn auth_kv(&self) -> Result<Kv<'_>, Error> {
        let value = match self.authentication {
            // Open networks carry no password.
            Authentication::None => {
                if !self.password.is_empty() {
                    return Err(Error::InvalidPassword);
                }
                ""
            }
            auth @ (Authentication::Wep | Authentication::Wpa) => {
                if self.password.is_empty() {
                    return Err(Error::MissingPassword { auth });
                }
                auth.tag().unwrap_or_default()
            }
            Authentication::Unknown(raw) => return Err(Error::InvalidAuthentication(raw)),
        };

        Ok(Kv::new("T", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_auth_kv_none() {
        let cfg = Config::new("Foo");
        assert_eq!(cfg.auth_kv().unwrap(), Kv::new("T", ""));
    }

    #[test]
    fn test_auth_kv_none_with_password() {
        let cfg = Config::new("Foo").password("xxx");
        assert!(matches!(cfg.auth_kv(), Err(Error::InvalidPassword)));
    }

    #[test]
    fn test_auth_kv_secured() {
        let wep = Config::new("Bar").authentication(Authentication::Wep).password("abc");
        let wpa = Config::new("Baz").authentication(Authentication::Wpa).password("def");
        assert_eq!(wep.auth_kv().unwrap(), Kv::new("T", "WEP"));
        assert_eq!(wpa.auth_kv().unwrap(), Kv::new("T", "WPA"));
    }

    #[test]
    fn test_auth_kv_secured_without_password() {
        for auth in [Authentication::Wep, Authentication::Wpa] {
            let cfg = Config::new("Bar").authentication(auth);
            match cfg.auth_kv() {
                Err(Error::MissingPassword { auth: got }) => assert_eq!(got, auth),
                other => panic!("expected MissingPassword, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_auth_kv_unknown() {
        let cfg = Config::new("Foo").authentication(Authentication::from(-1));
        assert!(matches!(cfg.auth_kv(), Err(Error::InvalidAuthentication(-1))));
    }

    #[test]
    fn test_authentication_from_i32() {
        assert_eq!(Authentication::from(0), Authentication::None);
        assert_eq!(Authentication::from(1), Authentication::Wep);
        assert_eq!(Authentication::from(2), Authentication::Wpa);
        assert_eq!(Authentication::from(3), Authentication::Unknown(3));
        assert_eq!(i32::from(Authentication::Unknown(-7)), -7);
    }

    #[test]
    fn test_authentication_from_str() {
        assert_eq!("WPA".parse::<Authentication>().unwrap(), Authentication::Wpa);
        assert_eq!("wep".parse::<Authentication>().unwrap(), Authentication::Wep);
        assert_eq!("nopass".parse::<Authentication>().unwrap(), Authentication::None);
        assert_eq!("-1".parse::<Authentication>().unwrap(), Authentication::Unknown(-1));
        assert!("wpa3-enterprise".parse::<Authentication>().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let cfg: Config = toml::from_str(
            r#"
            authentication = "wpa"
            ssid = "Qux"
            password = "ghi"
            hidden = true
            recovery_level = "high"
            "#,
        )
        .unwrap();

        assert_eq!(
            cfg,
            Config::new("Qux")
                .authentication(Authentication::Wpa)
                .password("ghi")
                .hidden(true)
                .recovery_level(RecoveryLevel::High)
        );
    }

    #[test]
    fn test_config_from_toml_defaults() {
        let cfg: Config = toml::from_str(r#"ssid = "Foo""#).unwrap();
        assert_eq!(cfg.authentication, Authentication::None);
        assert_eq!(cfg.recovery_level, RecoveryLevel::Medium);
        assert!(!cfg.hidden);
    }

    #[test]
    fn test_config_from_toml_raw_authentication() {
        let cfg: Config = toml::from_str("authentication = -1\nssid = \"Foo\"").unwrap();
        assert_eq!(cfg.authentication, Authentication::Unknown(-1));
    }
}
