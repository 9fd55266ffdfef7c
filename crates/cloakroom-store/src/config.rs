//! Store configuration: cookie attributes and session lifetime.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sessions can't be configured to live shorter than this.
pub const MIN_TTL: Duration = Duration::from_secs(60);

/// Or longer than this (`i32::MAX` seconds, about 68 years). Anything
/// larger is almost certainly a unit mistake in the config.
pub const MAX_TTL: Duration = Duration::from_secs(2_147_483_647);

/// Default session lifetime: one day.
pub const DEFAULT_TTL_SECS: u64 = 86_400;

/// Default cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "session";

/// Forces a configured TTL into `[MIN_TTL, MAX_TTL]`.
pub fn clamp_ttl(ttl: Duration) -> Duration {
    ttl.clamp(MIN_TTL, MAX_TTL)
}

// ---------------------------------------------------------------------------
// SameSite
// ---------------------------------------------------------------------------

/// The cookie's `SameSite` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl From<SameSite> for cookie::SameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

// ---------------------------------------------------------------------------
// CookieOptions
// ---------------------------------------------------------------------------

/// Attributes stamped on every session cookie.
///
/// These are fixed when the store is configured. Nothing about them is
/// negotiated per request or per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieOptions {
    /// Cookie name. Default: `"session"`.
    pub name: String,

    /// `Path` attribute. Default: `"/"`.
    pub path: String,

    /// `Domain` attribute. Omitted when `None` (host-only cookie).
    pub domain: Option<String>,

    /// Hide the cookie from page scripts. Default: `true`.
    pub http_only: bool,

    /// Only send the cookie over HTTPS. Default: `true`.
    pub secure: bool,

    /// Cross-site policy. Default: `Lax`.
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            path: "/".to_string(),
            domain: None,
            http_only: true,
            secure: true,
            same_site: SameSite::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Configuration shared by every [`SessionStore`](crate::SessionStore)
/// implementation.
///
/// `ttl_secs` is the raw configured value. Read it through
/// [`ttl()`](Self::ttl), which applies the clamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Cookie attributes.
    pub cookie: CookieOptions,

    /// Session lifetime in seconds, refreshed on every read.
    pub ttl_secs: u64,
}

impl StoreConfig {
    /// Sets the cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie.name = name.into();
        self
    }

    /// Sets the session lifetime. Clamped when read.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = ttl.as_secs();
        self
    }

    /// The effective session lifetime, clamped into `[MIN_TTL, MAX_TTL]`.
    pub fn ttl(&self) -> Duration {
        clamp_ttl(Duration::from_secs(self.ttl_secs))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cookie: CookieOptions::default(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}
