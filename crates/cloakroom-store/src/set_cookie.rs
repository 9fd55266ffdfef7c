//! `Set-Cookie` strings for session tokens.
//!
//! Kept apart from any particular store: every store renders cookies the
//! same way from its [`StoreConfig`], and the [`SessionStore`] trait
//! calls into here from its provided methods.
//!
//! [`SessionStore`]: crate::SessionStore

use cookie::Cookie;
use cookie::time::Duration as CookieDuration;

use crate::StoreConfig;

/// Builds the `Set-Cookie` value that hands `token` to the client.
///
/// `Max-Age` is the store's effective TTL, so the browser forgets the
/// cookie at roughly the moment an idle session would expire anyway.
pub fn session_cookie(config: &StoreConfig, token: &str) -> String {
    build(config, token.to_string()).to_string()
}

/// Builds a `Set-Cookie` value that makes the client drop the cookie
/// right away: empty value, `Max-Age=0`, an `Expires` date in the past.
pub fn removal_cookie(config: &StoreConfig) -> String {
    let mut cookie = build(config, String::new());
    cookie.make_removal();
    cookie.to_string()
}

fn build(config: &StoreConfig, value: String) -> Cookie<'static> {
    let opts = &config.cookie;
    // Cookie's `Max-Age` is an i64 of seconds; the clamp keeps the TTL
    // well inside that range.
    let max_age = i64::try_from(config.ttl().as_secs()).unwrap_or(i64::MAX);

    let mut builder = Cookie::build((opts.name.clone(), value))
        .path(opts.path.clone())
        .http_only(opts.http_only)
        .secure(opts.secure)
        .same_site(opts.same_site.into())
        .max_age(CookieDuration::seconds(max_age));
    if let Some(domain) = &opts.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}
