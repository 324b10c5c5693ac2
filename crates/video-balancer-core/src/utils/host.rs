//! Server identifier extraction and CDN URL construction.
//!
//! Origin hosts are named `s<digits>.<provider domain>`; the leading
//! `s<digits>` label identifies the origin server and becomes the first path
//! segment on the CDN.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;
use video_balancer_types::UrlError;

#[allow(clippy::expect_used, reason = "pattern is a compile-time literal")]
fn origin_host_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(s\d+)\.").expect("valid origin host pattern"))
}

/// Parsed pieces of an origin video URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginLocation {
    pub server_name: String,
    pub path: String,
}

/// Split a video URL into its server identifier and path.
pub fn parse_origin_url(video_url: &str) -> Result<OriginLocation, UrlError> {
    let invalid = || UrlError::InvalidUrl { url: video_url.to_string() };

    let parsed = Url::parse(video_url).map_err(|_| invalid())?;
    let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;

    let server_name = origin_host_pattern()
        .captures(host)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| UrlError::UnrecognizedHostFormat { host: host.to_string() })?;

    Ok(OriginLocation { server_name, path: original_path(video_url, &parsed) })
}

// `Url` normalises a missing path to "/"; keep it empty unless the caller wrote one.
fn original_path(raw: &str, parsed: &Url) -> String {
    let after_scheme = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority_end = after_scheme.find(['/', '?', '#']).unwrap_or(after_scheme.len());
    if after_scheme[authority_end..].starts_with('/') {
        parsed.path().to_string()
    } else {
        String::new()
    }
}

/// Extract the `s<digits>` server identifier from a video URL's hostname.
pub fn extract_server_name(video_url: &str) -> Result<String, UrlError> {
    parse_origin_url(video_url).map(|location| location.server_name)
}

/// Build `http://<cdn_host>/<server_name><path>` for a video URL.
///
/// The scheme is always `http`, whatever the original URL used.
pub fn build_cdn_url(video_url: &str, cdn_host: &str) -> Result<String, UrlError> {
    let location = parse_origin_url(video_url)?;
    Ok(cdn_url_for(&location, cdn_host))
}

pub(crate) fn cdn_url_for(location: &OriginLocation, cdn_host: &str) -> String {
    format!("http://{}/{}{}", cdn_host, location.server_name, location.path)
}
