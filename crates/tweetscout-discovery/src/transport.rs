//! Transport selection for the discovery gateway.
//!
//! Two variants: the standard reqwest client, and an enhanced anti-bot
//! variant that routes through a configured proxy with browser-like
//! headers. The variant is chosen once at adapter construction; when the
//! enhanced configuration is absent or unusable the adapter degrades to
//! standard transport without affecting any other contract.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Proxy};

const STANDARD_USER_AGENT: &str = "tweetscout/0.1 (discovery)";
const ENHANCED_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Which transport variant a [`crate::DiscoveryClient`] was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Standard,
    Enhanced,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Standard => write!(f, "standard"),
            TransportKind::Enhanced => write!(f, "enhanced"),
        }
    }
}

/// Build the HTTP client for the gateway.
///
/// `proxy_url: Some(_)` selects the enhanced variant; a proxy URL that fails
/// to parse is logged and degrades to the standard variant rather than
/// failing construction.
pub(crate) fn build_transport(
    proxy_url: Option<&str>,
    timeout_secs: u64,
) -> Result<(Client, TransportKind), reqwest::Error> {
    if let Some(raw) = proxy_url {
        match Proxy::all(raw) {
            Ok(proxy) => {
                let client = Client::builder()
                    .timeout(Duration::from_secs(timeout_secs))
                    .connect_timeout(Duration::from_secs(10))
                    .default_headers(enhanced_headers())
                    .proxy(proxy)
                    .build()?;
                return Ok((client, TransportKind::Enhanced));
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "enhanced transport proxy URL is unusable; degrading to standard transport"
                );
            }
        }
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(STANDARD_USER_AGENT)
        .build()?;
    Ok((client, TransportKind::Standard))
}

fn enhanced_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(ENHANCED_USER_AGENT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_proxy_selects_standard_transport() {
        let (_, kind) = build_transport(None, 30).expect("client should build");
        assert_eq!(kind, TransportKind::Standard);
    }

    #[test]
    fn proxy_selects_enhanced_transport() {
        let (_, kind) =
            build_transport(Some("http://127.0.0.1:8888"), 30).expect("client should build");
        assert_eq!(kind, TransportKind::Enhanced);
    }

    #[test]
    fn unusable_proxy_degrades_to_standard() {
        let (_, kind) = build_transport(Some("::not a proxy::"), 30).expect("client should build");
        assert_eq!(kind, TransportKind::Standard);
    }
}
