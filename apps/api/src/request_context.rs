use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::{CONTENT_LENGTH, USER_AGENT};
use axum::http::{HeaderMap, request::Parts};
use dochost_domain::RequestMetadata;

use crate::state::AppState;

/// Caller details every handler logs alongside its event.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub metadata: RequestMetadata,
    /// Declared `Content-Length`, not the number of bytes received.
    pub content_length: Option<u64>,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(address)| address);

        Ok(extract_request_context(
            &parts.headers,
            peer,
            state.trust_forwarded_for,
        ))
    }
}

pub(crate) fn extract_request_context(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> RequestContext {
    let forwarded_ip = trust_forwarded_for
        .then(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToOwned::to_owned)
        })
        .flatten();

    let ip = forwarded_ip.or_else(|| peer.map(|address| address.ip().to_string()));

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    let content_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    RequestContext {
        metadata: RequestMetadata { ip, user_agent },
        content_length,
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::http::{HeaderMap, HeaderValue};

    use super::extract_request_context;

    fn peer() -> Option<SocketAddr> {
        Some(SocketAddr::from(([172, 17, 0, 1], 51_234)))
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn uses_peer_address_and_headers() {
        let context = extract_request_context(
            &headers(&[("user-agent", "curl/8.5.0"), ("content-length", "42")]),
            peer(),
            false,
        );

        assert_eq!(context.metadata.ip.as_deref(), Some("172.17.0.1"));
        assert_eq!(context.metadata.user_agent.as_deref(), Some("curl/8.5.0"));
        assert_eq!(context.content_length, Some(42));
    }

    #[test]
    fn ignores_forwarded_for_unless_trusted() {
        let forwarded = headers(&[("x-forwarded-for", "198.51.100.4, 10.0.0.1")]);

        let untrusted = extract_request_context(&forwarded, peer(), false);
        assert_eq!(untrusted.metadata.ip.as_deref(), Some("172.17.0.1"));

        let trusted = extract_request_context(&forwarded, peer(), true);
        assert_eq!(trusted.metadata.ip.as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn missing_values_are_none() {
        let context = extract_request_context(
            &headers(&[("content-length", "not-a-number")]),
            None,
            true,
        );

        assert_eq!(context.metadata.ip, None);
        assert_eq!(context.metadata.user_agent, None);
        assert_eq!(context.content_length, None);
    }
}
