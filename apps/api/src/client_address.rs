//! Caller address resolution for rate limiting.
//!
//! Precedence: `x-real-ip`, then the first `x-forwarded-for` entry, then the
//! socket peer, then [`FALLBACK_CALLER_ADDRESS`].

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use jobboard_application::FALLBACK_CALLER_ADDRESS;

/// Best-effort address of the caller behind the trusted proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerAddress(pub String);

impl<S> FromRequestParts<S> for CallerAddress
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(address)| address.ip());

        Ok(Self(resolve_caller_address(&parts.headers, peer)))
    }
}

pub(crate) fn resolve_caller_address(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    let real_ip = header_value(headers, "x-real-ip");
    let forwarded_for = header_value(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    real_ip
        .or(forwarded_for)
        .map(ToOwned::to_owned)
        .or_else(|| peer.map(|address| address.to_string()))
        .unwrap_or_else(|| FALLBACK_CALLER_ADDRESS.to_owned())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
