/// Client details attached to activity rows
///
/// Read straight from request headers. The `x-forwarded-for` value is kept
/// whole, proxy chain included.

use axum::http::{header, HeaderMap};
use taskflow_shared::activity::USER_AGENT_UNAVAILABLE;

/// Recorded when the request carries no `x-forwarded-for`
pub const FALLBACK_IP: &str = "127.0.0.1";

/// Who made the request, as far as headers tell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip_address = header_str(headers, "x-forwarded-for").unwrap_or(FALLBACK_IP);
        let user_agent =
            header_str(headers, header::USER_AGENT.as_str()).unwrap_or(USER_AGENT_UNAVAILABLE);

        Self {
            ip_address: ip_address.to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
