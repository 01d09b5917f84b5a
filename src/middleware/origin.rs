use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct OriginConfig {
    /// Used verbatim when set, e.g. `https://favorites.example.com`.
    pub public_base_url: Option<String>,
    /// Authority used when the request carries no host at all.
    pub fallback_host: String,
}

/// `scheme://host` the client used to reach the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

impl RequestOrigin {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(resolve_origin(parts, &state.origin))
    }
}

fn resolve_origin(parts: &Parts, config: &OriginConfig) -> RequestOrigin {
    if let Some(base) = &config.public_base_url {
        return RequestOrigin(base.clone());
    }

    let scheme = forwarded(&parts.headers, "x-forwarded-proto")
        .or_else(|| parts.uri.scheme_str().map(str::to_owned))
        .unwrap_or_else(|| "http".to_owned());

    let host = forwarded(&parts.headers, "x-forwarded-host")
        .or_else(|| header_str(&parts.headers, header::HOST.as_str()))
        .or_else(|| parts.uri.authority().map(|a| a.as_str().to_owned()))
        .unwrap_or_else(|| config.fallback_host.clone());

    RequestOrigin(format!("{scheme}://{host}"))
}

// Proxies may append to these headers; the first hop is the client's view.
fn forwarded(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name)?
        .split(',')
        .next()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn config(public_base_url: Option<&str>) -> OriginConfig {
        OriginConfig {
            public_base_url: public_base_url.map(str::to_owned),
            fallback_host: "127.0.0.1:3000".into(),
        }
    }

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn uses_host_header() {
        let parts = parts(
            Request::get("/api/favorites/share/1")
                .header("host", "homes.example.com")
                .body(())
                .unwrap(),
        );
        assert_eq!(
            resolve_origin(&parts, &config(None)).as_str(),
            "http://homes.example.com"
        );
    }

    #[test]
    fn prefers_forwarded_headers() {
        let parts = parts(
            Request::get("/")
                .header("host", "10.0.0.5:3000")
                .header("x-forwarded-proto", "https, http")
                .header("x-forwarded-host", "homes.example.com")
                .body(())
                .unwrap(),
        );
        assert_eq!(
            resolve_origin(&parts, &config(None)).as_str(),
            "https://homes.example.com"
        );
    }

    #[test]
    fn falls_back_to_listen_address_then_honours_override() {
        let bare = parts(Request::get("/").body(()).unwrap());
        assert_eq!(
            resolve_origin(&bare, &config(None)).as_str(),
            "http://127.0.0.1:3000"
        );
        assert_eq!(
            resolve_origin(&bare, &config(Some("https://share.example.com"))).as_str(),
            "https://share.example.com"
        );
    }
}
