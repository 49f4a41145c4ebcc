//! Request builders mimicking real clients.

use conneg_protocol::NegotiationRequest;

/// The `Accept` header Chrome sends for a page load.
pub const CHROME_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// The `Accept` header Firefox sends for a page load.
pub const FIREFOX_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A typical browser `Accept-Language` header.
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-GB,en-US;q=0.9,en;q=0.8";

/// A request as a browser sends it.
pub fn browser_request() -> NegotiationRequest {
    NegotiationRequest::new()
        .with_accept(CHROME_ACCEPT)
        .with_accept_language(BROWSER_ACCEPT_LANGUAGE)
}

/// A request built from a raw query string such as `_profile=x&_format=y`.
///
/// Values are not percent-decoded; `+` is left as-is.
pub fn query_request(query: &str) -> NegotiationRequest {
    NegotiationRequest::from_query_pairs(query.split('&').filter(|p| !p.is_empty()).map(|pair| {
        match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request() {
        let request = query_request("_view=alt&_format=text/turtle&_lang=");
        assert_eq!(request.profile.as_deref(), Some("alt"));
        assert_eq!(request.media_type.as_deref(), Some("text/turtle"));
        assert_eq!(request.language.as_deref(), Some(""));
    }

    #[test]
    fn test_browser_request_has_headers() {
        let request = browser_request();
        assert!(request.accept.is_some());
        assert!(request.accept_profile.is_none());
    }
}
