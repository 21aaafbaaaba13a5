//! Request filters and dispatcher route mappings.

use axum::http::{HeaderMap, HeaderValue, header::CONTENT_TYPE};

/// Path pattern the front dispatcher is mounted on. The root mapping means
/// every request path under the application's mount point goes through it.
pub const DISPATCHER_MAPPING: &str = "/";

/// Charset forced on request and response text payloads.
pub const FORCED_ENCODING: &str = "UTF-8";

/// Descriptor for the interceptor that fixes the character encoding used
/// for reading and writing text payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingFilter {
    pub encoding: &'static str,

    /// When set, the charset is overridden even if the peer already
    /// supplied one.
    pub force: bool,
}

impl EncodingFilter {
    /// The stock filter: UTF-8, always forced.
    pub fn forced() -> Self {
        Self {
            encoding: FORCED_ENCODING,
            force: true,
        }
    }

    /// Rewrite the `Content-Type` header so its charset parameter equals
    /// this filter's encoding. Headers without a `Content-Type` are left
    /// alone; there is no payload encoding to fix.
    pub fn apply_to(&self, headers: &mut HeaderMap) {
        let Some(value) = headers.get(CONTENT_TYPE) else {
            return;
        };
        let Ok(text) = value.to_str() else {
            return;
        };

        let has_charset = text
            .split(';')
            .skip(1)
            .any(|param| param.trim_start().to_ascii_lowercase().starts_with("charset="));
        if has_charset && !self.force {
            return;
        }

        let mime = text.split(';').next().unwrap_or(text).trim();
        let rewritten = format!("{mime}; charset={}", self.encoding);
        if let Ok(value) = HeaderValue::from_str(&rewritten) {
            headers.insert(CONTENT_TYPE, value);
        }
    }
}

/// Path patterns handled by the front dispatcher. A single entry: the
/// root catch-all.
pub fn route_mappings() -> &'static [&'static str] {
    &[DISPATCHER_MAPPING]
}

/// Filters installed ahead of the dispatcher. A single entry: the forced
/// UTF-8 encoding filter.
pub fn request_filters() -> Vec<EncodingFilter> {
    vec![EncodingFilter::forced()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_content_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn content_type(headers: &HeaderMap) -> &str {
        headers.get(CONTENT_TYPE).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_single_root_mapping() {
        assert_eq!(route_mappings(), ["/"]);
    }

    #[test]
    fn test_single_forced_utf8_filter() {
        let filters = request_filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].encoding, "UTF-8");
        assert!(filters[0].force);
    }

    #[test]
    fn test_charset_added_when_missing() {
        let filter = EncodingFilter::forced();
        let mut headers = headers_with_content_type("text/html");
        filter.apply_to(&mut headers);
        assert_eq!(content_type(&headers), "text/html; charset=UTF-8");
    }

    #[test]
    fn test_existing_charset_overridden_when_forced() {
        let filter = EncodingFilter::forced();
        let mut headers = headers_with_content_type("text/html; charset=iso-8859-1");
        filter.apply_to(&mut headers);
        assert_eq!(content_type(&headers), "text/html; charset=UTF-8");
    }

    #[test]
    fn test_existing_charset_kept_when_not_forced() {
        let filter = EncodingFilter {
            encoding: FORCED_ENCODING,
            force: false,
        };
        let mut headers = headers_with_content_type("text/html; charset=iso-8859-1");
        filter.apply_to(&mut headers);
        assert_eq!(content_type(&headers), "text/html; charset=iso-8859-1");
    }

    #[test]
    fn test_absent_content_type_left_alone() {
        let filter = EncodingFilter::forced();
        let mut headers = HeaderMap::new();
        filter.apply_to(&mut headers);
        assert!(headers.get(CONTENT_TYPE).is_none());
    }
}
