//! Rate limit header parsing.
//!
//! A 429 from the service is surfaced as
//! [`Error::RateLimited`](crate::Error::RateLimited) and never retried by the
//! client. The only data carried along is the `Retry-After` hint, in seconds.

use http::HeaderMap;
use std::time::SystemTime;

/// Parses the `Retry-After` header into whole seconds.
///
/// Integer values are used as-is. HTTP-date values are converted to the
/// seconds remaining, rounded up, and clamp to zero when the date has already
/// passed. Anything else is dropped.
///
/// # Examples
///
/// ```
/// use unbrowser::rate_limit::parse_retry_after;
/// use http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("retry-after", "60".parse().unwrap());
/// assert_eq!(parse_retry_after(&headers), Some(60));
///
/// assert_eq!(parse_retry_after(&HeaderMap::new()), None);
/// ```
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    let raw = headers.get(http::header::RETRY_AFTER)?;
    let Ok(header) = raw.to_str() else {
        tracing::warn!("Ignoring non-ASCII Retry-After header");
        return None;
    };
    let header = header.trim();

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(seconds);
    }

    if let Ok(date_time) = httpdate::parse_http_date(header) {
        let remaining = date_time
            .duration_since(SystemTime::now())
            .unwrap_or_default();
        let mut seconds = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            seconds += 1;
        }
        return Some(seconds);
    }

    tracing::warn!(retry_after = header, "Ignoring unparseable Retry-After header");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use std::time::Duration;

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("60"));

        assert_eq!(parse_retry_after(&headers), Some(60));
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        let mut headers = HeaderMap::new();
        let future = SystemTime::now() + Duration::from_secs(120);
        headers.insert(
            "retry-after",
            HeaderValue::from_str(&httpdate::fmt_http_date(future)).unwrap(),
        );

        let seconds = parse_retry_after(&headers).unwrap();
        // HTTP dates have one-second resolution.
        assert!((118..=121).contains(&seconds), "got {seconds}");
    }

    #[test]
    fn test_parse_retry_after_past_date_is_zero() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "retry-after",
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );

        assert_eq!(parse_retry_after(&headers), Some(0));
    }

    #[test]
    fn test_parse_retry_after_garbage_is_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert("retry-after", HeaderValue::from_static("-5"));
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert("retry-after", HeaderValue::from_static("1.5"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    }
}
