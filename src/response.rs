//! Successful call wrapper.
//!
//! Endpoint methods on [`Client`](crate::Client) return typed results
//! directly. [`Client::call`](crate::Client::call) returns a [`Response`] so
//! callers that need transport details (status, headers, attempts, latency)
//! can get at them.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// The unwrapped `data` of a successful envelope plus transport details.
///
/// # Examples
///
/// ```no_run
/// use unbrowser::{Client, RequestMetadata, Usage};
/// use http::Method;
///
/// # async fn example() -> Result<(), unbrowser::Error> {
/// let client = Client::new("ub_live_xxxxx")?;
///
/// let metadata = RequestMetadata::new(Method::GET, "/v1/usage");
/// let response = client.call::<(), Usage>(metadata, None).await?;
///
/// println!("requests so far: {}", response.data.requests.total);
/// println!("took {:?} over {} attempt(s)", response.latency, response.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The deserialized `data` field of the envelope.
    pub data: T,

    /// The raw response body of the successful attempt.
    pub raw_body: String,

    /// The HTTP status code of the successful attempt.
    pub status: StatusCode,

    /// The response headers of the successful attempt.
    pub headers: HeaderMap,

    /// Time from the first attempt until the successful response was parsed,
    /// backoff included.
    pub latency: Duration,

    /// The number of attempts used; `1` when no retry was needed.
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Maps the response data to a different type, keeping the metadata.
    ///
    /// ```
    /// # use unbrowser::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response {
    ///     data: 42,
    ///     raw_body: r#"{"success":true,"data":42}"#.to_string(),
    ///     status: StatusCode::OK,
    ///     headers: HeaderMap::new(),
    ///     latency: Duration::from_millis(100),
    ///     attempts: 1,
    /// };
    ///
    /// let response = response.map(|n| n.to_string());
    /// assert_eq!(response.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Discards the metadata and returns the data.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Returns `true` if the request needed more than one attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
