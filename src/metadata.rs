//! Request metadata types.

use http::Method;

/// Describes a single logical API request: method, path and query string.
///
/// Paths are relative to the client's base URL and start with `/`.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method.
    pub method: Method,

    /// The request path, e.g. `/v1/browse`.
    pub path: String,

    /// Query parameters, in the order they are appended to the URL.
    pub query_params: Vec<(String, String)>,

    /// Whether the `Authorization` header is attached.
    pub authenticated: bool,
}

impl RequestMetadata {
    /// Creates authenticated metadata for the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_params: Vec::new(),
            authenticated: true,
        }
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Sends the request without credentials.
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}
