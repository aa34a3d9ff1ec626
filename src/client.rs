//! The Unbrowser API client.
//!
//! [`Client`] owns the connection pool, attaches credentials and runs every
//! call through the retry policy. Use [`ClientBuilder`] to configure one.

use crate::{
    credentials::ApiKey,
    metadata::RequestMetadata,
    rate_limit::parse_retry_after,
    retry::RetryPolicy,
    types::{
        requests::{
            AnnotateRequest, BatchRequest, BrowseRequest, ReplayRequest, StartRecordingRequest,
            StopRecordingRequest,
        },
        BatchResult, BrowseOptions, BrowsePreview, BrowseResult, DeletedWorkflow,
        DomainIntelligence, HealthStatus, Importance, RecordingSession, ReplayResult, SessionData,
        StepAnnotation, StoppedRecording, Usage, Variables, WorkflowDetails, WorkflowList,
    },
    Error, Response, Result,
};
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.unbrowser.ai";

/// Per-attempt timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client identifier sent as `User-Agent`.
pub const USER_AGENT: &str = concat!("unbrowser-rust/", env!("CARGO_PKG_VERSION"));

/// A client for the Unbrowser API.
///
/// Cloning is cheap; clones share one connection pool. The pool is released
/// when the last clone is dropped, or explicitly through [`Client::close`].
///
/// # Examples
///
/// ```no_run
/// use unbrowser::{BrowseOptions, Client, ContentType};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), unbrowser::Error> {
/// let client = Client::builder("ub_live_xxxxx")
///     .timeout(Duration::from_secs(30))
///     .max_retries(5)
///     .build()?;
///
/// let options = BrowseOptions {
///     content_type: Some(ContentType::Markdown),
///     max_chars: Some(10_000),
///     ..Default::default()
/// };
/// let result = client
///     .browse("https://example.com/products/123", Some(&options), None)
///     .await?;
/// println!("{}", result.content.markdown);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    auth_header: HeaderValue,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

/// The `{success, data, error}` wrapper around every authenticated response.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl Client {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the API key is empty or malformed.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// The validated API key.
    pub fn api_key(&self) -> &ApiKey {
        &self.inner.api_key
    }

    /// The base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// The retry policy applied to every authenticated call.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry_policy
    }

    /// Releases this handle to the connection pool.
    ///
    /// Dropping the client has the same effect; this exists for call sites
    /// that want the release to be explicit.
    pub fn close(self) {
        tracing::debug!(
            base_url = %self.inner.base_url,
            handles = Arc::strong_count(&self.inner),
            "Closing client handle"
        );
    }

    /// Makes a typed call against an enveloped endpoint.
    ///
    /// The body is serialized once, each attempt is classified, and the
    /// envelope's `data` is deserialized into `Res`. A missing `data` is
    /// treated as `null`, so `Res = Option<T>` accepts empty payloads.
    ///
    /// # Errors
    ///
    /// Returns the classified error of the last attempt; see
    /// [`Error::is_retryable`] for which failures are retried.
    pub async fn call<Req, Res>(
        &self,
        metadata: RequestMetadata,
        body: Option<&Req>,
    ) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| Error::Validation(format!("Failed to serialize request: {}", e)))?;

        let (response, _) = self
            .inner
            .retry_policy
            .run(|attempt| self.execute_attempt(&metadata, body.as_ref(), attempt, start_time))
            .await?;

        Ok(response)
    }

    /// Makes a GET request to an enveloped endpoint.
    pub async fn get<Res>(&self, path: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let metadata = RequestMetadata::new(Method::GET, path);
        self.call::<(), Res>(metadata, None).await
    }

    /// Makes a POST request with a JSON body to an enveloped endpoint.
    pub async fn post<Req, Res>(&self, path: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let metadata = RequestMetadata::new(Method::POST, path);
        self.call(metadata, Some(body)).await
    }

    /// Makes a DELETE request to an enveloped endpoint.
    pub async fn delete<Res>(&self, path: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let metadata = RequestMetadata::new(Method::DELETE, path);
        self.call::<(), Res>(metadata, None).await
    }

    /// Runs one physical attempt and classifies its outcome.
    async fn execute_attempt<Res>(
        &self,
        metadata: &RequestMetadata,
        body: Option<&Value>,
        attempt: usize,
        start_time: Instant,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let (status, headers, raw_body) = self.send(metadata, body, attempt).await?;
        let data = classify_response(status, &headers, &raw_body)?;

        Ok(Response {
            data,
            raw_body,
            status,
            headers,
            latency: start_time.elapsed(),
            attempts: attempt,
        })
    }

    /// Sends a request and reads the full body.
    async fn send(
        &self,
        metadata: &RequestMetadata,
        body: Option<&Value>,
        attempt: usize,
    ) -> Result<(StatusCode, HeaderMap, String)> {
        let url = self.url_for(metadata)?;

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            attempt = attempt,
            "Executing HTTP request"
        );

        let sent_at = Instant::now();
        let mut request = self
            .inner
            .http_client
            .request(metadata.method.clone(), url)
            .timeout(self.inner.timeout);

        if metadata.authenticated {
            request = request.header(header::AUTHORIZATION, self.inner.auth_header.clone());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;

        tracing::info!(
            status = status.as_u16(),
            latency_ms = sent_at.elapsed().as_millis(),
            attempt = attempt,
            "Received HTTP response"
        );

        Ok((status, headers, raw_body))
    }

    fn url_for(&self, metadata: &RequestMetadata) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.inner.base_url, metadata.path))?;
        if !metadata.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(&metadata.query_params);
        }
        Ok(url)
    }

    async fn post_data<Req, Res>(&self, path: String, body: &Req) -> Result<Res>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        self.post(path, body).await.map(Response::into_data)
    }

    /// Browses a URL and extracts its content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty URL; otherwise any
    /// classified API error.
    pub async fn browse(
        &self,
        url: &str,
        options: Option<&BrowseOptions>,
        session: Option<&SessionData>,
    ) -> Result<BrowseResult> {
        require("url", url)?;
        let body = BrowseRequest {
            url,
            options,
            session,
        };
        self.post_data("/v1/browse".to_string(), &body).await
    }

    /// Fetches a URL using tiered rendering, starting with the fastest tier
    /// and escalating only when extraction fails.
    pub async fn fetch(
        &self,
        url: &str,
        options: Option<&BrowseOptions>,
        session: Option<&SessionData>,
    ) -> Result<BrowseResult> {
        require("url", url)?;
        let body = BrowseRequest {
            url,
            options,
            session,
        };
        self.post_data("/v1/fetch".to_string(), &body).await
    }

    /// Browses several URLs in one call. The service fetches them in
    /// parallel; per-URL failures are reported in the result, not as an
    /// error.
    pub async fn batch(
        &self,
        urls: impl IntoIterator<Item = impl Into<String>>,
        options: Option<&BrowseOptions>,
        session: Option<&SessionData>,
    ) -> Result<BatchResult> {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        if urls.is_empty() {
            return Err(Error::Validation("urls must not be empty".to_string()));
        }
        for url in &urls {
            require("url", url)?;
        }
        let body = BatchRequest {
            urls: &urls,
            options,
            session,
        };
        self.post_data("/v1/batch".to_string(), &body).await
    }

    /// Returns the plan the service would follow for a URL, without browsing.
    pub async fn preview_browse(
        &self,
        url: &str,
        options: Option<&BrowseOptions>,
    ) -> Result<BrowsePreview> {
        require("url", url)?;
        let body = BrowseRequest {
            url,
            options,
            session: None,
        };
        self.post_data("/v1/browse/preview".to_string(), &body).await
    }

    /// Returns learned patterns and recommendations for a domain.
    pub async fn domain_intelligence(&self, domain: &str) -> Result<DomainIntelligence> {
        let domain = path_segment("domain", domain)?;
        self.get(format!("/v1/domains/{}/intelligence", domain))
            .await
            .map(Response::into_data)
    }

    /// Returns usage for the current billing period.
    pub async fn usage(&self) -> Result<Usage> {
        self.get("/v1/usage").await.map(Response::into_data)
    }

    /// Checks service health.
    ///
    /// Sent without credentials, made once, and parsed from the flat body
    /// regardless of status.
    pub async fn health(&self) -> Result<HealthStatus> {
        let metadata = RequestMetadata::new(Method::GET, "/health").unauthenticated();
        let (status, _, raw_body) = self.send(&metadata, None, 1).await?;
        parse_body(status, &raw_body)
    }

    /// Starts recording browse operations for later replay.
    pub async fn start_recording(
        &self,
        name: &str,
        description: &str,
        domain: &str,
        tags: &[&str],
    ) -> Result<RecordingSession> {
        require("name", name)?;
        require("domain", domain)?;
        let body = StartRecordingRequest {
            name,
            description,
            domain,
            tags,
        };
        self.post_data("/v1/workflows/record/start".to_string(), &body)
            .await
    }

    /// Stops a recording. With `save` set, the recording becomes a workflow
    /// and its identifiers are returned; otherwise the service returns no
    /// data and the result is `None`.
    pub async fn stop_recording(
        &self,
        recording_id: &str,
        save: bool,
    ) -> Result<Option<StoppedRecording>> {
        let recording_id = path_segment("recording_id", recording_id)?;
        self.post_data(
            format!("/v1/workflows/record/{}/stop", recording_id),
            &StopRecordingRequest { save },
        )
        .await
    }

    /// Annotates a step of an active recording.
    pub async fn annotate_recording(
        &self,
        recording_id: &str,
        step_number: u32,
        annotation: &str,
        importance: Option<Importance>,
    ) -> Result<StepAnnotation> {
        let recording_id = path_segment("recording_id", recording_id)?;
        let body = AnnotateRequest {
            step_number,
            annotation,
            importance,
        };
        self.post_data(
            format!("/v1/workflows/record/{}/annotate", recording_id),
            &body,
        )
        .await
    }

    /// Replays a saved workflow, substituting `variables` into its steps.
    pub async fn replay_workflow(
        &self,
        workflow_id: &str,
        variables: Option<&Variables>,
    ) -> Result<ReplayResult> {
        let workflow_id = path_segment("workflow_id", workflow_id)?;
        let body = ReplayRequest {
            variables: variables.filter(|vars| !vars.is_empty()),
        };
        self.post_data(format!("/v1/workflows/{}/replay", workflow_id), &body)
            .await
    }

    /// Lists saved workflows, optionally filtered by domain and tags.
    pub async fn list_workflows(
        &self,
        domain: Option<&str>,
        tags: &[&str],
    ) -> Result<WorkflowList> {
        let mut metadata = RequestMetadata::new(Method::GET, "/v1/workflows");
        if let Some(domain) = domain.filter(|d| !d.is_empty()) {
            metadata = metadata.with_query_param("domain", domain);
        }
        if !tags.is_empty() {
            metadata = metadata.with_query_param("tags", tags.join(","));
        }
        self.call::<(), WorkflowList>(metadata, None)
            .await
            .map(Response::into_data)
    }

    /// Returns a workflow with its full step list.
    pub async fn get_workflow(&self, workflow_id: &str) -> Result<WorkflowDetails> {
        let workflow_id = path_segment("workflow_id", workflow_id)?;
        self.get(format!("/v1/workflows/{}", workflow_id))
            .await
            .map(Response::into_data)
    }

    /// Deletes a saved workflow.
    pub async fn delete_workflow(&self, workflow_id: &str) -> Result<DeletedWorkflow> {
        let workflow_id = path_segment("workflow_id", workflow_id)?;
        self.delete(format!("/v1/workflows/{}", workflow_id))
            .await
            .map(Response::into_data)
    }
}

/// Maps one HTTP response onto the envelope's data or a classified error.
fn classify_response<Res>(status: StatusCode, headers: &HeaderMap, raw_body: &str) -> Result<Res>
where
    Res: DeserializeOwned,
{
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            return Err(Error::RateLimited {
                message: envelope_message(raw_body)
                    .unwrap_or_else(|| "Rate limit exceeded".to_string()),
                retry_after: parse_retry_after(headers),
            });
        }
        StatusCode::UNAUTHORIZED => {
            return Err(Error::Authentication {
                message: envelope_message(raw_body)
                    .unwrap_or_else(|| "Invalid or missing API key".to_string()),
            });
        }
        StatusCode::FORBIDDEN => {
            return Err(Error::api(
                "FORBIDDEN",
                "API key does not have access to this resource",
            ));
        }
        _ => {}
    }

    let envelope: Envelope = match serde_json::from_str(raw_body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_server_error() => {
            tracing::warn!(
                status = status.as_u16(),
                error = %e,
                "Server error without an API envelope"
            );
            return Err(Error::api(
                "SERVER_ERROR",
                format!("HTTP {}: {}", status.as_u16(), excerpt(raw_body)),
            ));
        }
        Err(e) => return Err(deserialization_failed(status, raw_body, e)),
    };

    if !envelope.success {
        let error = envelope.error.unwrap_or_default();
        return Err(Error::Api {
            code: error.code.unwrap_or_else(|| "UNKNOWN_ERROR".to_string()),
            message: error.message.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    serde_json::from_value(envelope.data.unwrap_or(Value::Null))
        .map_err(|e| deserialization_failed(status, raw_body, e))
}

/// Parses a body that is not wrapped in an envelope.
fn parse_body<Res>(status: StatusCode, raw_body: &str) -> Result<Res>
where
    Res: DeserializeOwned,
{
    serde_json::from_str(raw_body).map_err(|e| deserialization_failed(status, raw_body, e))
}

fn deserialization_failed(status: StatusCode, raw_body: &str, e: serde_json::Error) -> Error {
    tracing::error!(
        error = %e,
        status = status.as_u16(),
        raw_response = %raw_body,
        "Failed to deserialize response"
    );

    Error::DeserializationFailed {
        status,
        raw_response: raw_body.to_string(),
        serde_error: e.to_string(),
    }
}

fn envelope_message(raw_body: &str) -> Option<String> {
    serde_json::from_str::<Envelope>(raw_body)
        .ok()?
        .error?
        .message
        .filter(|message| !message.is_empty())
}

fn excerpt(raw_body: &str) -> &str {
    const MAX: usize = 200;
    match raw_body.char_indices().nth(MAX) {
        Some((idx, _)) => &raw_body[..idx],
        None => raw_body,
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Validates a value that is interpolated into the request path.
fn path_segment<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    require(field, value)?;
    if value.contains(['/', '?', '#']) || value.chars().any(char::is_whitespace) {
        return Err(Error::Validation(format!(
            "{} contains characters not allowed in a path segment",
            field
        )));
    }
    Ok(value)
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use unbrowser::Client;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), unbrowser::Error> {
/// let client = Client::builder("ub_test_xxxxx")
///     .base_url("https://staging.api.unbrowser.ai/")?
///     .timeout(Duration::from_secs(10))
///     .retry(false)
///     .build()?;
///
/// assert_eq!(client.base_url(), "https://staging.api.unbrowser.ai");
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Sets the base URL. Trailing slashes are stripped.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or not http(s).
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let trimmed = url.as_ref().trim_end_matches('/');
        let parsed = Url::parse(trimmed)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "Unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Sets the timeout applied to each attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables retries.
    pub fn retry(mut self, enabled: bool) -> Self {
        self.retry_policy.enabled = enabled;
        self
    }

    /// Sets the total number of attempts per request when retries are on.
    pub fn max_retries(mut self, max_attempts: usize) -> Self {
        self.retry_policy.max_attempts = max_attempts;
        self
    }

    /// Sets the backoff unit; the wait after failed attempt `k` is `2^k`
    /// units.
    pub fn backoff_unit(mut self, unit: Duration) -> Self {
        self.retry_policy.backoff_unit = unit;
        self
    }

    /// Replaces the whole retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed API key, before any
    /// network resource is created, and [`Error::Configuration`] if the HTTP
    /// stack cannot be initialized.
    pub fn build(self) -> Result<Client> {
        let api_key = ApiKey::new(self.api_key)?;

        let mut auth_header = HeaderValue::from_str(&api_key.bearer())
            .map_err(|e| Error::Validation(format!("Invalid API key: {}", e)))?;
        auth_header.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        default_headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        let http_client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                Error::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        tracing::debug!(
            base_url = %self.base_url,
            timeout_ms = self.timeout.as_millis(),
            max_attempts = self.retry_policy.total_attempts(),
            "Built Unbrowser client"
        );

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: self.base_url,
                api_key,
                auth_header,
                timeout: self.timeout,
                retry_policy: self.retry_policy,
            }),
        })
    }
}
