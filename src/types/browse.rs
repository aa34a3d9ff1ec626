//! Results of browse, fetch and batch calls.

use super::de;
use super::options::Cookie;
use serde::{Deserialize, Serialize};

/// Extracted page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResult {
    pub markdown: String,
    pub text: String,
    #[serde(default)]
    pub html: Option<String>,
}

/// A table found on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// An API endpoint the page was observed calling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredApi {
    pub url: String,
    pub method: String,
    pub content_type: String,
}

/// How the page was loaded.
///
/// `tier` is kept as a string: the service may report tiers that are not
/// valid as a [`CostTier`](super::CostTier) budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseMetadata {
    /// Load time in milliseconds.
    pub load_time: u64,
    pub tier: String,
    pub tiers_attempted: Vec<String>,
}

/// Outcome of post-browse verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub passed: bool,
    pub confidence: f64,
    pub checks_run: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub errors: Vec<String>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub warnings: Vec<String>,
}

/// Result of a browse or fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResult {
    pub url: String,
    pub final_url: String,
    pub title: String,
    pub content: ContentResult,
    pub metadata: BrowseMetadata,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub tables: Vec<TableData>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub discovered_apis: Vec<DiscoveredApi>,
    /// Cookies set by the page, ready to be fed back through
    /// [`SessionData`](super::SessionData).
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub new_cookies: Vec<Cookie>,
    #[serde(default)]
    pub verification: Option<VerificationResult>,
}

/// Why a single URL in a batch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItemError {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub message: String,
}

/// One URL's outcome in a batch. A failed item does not fail the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResultItem {
    pub url: String,
    pub success: bool,
    #[serde(default)]
    pub data: Option<BrowseResult>,
    #[serde(default)]
    pub error: Option<BatchItemError>,
}

/// Result of a batch browse, one item per requested URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub results: Vec<BatchResultItem>,
    /// Wall time for the whole batch in milliseconds.
    pub total_time: u64,
}

impl BatchResult {
    /// Items that succeeded.
    pub fn successes(&self) -> impl Iterator<Item = &BatchResultItem> {
        self.results.iter().filter(|item| item.success)
    }

    /// Items that failed.
    pub fn failures(&self) -> impl Iterator<Item = &BatchResultItem> {
        self.results.iter().filter(|item| !item.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(url: &str, title: &str) -> serde_json::Value {
        json!({
            "url": url,
            "finalUrl": url,
            "title": title,
            "content": { "markdown": format!("# {title}"), "text": title },
            "metadata": {
                "loadTime": 100,
                "tier": "intelligence",
                "tiersAttempted": ["intelligence"],
            },
        })
    }

    #[test]
    fn test_minimal_browse_result() {
        let result: BrowseResult =
            serde_json::from_value(page("https://example.com", "Example")).unwrap();

        assert_eq!(result.title, "Example");
        assert_eq!(result.content.html, None);
        assert_eq!(result.metadata.load_time, 100);
        assert!(result.tables.is_empty());
        assert!(result.new_cookies.is_empty());
        assert!(result.verification.is_none());
    }

    #[test]
    fn test_full_browse_result() {
        let mut value = page("https://shop.example.com/p/1", "Product");
        let object = value.as_object_mut().unwrap();
        object.insert(
            "tables".into(),
            json!([{ "headers": ["Size", "Price"], "rows": [["S", "$10"], ["M", "$12"]] }]),
        );
        object.insert(
            "discoveredApis".into(),
            json!([{ "url": "https://shop.example.com/api/p/1", "method": "GET", "contentType": "application/json" }]),
        );
        object.insert(
            "newCookies".into(),
            json!([{ "name": "cart", "value": "xyz", "domain": "shop.example.com" }]),
        );
        object.insert(
            "verification".into(),
            json!({ "passed": true, "confidence": 0.92, "checksRun": 4, "errors": null, "warnings": ["slow"] }),
        );

        let result: BrowseResult = serde_json::from_value(value).unwrap();

        assert_eq!(result.tables[0].rows[1], vec!["M", "$12"]);
        assert_eq!(result.discovered_apis[0].content_type, "application/json");
        assert_eq!(result.new_cookies[0].path.as_deref(), Some("/"));
        let verification = result.verification.unwrap();
        assert_eq!(verification.checks_run, 4);
        assert!(verification.errors.is_empty());
        assert_eq!(verification.warnings, vec!["slow"]);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut value = page("https://example.com", "Example");
        value.as_object_mut().unwrap().remove("finalUrl");

        let err = serde_json::from_value::<BrowseResult>(value).unwrap_err();
        assert!(err.to_string().contains("finalUrl"));
    }

    #[test]
    fn test_batch_with_mixed_outcomes() {
        let value = json!({
            "results": [
                { "url": "https://example.com/1", "success": true, "data": page("https://example.com/1", "Page 1") },
                { "url": "https://example.com/2", "success": false, "error": { "code": "FETCH_FAILED", "message": "Failed" } },
            ],
            "totalTime": 250,
        });

        let batch: BatchResult = serde_json::from_value(value).unwrap();

        assert_eq!(batch.results.len(), 2);
        assert_eq!(batch.total_time, 250);
        assert_eq!(batch.successes().count(), 1);
        assert_eq!(batch.failures().count(), 1);
        assert_eq!(batch.results[0].data.as_ref().unwrap().title, "Page 1");
        assert!(batch.results[1].data.is_none());
        assert_eq!(batch.results[1].error.as_ref().unwrap().code, "FETCH_FAILED");
    }
}
