//! Browsing pages, batching and previewing.
//!
//! Run with: `UNBROWSER_API_KEY=ub_live_... cargo run --example browse`

use std::time::Duration;
use unbrowser::{BrowseOptions, Client, ContentType, CostTier, Error, VerifyOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("unbrowser=info")
        .init();

    let api_key = std::env::var("UNBROWSER_API_KEY")?;
    let client = Client::builder(api_key)
        .timeout(Duration::from_secs(30))
        .max_retries(3)
        .build()?;

    let health = client.health().await?;
    println!("service {} (v{}, up {:.0}s)", health.status, health.version, health.uptime);

    println!("=== Preview ===");
    let preview = client
        .preview_browse("https://example.com/products/123", None)
        .await?;
    println!(
        "plan on {} tier, expected {}ms, confidence {:?}",
        preview.plan.tier.as_str(),
        preview.estimated_time.expected,
        preview.confidence.overall
    );
    for fallback in preview.plan.fallbacks() {
        println!("  fallback: {} ({})", fallback.tier.as_str(), fallback.reasoning);
    }

    println!("=== Browse ===");
    let options = BrowseOptions {
        content_type: Some(ContentType::Markdown),
        max_chars: Some(5_000),
        include_tables: Some(true),
        max_cost_tier: Some(CostTier::Lightweight),
        verify: Some(VerifyOptions::default()),
        ..Default::default()
    };
    match client
        .browse("https://example.com/products/123", Some(&options), None)
        .await
    {
        Ok(page) => {
            println!(
                "{} ({}ms on {})",
                page.title, page.metadata.load_time, page.metadata.tier
            );
            println!(
                "{} tables, {} APIs discovered",
                page.tables.len(),
                page.discovered_apis.len()
            );
            if let Some(verification) = &page.verification {
                println!("verification passed: {}", verification.passed);
            }
        }
        Err(Error::RateLimited { retry_after, .. }) => {
            println!("rate limited, retry after {:?}s", retry_after);
        }
        Err(e) => println!("browse failed: {}", e),
    }

    println!("=== Batch ===");
    let batch = client
        .batch(
            ["https://example.com/a", "https://example.com/b"],
            Some(&options),
            None,
        )
        .await?;
    for item in &batch.results {
        match (&item.data, &item.error) {
            (Some(data), _) => println!("  ok   {} -> {}", item.url, data.title),
            (None, Some(err)) => println!("  fail {} -> [{}] {}", item.url, err.code, err.message),
            (None, None) => println!("  fail {}", item.url),
        }
    }
    println!("batch took {}ms", batch.total_time);

    let intel = client.domain_intelligence("example.com").await?;
    println!(
        "example.com: {} patterns, success rate {:.2}, wait for {}",
        intel.known_patterns, intel.success_rate, intel.recommended_wait_strategy
    );

    let usage = client.usage().await?;
    println!(
        "{} requests this period, {} of {} left today",
        usage.requests.total, usage.limits.remaining, usage.limits.daily
    );

    client.close();
    Ok(())
}
