//! Recording a workflow and replaying it with variables.
//!
//! Run with: `UNBROWSER_API_KEY=ub_live_... cargo run --example workflows`

use unbrowser::{BrowseOptions, Client, ContentType, Importance, SessionData, Variables};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("unbrowser=info")
        .init();

    let client = Client::new(std::env::var("UNBROWSER_API_KEY")?)?;

    let recording = client
        .start_recording(
            "Extract product price",
            "Open a product page and read its price",
            "example.com",
            &["pricing", "ecommerce"],
        )
        .await?;
    println!("recording {} ({})", recording.recording_id, recording.status);

    // Browse calls made while recording become workflow steps
    let options = BrowseOptions {
        content_type: Some(ContentType::Text),
        ..Default::default()
    };
    let page = client
        .browse("https://example.com/products/123", Some(&options), None)
        .await?;

    // Feed cookies back so later steps share the session
    let session = SessionData {
        cookies: page.new_cookies.clone(),
        ..Default::default()
    };
    client
        .browse("https://example.com/products/123/price", Some(&options), Some(&session))
        .await?;

    client
        .annotate_recording(
            &recording.recording_id,
            2,
            "Price lives in the sidebar",
            Some(Importance::Critical),
        )
        .await?;

    let Some(saved) = client.stop_recording(&recording.recording_id, true).await? else {
        println!("recording was not saved");
        return Ok(());
    };
    println!("saved workflow {}", saved.workflow_id);

    let mut variables = Variables::new();
    variables.insert("productId".to_string(), "456".into());
    let replay = client
        .replay_workflow(&saved.workflow_id, Some(&variables))
        .await?;
    println!(
        "replay {} in {}ms",
        if replay.overall_success { "succeeded" } else { "failed" },
        replay.total_duration
    );
    if let Some(step) = replay.first_failure() {
        println!("  step {} failed: {:?}", step.step_number, step.error);
    }

    let list = client.list_workflows(Some("example.com"), &["pricing"]).await?;
    for workflow in &list.workflows {
        println!(
            "  {} v{}: {} ({} steps)",
            workflow.id, workflow.version, workflow.name, workflow.steps
        );
    }

    let details = client.get_workflow(&saved.workflow_id).await?;
    for step in details.critical_steps() {
        println!("  critical step {}: {}", step.step_number, step.description);
    }

    let deleted = client.delete_workflow(&saved.workflow_id).await?;
    println!("deleted {}: {}", deleted.workflow_id, deleted.deleted);

    Ok(())
}
