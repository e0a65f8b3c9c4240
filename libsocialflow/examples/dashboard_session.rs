//! Walk through a full dashboard session against in-memory state
//!
//! Usage:
//!   cargo run --example dashboard_session
//!
//! Runs entirely offline: generation is scripted through the mock backend
//! and publishing goes through the mock provider, so no API key is needed.
//! Swap in `GeminiBackend::from_config` to run against the hosted API.

use std::sync::Arc;

use chrono::Utc;
use libsocialflow::generation::mock::MockBackend;
use libsocialflow::generation::{CampaignRequest, GenerationGateway, SinglePostRequest};
use libsocialflow::providers::mock::MockProvider;
use libsocialflow::service::SocialFlowService;
use libsocialflow::store::Store;
use libsocialflow::types::Platform;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Script the backend: first call answers the composer, second the campaign
    let backend = MockBackend::new();
    backend.push_response(Ok(
        "Big news: SocialFlow 2.0 is live! Plan a week of content in one sitting. #launch"
            .to_string(),
    ));
    backend.push_response(Ok(r#"[
        {"content": "Day 1: the sale starts now. #sale", "platform": "Twitter", "dayOffset": 0},
        {"content": "Day 2: customer stories from year one.", "platform": "LinkedIn", "dayOffset": 1},
        {"content": "Day 3: last call, doors close tonight. #sale", "platform": "Instagram", "dayOffset": 2}
    ]"#
    .to_string()));

    let store = Store::seeded();
    let gateway = GenerationGateway::new(Arc::new(backend));
    let service = SocialFlowService::with_parts(store, gateway, Arc::new(MockProvider::new()));

    println!("=== Dashboard ===\n");
    for post in service.store().posts() {
        println!(
            "{} | {} | {} | {}",
            post.scheduled_at.format("%Y-%m-%d %H:%M"),
            post.platform,
            post.status,
            post.content
        );
    }

    println!("\n=== Settings: connect an account ===\n");
    let account = service.connect_account(Platform::Twitter).await?;
    println!(
        "Connected {} as {}",
        account.platform,
        account.username.as_deref().unwrap_or("-")
    );

    println!("\n=== Composer: generate, review, schedule ===\n");
    let text = service
        .generate_single(SinglePostRequest {
            topic: "Product Launch".to_string(),
            platform: Platform::Twitter,
            tone: "excited".to_string(),
        })
        .await?;
    println!("Generated: {}", text);

    let scheduled = service.schedule_post(
        text,
        Platform::Twitter,
        Utc::now() + chrono::Duration::hours(2),
        Some("Product Launch".to_string()),
    )?;
    println!("Scheduled as {}", scheduled.id);

    println!("\n=== Campaign: generate a multi-day batch ===\n");
    let candidates = service
        .generate_campaign(CampaignRequest {
            topic: "Spring Sale".to_string(),
            count: 3,
            start_date: Utc::now(),
        })
        .await?;
    for candidate in &candidates {
        println!(
            "{} | {} | {}",
            candidate.scheduled_at.format("%Y-%m-%d"),
            candidate.platform,
            candidate.content
        );
    }

    // Review happened above; commit the whole batch
    let committed = service.commit_campaign(candidates)?;
    println!("Committed {} posts", committed.len());

    println!("\n=== Calendar: next four days ===\n");
    let today = Utc::now().date_naive();
    for offset in 0..4 {
        let day = today + chrono::Duration::days(offset);
        let posts = service.store().posts_on_date(day);
        println!("{}: {} post(s)", day, posts.len());
        for post in posts {
            println!("  {} | {} | {}", post.platform, post.status, post.content);
        }
    }

    println!("\n=== Publish the first scheduled post ===\n");
    let published = service.publish_now(&scheduled.id).await?;
    println!("{} is now {}", published.id, published.status);

    Ok(())
}
