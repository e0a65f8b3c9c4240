//! Mock publishing provider
//!
//! Simulates the account handshake and the publish call: optional latency, a
//! fixed per-platform username table to draw from, and configurable failure
//! injection. Calls are recorded so tests can verify what went out.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;
use uuid::Uuid;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::providers::PublishingProvider;
use crate::types::{Platform, SocialPost};

/// Usernames the simulated handshake picks between, per platform
fn username_options(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Twitter => &["@social_pro", "@marketing_guru", "@brand_hero"],
        Platform::LinkedIn => &["Social Pro Company", "Enterprise Solutions", "Tech Corp"],
        Platform::Facebook => &["SocialPro Page", "Community Hub", "Business Page"],
        Platform::Instagram => &["@social_pro_official", "@visual_arts", "@daily_trends"],
    }
}

/// Mock provider for testing and for running without real platform access
pub struct MockProvider {
    delay: Duration,
    link_error: Option<String>,
    publish_error: Option<String>,
    linked: Mutex<Vec<Platform>>,
    published: Mutex<Vec<SocialPost>>,
}

impl MockProvider {
    /// Create a provider that always succeeds with no latency
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(0),
            link_error: None,
            publish_error: None,
            linked: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider honoring the configured handshake latency
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.connect_delay_ms),
            ..Self::new()
        }
    }

    /// Create a provider with a fixed latency on every call
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    /// Create a provider whose handshake always fails
    pub fn link_failure(error: &str) -> Self {
        Self {
            link_error: Some(error.to_string()),
            ..Self::new()
        }
    }

    /// Create a provider whose publish call always fails
    pub fn publish_failure(error: &str) -> Self {
        Self {
            publish_error: Some(error.to_string()),
            ..Self::new()
        }
    }

    /// Platforms whose handshake was run, in call order
    pub fn linked_platforms(&self) -> Vec<Platform> {
        self.linked.lock().unwrap().clone()
    }

    /// Posts handed to `publish`, in call order
    pub fn published_posts(&self) -> Vec<SocialPost> {
        self.published.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishingProvider for MockProvider {
    async fn link_account(
        &self,
        platform: Platform,
    ) -> std::result::Result<String, ProviderError> {
        self.linked.lock().unwrap().push(platform);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(error) = &self.link_error {
            return Err(ProviderError::Linking(error.clone()));
        }

        // Random pick simulates linking a different account each time
        let options = username_options(platform);
        let username = options[rand::thread_rng().gen_range(0..options.len())];
        Ok(username.to_string())
    }

    async fn publish(&self, post: &SocialPost) -> std::result::Result<String, ProviderError> {
        self.published.lock().unwrap().push(post.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(error) = &self.publish_error {
            return Err(ProviderError::Publishing(error.clone()));
        }

        Ok(format!(
            "{}:mock-{}",
            post.platform.as_str().to_lowercase(),
            Uuid::new_v4()
        ))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
