//! Content generation gateway
//!
//! This module turns domain requests (a single post, a multi-day campaign)
//! into calls against a text-generation backend and maps what comes back
//! into domain values. The gateway is stateless with respect to the store:
//! generated content is returned to the caller for review and only reaches
//! the store when the caller commits it.
//!
//! # Backends
//!
//! The [`GenerationBackend`] trait is the seam between prompt construction
//! and wire handling. [`gemini::GeminiBackend`] speaks the hosted REST API;
//! [`mock::MockBackend`] is a scriptable stand-in for tests.
//!
//! # Concurrency
//!
//! A gateway admits one request at a time. A second request started while
//! one is in flight fails immediately with [`GenerationError::InFlight`]
//! rather than queueing behind it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, warn};

use crate::error::{GenerationError, Result, SocialFlowError};
use crate::types::{CampaignPost, Platform, PostStatus};

pub mod gemini;
pub mod mock;

/// Prompt plus an optional response contract, ready for a backend
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// When set, the backend must constrain output to JSON matching this
    /// schema; when `None` the response is free text.
    pub response_schema: Option<serde_json::Value>,
}

/// One round trip against a text-generation service
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text for the given request
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GenerationError>;

    /// Model identifier this backend generates with
    fn model(&self) -> &str;
}

/// Request for one platform-tuned post
#[derive(Debug, Clone)]
pub struct SinglePostRequest {
    pub topic: String,
    pub platform: Platform,
    /// Free-form tone label (e.g. "professional", "witty")
    pub tone: String,
}

/// Request for a multi-day batch of posts about one topic
#[derive(Debug, Clone)]
pub struct CampaignRequest {
    pub topic: String,
    pub count: usize,
    /// Day-zero anchor; each generated item schedules itself a whole number
    /// of days after this instant
    pub start_date: DateTime<Utc>,
}

/// An item as the backend returns it, before domain mapping
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignItem {
    content: String,
    platform: String,
    day_offset: i64,
}

/// Gateway over a generation backend
///
/// Cloning shares the backend and the in-flight guard, so clones still admit
/// only one request between them.
#[derive(Clone)]
pub struct GenerationGateway {
    backend: Arc<dyn GenerationBackend>,
    in_flight: Arc<Semaphore>,
}

impl GenerationGateway {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            in_flight: Arc::new(Semaphore::new(1)),
        }
    }

    /// Generate the text of one post
    ///
    /// One request, one response; no retries. Whitespace-only output is
    /// reported as [`GenerationError::EmptyContent`].
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank topic; otherwise whatever the backend
    /// reports, plus `InFlight` if another generation is running.
    pub async fn generate_single(&self, request: &SinglePostRequest) -> Result<String> {
        if request.topic.trim().is_empty() {
            return Err(SocialFlowError::InvalidInput(
                "Topic cannot be empty".to_string(),
            ));
        }

        let _permit = self.acquire_slot()?;

        debug!(
            platform = %request.platform,
            tone = %request.tone,
            model = %self.backend.model(),
            "Generating single post"
        );

        let text = self
            .backend
            .generate(&GenerationRequest {
                prompt: single_post_prompt(request),
                response_schema: None,
            })
            .await?;

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyContent.into());
        }
        Ok(text.to_string())
    }

    /// Generate a batch of campaign candidates
    ///
    /// The backend is asked for a schema-constrained JSON array; each item
    /// becomes a [`CampaignPost`] scheduled `dayOffset` whole days after
    /// `start_date`, status `Scheduled`, with the campaign topic attached.
    ///
    /// # Errors
    ///
    /// A response that is not a JSON array of the expected items, that names
    /// an unknown platform, or that carries a day offset beyond the
    /// representable date range fails the whole call with
    /// `InvalidResponseShape`; there are no partial results.
    pub async fn generate_campaign(&self, request: &CampaignRequest) -> Result<Vec<CampaignPost>> {
        if request.topic.trim().is_empty() {
            return Err(SocialFlowError::InvalidInput(
                "Topic cannot be empty".to_string(),
            ));
        }
        if request.count == 0 {
            return Err(SocialFlowError::InvalidInput(
                "Campaign must request at least one post".to_string(),
            ));
        }

        let _permit = self.acquire_slot()?;

        debug!(
            count = request.count,
            model = %self.backend.model(),
            "Generating campaign"
        );

        let raw = self
            .backend
            .generate(&GenerationRequest {
                prompt: campaign_prompt(request),
                response_schema: Some(campaign_response_schema()),
            })
            .await?;

        parse_campaign(&raw, request)
    }

    fn acquire_slot(&self) -> Result<SemaphorePermit<'_>> {
        self.in_flight
            .try_acquire()
            .map_err(|_| GenerationError::InFlight.into())
    }
}

fn single_post_prompt(request: &SinglePostRequest) -> String {
    format!(
        "Write a {} social media post for {} about \"{}\". \
         Keep it engaging, concise, and optimized for the specific platform. \
         Include relevant hashtags. Do not include any preamble, just the post content.",
        request.tone, request.platform, request.topic
    )
}

fn campaign_prompt(request: &CampaignRequest) -> String {
    format!(
        "Generate {} distinct social media posts about \"{}\". \
         Vary the platforms (mix of Twitter, LinkedIn, Instagram) and the content style. \
         Return a raw JSON array.",
        request.count, request.topic
    )
}

/// Response contract for campaign generation
///
/// Type names are uppercase as the generation API's schema dialect requires.
fn campaign_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "content": {
                    "type": "STRING",
                    "description": "The content of the post, including hashtags"
                },
                "platform": {
                    "type": "STRING",
                    "description": "One of: Twitter, LinkedIn, Instagram, Facebook"
                },
                "dayOffset": {
                    "type": "INTEGER",
                    "description": "Number of days from the start date to schedule this (0 to 7)"
                }
            },
            "required": ["content", "platform", "dayOffset"]
        }
    })
}

fn parse_campaign(raw: &str, request: &CampaignRequest) -> Result<Vec<CampaignPost>> {
    let items: Vec<CampaignItem> = serde_json::from_str(raw).map_err(|e| {
        GenerationError::InvalidResponseShape(format!("Expected a JSON array of posts: {}", e))
    })?;

    if items.is_empty() {
        return Err(GenerationError::EmptyContent.into());
    }

    let mut posts = Vec::with_capacity(items.len());
    for item in items {
        let platform: Platform = item.platform.parse().map_err(|_| {
            GenerationError::InvalidResponseShape(format!(
                "Unknown platform label: '{}'",
                item.platform
            ))
        })?;

        // Checked arithmetic: the offset comes straight off the wire and an
        // absurd value must surface as a shape error, not a panic
        let scheduled_at = chrono::Duration::try_days(item.day_offset)
            .and_then(|delta| request.start_date.checked_add_signed(delta))
            .ok_or_else(|| {
                GenerationError::InvalidResponseShape(format!(
                    "Day offset out of range: {}",
                    item.day_offset
                ))
            })?;

        // The schema asks for 0..=7 but the model is not strictly held to it
        if !(0..=7).contains(&item.day_offset) {
            warn!(
                day_offset = item.day_offset,
                "Campaign item scheduled outside the expected 0-7 day window"
            );
        }

        posts.push(CampaignPost {
            content: item.content,
            platform,
            scheduled_at,
            status: PostStatus::Scheduled,
            topic: Some(request.topic.clone()),
        });
    }

    Ok(posts)
}
