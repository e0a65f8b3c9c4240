//! Service facade for SocialFlow
//!
//! This module provides a single composition root that a UI (dashboard,
//! composer, calendar, settings) can be handed instead of reaching for any
//! ambient state. The service owns an explicitly constructed [`Store`], a
//! [`GenerationGateway`], and a publishing provider, and shares one event bus
//! between them so store changes and generation progress arrive on a single
//! subscription.
//!
//! # Architecture
//!
//! Generation and storage stay decoupled: `generate_single` and
//! `generate_campaign` return content to the caller for review, and nothing
//! reaches the store until the caller commits it (`schedule_post`,
//! `save_draft`, `commit_campaign`). That review step is the one load-bearing
//! separation in the design.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use libsocialflow::generation::SinglePostRequest;
//! use libsocialflow::service::SocialFlowService;
//! use libsocialflow::types::Platform;
//!
//! # async fn example() -> libsocialflow::Result<()> {
//! let service = SocialFlowService::new()?;
//!
//! let text = service
//!     .generate_single(SinglePostRequest {
//!         topic: "Product Launch".to_string(),
//!         platform: Platform::Twitter,
//!         tone: "excited".to_string(),
//!     })
//!     .await?;
//!
//! // The caller reviews (and may edit) before committing
//! let post = service.schedule_post(text, Platform::Twitter, Utc::now(), None)?;
//! println!("Scheduled {}", post.id);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::events::{Event, EventBus, EventReceiver, GenerationKind};
use crate::generation::gemini::GeminiBackend;
use crate::generation::{CampaignRequest, GenerationGateway, SinglePostRequest};
use crate::providers::mock::MockProvider;
use crate::providers::PublishingProvider;
use crate::store::{PostUpdate, Store};
use crate::types::{CampaignPost, ConnectedAccount, Platform, PostStatus, SocialPost};

/// Event bus capacity shared by the store and the service
const EVENT_CAPACITY: usize = 100;

/// Main service facade coordinating store, gateway, and provider
pub struct SocialFlowService {
    store: Store,
    gateway: GenerationGateway,
    provider: Arc<dyn PublishingProvider>,
    event_bus: EventBus,
}

impl SocialFlowService {
    /// Create a service with configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the
    /// generation backend cannot be constructed (missing API key).
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    /// Create a service from a pre-built configuration
    ///
    /// Builds the Gemini backend and the mock provider, and seeds the store
    /// with the sample posts a fresh dashboard starts from.
    ///
    /// # Errors
    ///
    /// Returns an error if the generation backend cannot be constructed.
    pub fn from_config(config: Config) -> Result<Self> {
        let event_bus = EventBus::new(EVENT_CAPACITY);
        let store = Store::with_bus(event_bus.clone());
        store.load_sample_posts();

        let backend = Arc::new(GeminiBackend::from_config(&config.generation)?);
        let gateway = GenerationGateway::new(backend);
        let provider: Arc<dyn PublishingProvider> =
            Arc::new(MockProvider::from_config(&config.provider));

        Ok(Self {
            store,
            gateway,
            provider,
            event_bus,
        })
    }

    /// Assemble a service from pre-built parts
    ///
    /// Dependency injection seam for tests and alternate backends; the
    /// service publishes on the store's bus.
    pub fn with_parts(
        store: Store,
        gateway: GenerationGateway,
        provider: Arc<dyn PublishingProvider>,
    ) -> Self {
        let event_bus = store.event_bus();
        Self {
            store,
            gateway,
            provider,
            event_bus,
        }
    }

    /// The store this service writes to
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Subscribe to store change and generation progress events
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generate the text of one post
    ///
    /// Emits `GenerationStarted`, then `GenerationCompleted` or
    /// `GenerationFailed`, so a UI can drive its loading affordance off the
    /// bus. The result is returned for review, not stored.
    pub async fn generate_single(&self, request: SinglePostRequest) -> Result<String> {
        self.event_bus.emit(Event::GenerationStarted {
            kind: GenerationKind::Single,
            topic: request.topic.clone(),
        });

        match self.gateway.generate_single(&request).await {
            Ok(text) => {
                self.event_bus.emit(Event::GenerationCompleted {
                    kind: GenerationKind::Single,
                    topic: request.topic.clone(),
                    count: 1,
                });
                Ok(text)
            }
            Err(e) => {
                self.event_bus.emit(Event::GenerationFailed {
                    kind: GenerationKind::Single,
                    topic: request.topic.clone(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Generate a batch of campaign candidates
    ///
    /// Candidates are returned for review and editing; nothing reaches the
    /// store until [`commit_campaign`](Self::commit_campaign).
    pub async fn generate_campaign(&self, request: CampaignRequest) -> Result<Vec<CampaignPost>> {
        self.event_bus.emit(Event::GenerationStarted {
            kind: GenerationKind::Campaign,
            topic: request.topic.clone(),
        });

        match self.gateway.generate_campaign(&request).await {
            Ok(posts) => {
                self.event_bus.emit(Event::GenerationCompleted {
                    kind: GenerationKind::Campaign,
                    topic: request.topic.clone(),
                    count: posts.len(),
                });
                Ok(posts)
            }
            Err(e) => {
                self.event_bus.emit(Event::GenerationFailed {
                    kind: GenerationKind::Campaign,
                    topic: request.topic.clone(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    // ========================================================================
    // Committing content
    // ========================================================================

    /// Commit a post with status `Scheduled`
    ///
    /// Generates the post's id here, at the composer boundary.
    pub fn schedule_post(
        &self,
        content: String,
        platform: Platform,
        scheduled_at: DateTime<Utc>,
        topic: Option<String>,
    ) -> Result<SocialPost> {
        self.commit(content, platform, scheduled_at, topic, PostStatus::Scheduled)
    }

    /// Commit a post with status `Draft`
    ///
    /// Drafts carry an advisory schedule time and stay put until edited or
    /// rescheduled; nothing moves them on its own.
    pub fn save_draft(
        &self,
        content: String,
        platform: Platform,
        scheduled_at: DateTime<Utc>,
        topic: Option<String>,
    ) -> Result<SocialPost> {
        self.commit(content, platform, scheduled_at, topic, PostStatus::Draft)
    }

    fn commit(
        &self,
        content: String,
        platform: Platform,
        scheduled_at: DateTime<Utc>,
        topic: Option<String>,
        status: PostStatus,
    ) -> Result<SocialPost> {
        let mut post = SocialPost::new(content, platform, scheduled_at, status);
        post.topic = topic;

        self.store.add_post(post.clone())?;
        info!(id = %post.id, platform = %post.platform, status = %post.status, "Post committed");
        Ok(post)
    }

    /// Commit reviewed campaign candidates as stored posts
    ///
    /// Each candidate gets a fresh id; the caller may have edited any of
    /// them between generation and commit.
    pub fn commit_campaign(&self, candidates: Vec<CampaignPost>) -> Result<Vec<SocialPost>> {
        let mut posts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let mut post = SocialPost::new(
                candidate.content,
                candidate.platform,
                candidate.scheduled_at,
                candidate.status,
            );
            post.topic = candidate.topic;

            self.store.add_post(post.clone())?;
            posts.push(post);
        }

        info!(count = posts.len(), "Campaign committed");
        Ok(posts)
    }

    // ========================================================================
    // Accounts and publishing
    // ========================================================================

    /// Link a platform account through the provider and record it
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Linking` if the handshake fails; the store is
    /// untouched in that case.
    pub async fn connect_account(&self, platform: Platform) -> Result<ConnectedAccount> {
        let username = self.provider.link_account(platform).await?;
        info!(platform = %platform, username = %username, provider = %self.provider.name(), "Account linked");
        Ok(self.store.connect_account(platform, username))
    }

    /// Disconnect a platform account
    ///
    /// Store-only: there is nothing to tear down on the provider side.
    pub fn disconnect_account(&self, platform: Platform) -> ConnectedAccount {
        self.store.disconnect_account(platform)
    }

    /// Publish a stored post immediately
    ///
    /// Pushes the post through the provider and, on success, marks it
    /// `Published`. There is no background trigger; publishing only ever
    /// happens through this explicit call.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PostNotFound` if the id is unknown, or
    /// `ProviderError::Publishing` if the provider rejects the post (the
    /// stored status is left unchanged then).
    pub async fn publish_now(&self, id: &str) -> Result<SocialPost> {
        let post = self
            .store
            .get_post(id)
            .ok_or_else(|| StoreError::PostNotFound(id.to_string()))?;

        let platform_post_id = self.provider.publish(&post).await?;
        info!(id = %post.id, platform_post_id = %platform_post_id, "Post published");

        self.store.update_post(
            id,
            PostUpdate {
                status: Some(PostStatus::Published),
                ..Default::default()
            },
        )
    }
}
