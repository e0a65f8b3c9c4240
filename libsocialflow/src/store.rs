//! In-memory store for posts and connected accounts
//!
//! The store is the single source of truth for UI-facing state. All reads
//! return snapshots; all mutations return an explicit result and publish the
//! full changed collection on the event bus, so observers re-render without
//! diffing.
//!
//! Nothing here persists. A process restart starts from seed data again.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Result, StoreError};
use crate::events::{Event, EventBus, EventReceiver};
use crate::types::{ConnectedAccount, Platform, PostStatus, SocialPost};

/// Default broadcast capacity when the store owns its bus
const DEFAULT_EVENT_CAPACITY: usize = 100;

/// A partial update to apply to a stored post
///
/// `None` fields are left unchanged. There is no way to clear an optional
/// field back to `None`; callers replace the post instead.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub content: Option<String>,
    pub platform: Option<Platform>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<PostStatus>,
    pub topic: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default)]
struct StoreState {
    posts: Vec<SocialPost>,
    accounts: Vec<ConnectedAccount>,
}

impl StoreState {
    fn account_mut(&mut self, platform: Platform) -> &mut ConnectedAccount {
        // One record per platform is seeded at construction; the fallback
        // re-creates it rather than panicking if that ever breaks.
        let idx = match self.accounts.iter().position(|a| a.platform == platform) {
            Some(idx) => idx,
            None => {
                self.accounts.push(ConnectedAccount::disconnected(platform));
                self.accounts.len() - 1
            }
        };
        &mut self.accounts[idx]
    }
}

/// In-memory store handle
///
/// Cloning is cheap and every clone shares the same underlying state and
/// event bus. Operations are synchronous and complete before returning.
#[derive(Clone)]
pub struct Store {
    state: Arc<RwLock<StoreState>>,
    event_bus: EventBus,
}

impl Store {
    /// Create an empty store with its own event bus
    ///
    /// Accounts for all platforms are seeded disconnected; the post
    /// collection starts empty.
    pub fn new() -> Self {
        Self::with_bus(EventBus::new(DEFAULT_EVENT_CAPACITY))
    }

    /// Create a store publishing on an existing bus
    ///
    /// Used by the composition root so store changes and generation progress
    /// arrive on one subscription.
    pub fn with_bus(event_bus: EventBus) -> Self {
        let accounts = Platform::ALL
            .iter()
            .map(|p| ConnectedAccount::disconnected(*p))
            .collect();

        Self {
            state: Arc::new(RwLock::new(StoreState {
                posts: Vec::new(),
                accounts,
            })),
            event_bus,
        }
    }

    /// Create a store pre-loaded with the sample posts
    pub fn seeded() -> Self {
        let store = Self::new();
        store.load_sample_posts();
        store
    }

    /// Replace the post collection with the sample posts
    pub fn load_sample_posts(&self) {
        let snapshot = {
            let mut state = self.state.write().unwrap();
            state.posts = sample_posts(Utc::now());
            state.posts.clone()
        };
        self.event_bus.emit(Event::PostsChanged { posts: snapshot });
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }

    /// Clone of the bus this store publishes on
    pub fn event_bus(&self) -> EventBus {
        self.event_bus.clone()
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Append a fully-formed post
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if a post with the same id already
    /// exists. Ids are caller-provided here; generation happens at the
    /// composer boundary.
    pub fn add_post(&self, post: SocialPost) -> Result<()> {
        let snapshot = {
            let mut state = self.state.write().unwrap();
            if state.posts.iter().any(|p| p.id == post.id) {
                return Err(StoreError::DuplicateId(post.id).into());
            }
            state.posts.push(post);
            state.posts.clone()
        };
        self.event_bus.emit(Event::PostsChanged { posts: snapshot });
        Ok(())
    }

    /// Merge a partial update into the matching post
    ///
    /// Returns the post as stored after the merge.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PostNotFound` if no post has the given id; the
    /// collection is untouched in that case.
    pub fn update_post(&self, id: &str, update: PostUpdate) -> Result<SocialPost> {
        let (updated, snapshot) = {
            let mut state = self.state.write().unwrap();
            let updated = {
                let post = state
                    .posts
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| StoreError::PostNotFound(id.to_string()))?;

                if let Some(content) = update.content {
                    post.content = content;
                }
                if let Some(platform) = update.platform {
                    post.platform = platform;
                }
                if let Some(scheduled_at) = update.scheduled_at {
                    post.scheduled_at = scheduled_at;
                }
                if let Some(status) = update.status {
                    post.status = status;
                }
                if let Some(topic) = update.topic {
                    post.topic = Some(topic);
                }
                if let Some(image_url) = update.image_url {
                    post.image_url = Some(image_url);
                }
                post.clone()
            };
            (updated, state.posts.clone())
        };
        self.event_bus.emit(Event::PostsChanged { posts: snapshot });
        Ok(updated)
    }

    /// Remove the matching post
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PostNotFound` if no post has the given id, which
    /// also makes a repeated delete report what happened while leaving the
    /// same resulting state.
    pub fn delete_post(&self, id: &str) -> Result<()> {
        let snapshot = {
            let mut state = self.state.write().unwrap();
            let idx = state
                .posts
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| StoreError::PostNotFound(id.to_string()))?;
            state.posts.remove(idx);
            state.posts.clone()
        };
        self.event_bus.emit(Event::PostsChanged { posts: snapshot });
        Ok(())
    }

    /// Snapshot of one post by id
    pub fn get_post(&self, id: &str) -> Option<SocialPost> {
        let state = self.state.read().unwrap();
        state.posts.iter().find(|p| p.id == id).cloned()
    }

    /// Snapshot of all posts in insertion order
    pub fn posts(&self) -> Vec<SocialPost> {
        let state = self.state.read().unwrap();
        state.posts.clone()
    }

    /// Posts whose `scheduled_at` falls on the given UTC calendar day
    ///
    /// Purely a derived view; the store keeps no per-day index.
    pub fn posts_on_date(&self, date: NaiveDate) -> Vec<SocialPost> {
        let state = self.state.read().unwrap();
        state
            .posts
            .iter()
            .filter(|p| p.scheduled_at.date_naive() == date)
            .cloned()
            .collect()
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Snapshot of all account records, one per platform
    pub fn accounts(&self) -> Vec<ConnectedAccount> {
        let state = self.state.read().unwrap();
        state.accounts.clone()
    }

    /// Snapshot of the record for one platform
    pub fn account(&self, platform: Platform) -> ConnectedAccount {
        let state = self.state.read().unwrap();
        state
            .accounts
            .iter()
            .find(|a| a.platform == platform)
            .cloned()
            .unwrap_or_else(|| ConnectedAccount::disconnected(platform))
    }

    /// Mark a platform's account as connected under the given username
    ///
    /// Infallible: the record always exists and connecting an already
    /// connected account just replaces the username.
    pub fn connect_account(&self, platform: Platform, username: String) -> ConnectedAccount {
        let (account, snapshot) = {
            let mut state = self.state.write().unwrap();
            let record = state.account_mut(platform);
            record.connect(username);
            let account = record.clone();
            (account, state.accounts.clone())
        };
        self.event_bus.emit(Event::AccountsChanged { accounts: snapshot });
        account
    }

    /// Mark a platform's account as disconnected and clear its username
    pub fn disconnect_account(&self, platform: Platform) -> ConnectedAccount {
        let (account, snapshot) = {
            let mut state = self.state.write().unwrap();
            let record = state.account_mut(platform);
            record.disconnect();
            let account = record.clone();
            (account, state.accounts.clone())
        };
        self.event_bus.emit(Event::AccountsChanged { accounts: snapshot });
        account
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// The three example posts a fresh dashboard starts with
///
/// Scheduled relative to `now`: a launch announcement today at 10:00, a
/// partnership draft tomorrow, and a culture post two days out.
pub fn sample_posts(now: DateTime<Utc>) -> Vec<SocialPost> {
    let launch_at = now
        .date_naive()
        .and_hms_opt(10, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or(now);

    vec![
        SocialPost {
            id: "1".to_string(),
            content: "Just launched our new AI features! 🚀 check it out. #AI #Tech".to_string(),
            platform: Platform::Twitter,
            scheduled_at: launch_at,
            status: PostStatus::Scheduled,
            topic: Some("Product Launch".to_string()),
            image_url: None,
        },
        SocialPost {
            id: "2".to_string(),
            content: "We are thrilled to announce a partnership with TechCorp. \
                      This collaboration will bring..."
                .to_string(),
            platform: Platform::LinkedIn,
            scheduled_at: now + chrono::Duration::days(1),
            status: PostStatus::Draft,
            topic: Some("Partnership".to_string()),
            image_url: None,
        },
        SocialPost {
            id: "3".to_string(),
            content: "Behind the scenes at our annual retreat! 🌲📸 #TeamBuilding".to_string(),
            platform: Platform::Instagram,
            scheduled_at: now + chrono::Duration::days(2),
            status: PostStatus::Scheduled,
            topic: Some("Culture".to_string()),
            image_url: Some("https://picsum.photos/400/400".to_string()),
        },
    ]
}
