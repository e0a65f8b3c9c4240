//! Core types for SocialFlow

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Social networks a post can target
///
/// The set is fixed; accounts exist for exactly these four platforms and
/// generated content is labeled with one of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitter,
    LinkedIn,
    Instagram,
    Facebook,
}

impl Platform {
    /// All platforms in display order
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::Facebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" => Ok(Platform::Twitter),
            "linkedin" => Ok(Platform::LinkedIn),
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            _ => Err(format!(
                "Unknown platform: '{}'. Valid options: Twitter, LinkedIn, Instagram, Facebook",
                s
            )),
        }
    }
}

/// Lifecycle state of a post
///
/// Statuses never transition on their own; only explicit operations move a
/// post between them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Scheduled => write!(f, "scheduled"),
            PostStatus::Published => write!(f, "published"),
        }
    }
}

/// A composed or generated post targeting a single platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialPost {
    /// Unique identifier (UUID v4), immutable for the post's lifetime
    pub id: String,
    pub content: String,
    pub platform: Platform,
    /// When the post is meant to go out
    pub scheduled_at: DateTime<Utc>,
    pub status: PostStatus,
    /// Campaign or composer topic the post was written for
    pub topic: Option<String>,
    /// Attached image URL; not validated for reachability
    pub image_url: Option<String>,
}

impl SocialPost {
    pub fn new(
        content: String,
        platform: Platform,
        scheduled_at: DateTime<Utc>,
        status: PostStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            platform,
            scheduled_at,
            status,
            topic: None,
            image_url: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Connection state for one platform
///
/// Exactly one record exists per platform. `username` is present iff the
/// account is connected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectedAccount {
    pub platform: Platform,
    pub is_connected: bool,
    pub username: Option<String>,
}

impl ConnectedAccount {
    /// Create a disconnected account record for a platform
    pub fn disconnected(platform: Platform) -> Self {
        Self {
            platform,
            is_connected: false,
            username: None,
        }
    }

    pub fn connect(&mut self, username: String) {
        self.is_connected = true;
        self.username = Some(username);
    }

    pub fn disconnect(&mut self) {
        self.is_connected = false;
        self.username = None;
    }
}

/// A campaign candidate awaiting review
///
/// Produced by campaign generation and held by the caller until committed.
/// Candidates carry no id; ids are assigned when the caller commits them as
/// [`SocialPost`]s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignPost {
    pub content: String,
    pub platform: Platform,
    pub scheduled_at: DateTime<Utc>,
    pub status: PostStatus,
    pub topic: Option<String>,
}
