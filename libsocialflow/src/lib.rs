//! SocialFlow - core library for a content-scheduling dashboard
//!
//! This library owns the post/account data model, the in-memory store that is
//! the single source of truth for both, and the gateway that turns content
//! requests into text-generation API calls. Presentation is an external
//! collaborator that consumes the store's snapshots and events.

pub mod config;
pub mod error;
pub mod events;
pub mod generation;
pub mod logging;
pub mod providers;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SocialFlowError};
pub use service::SocialFlowService;
pub use store::{PostUpdate, Store};
pub use types::{CampaignPost, ConnectedAccount, Platform, PostStatus, SocialPost};
