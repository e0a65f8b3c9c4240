//! Publishing provider abstraction
//!
//! A provider owns the outward-facing half of the account lifecycle: linking
//! a platform account and pushing finished posts to it. The trait keeps the
//! rest of the crate indifferent to how that happens, so a real OAuth-backed
//! provider drops in next to the simulated [`mock::MockProvider`] without
//! touching the store or service layers.
//!
//! # Examples
//!
//! ```no_run
//! use libsocialflow::providers::{PublishingProvider, mock::MockProvider};
//! use libsocialflow::types::Platform;
//!
//! # async fn example() -> Result<(), libsocialflow::error::ProviderError> {
//! let provider = MockProvider::new();
//!
//! let username = provider.link_account(Platform::Twitter).await?;
//! println!("Linked {} as {}", Platform::Twitter, username);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{Platform, SocialPost};

pub mod mock;

/// Capability trait for account linking and publishing
///
/// Implementations are expected to be stateless from the caller's point of
/// view: the store records what was linked or published, the provider only
/// performs the external interaction.
#[async_trait]
pub trait PublishingProvider: Send + Sync {
    /// Run the account handshake for a platform
    ///
    /// Returns the username the platform reports for the linked account. The
    /// caller is responsible for recording the result in the store.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Linking` if the handshake fails (declined
    /// authorization, network trouble, expired credentials).
    async fn link_account(
        &self,
        platform: Platform,
    ) -> std::result::Result<String, ProviderError>;

    /// Push a finished post to its platform
    ///
    /// Returns the platform-assigned post id. The post's stored status is
    /// the caller's to update; a provider never touches the store.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Publishing` if the platform rejects the post
    /// or the call fails.
    async fn publish(&self, post: &SocialPost) -> std::result::Result<String, ProviderError>;

    /// Provider name for logs and diagnostics
    fn name(&self) -> &str;
}
