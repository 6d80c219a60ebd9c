//! Repository port for traveler profile persistence.

use crate::traveler::domain::{TravelerId, TravelerProfile, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for traveler repository operations.
pub type TravelerRepositoryResult<T> = Result<T, TravelerRepositoryError>;

/// Traveler profile persistence contract.
#[async_trait]
pub trait TravelerRepository: Send + Sync {
    /// Stores a new profile.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerRepositoryError::DuplicateTraveler`] when the ID
    /// exists or [`TravelerRepositoryError::DuplicateUsername`] when the
    /// username is taken.
    async fn store(&self, profile: &TravelerProfile) -> TravelerRepositoryResult<()>;

    /// Persists changes to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`TravelerRepositoryError::NotFound`] when the profile does
    /// not exist.
    async fn update(&self, profile: &TravelerProfile) -> TravelerRepositoryResult<()>;

    /// Finds a profile by identifier.
    async fn find_by_id(&self, id: TravelerId) -> TravelerRepositoryResult<Option<TravelerProfile>>;

    /// Finds a profile by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> TravelerRepositoryResult<Option<TravelerProfile>>;
}

/// Errors returned by traveler repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TravelerRepositoryError {
    /// A profile with the same identifier already exists.
    #[error("duplicate traveler identifier: {0}")]
    DuplicateTraveler(TravelerId),

    /// The username is already taken.
    #[error("username already taken: {0}")]
    DuplicateUsername(Username),

    /// The profile was not found.
    #[error("traveler not found: {0}")]
    NotFound(TravelerId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TravelerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
