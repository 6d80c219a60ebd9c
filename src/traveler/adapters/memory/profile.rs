//! Thread-safe in-memory traveler repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traveler::{
    domain::{TravelerId, TravelerProfile, Username},
    ports::{TravelerRepository, TravelerRepositoryError, TravelerRepositoryResult},
};

/// Thread-safe in-memory traveler repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTravelerRepository {
    state: Arc<RwLock<InMemoryTravelerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTravelerState {
    profiles: HashMap<TravelerId, TravelerProfile>,
    username_index: HashMap<Username, TravelerId>,
}

impl InMemoryTravelerRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TravelerRepository for InMemoryTravelerRepository {
    async fn store(&self, profile: &TravelerProfile) -> TravelerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TravelerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.profiles.contains_key(&profile.id()) {
            return Err(TravelerRepositoryError::DuplicateTraveler(profile.id()));
        }
        if state.username_index.contains_key(profile.username()) {
            return Err(TravelerRepositoryError::DuplicateUsername(
                profile.username().clone(),
            ));
        }

        state
            .username_index
            .insert(profile.username().clone(), profile.id());
        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &TravelerProfile) -> TravelerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TravelerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_username = state
            .profiles
            .get(&profile.id())
            .ok_or(TravelerRepositoryError::NotFound(profile.id()))?
            .username()
            .clone();

        if *profile.username() != old_username {
            if let Some(&indexed_id) = state.username_index.get(profile.username())
                && indexed_id != profile.id()
            {
                return Err(TravelerRepositoryError::DuplicateUsername(
                    profile.username().clone(),
                ));
            }
            state.username_index.remove(&old_username);
            state
                .username_index
                .insert(profile.username().clone(), profile.id());
        }

        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TravelerId) -> TravelerRepositoryResult<Option<TravelerProfile>> {
        let state = self.state.read().map_err(|err| {
            TravelerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.profiles.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> TravelerRepositoryResult<Option<TravelerProfile>> {
        let state = self.state.read().map_err(|err| {
            TravelerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .username_index
            .get(username)
            .and_then(|id| state.profiles.get(id))
            .cloned())
    }
}
