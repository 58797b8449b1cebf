//! Page controller: the session's authoritative copy of the collection.
//!
//! The collection is fetched once on `mount`. After that every successful
//! mutation is applied locally (append, replace by id, filter out by id)
//! instead of re-fetching; concurrent writers elsewhere are not reconciled,
//! so the last write seen by this page wins.

use async_trait::async_trait;
use tracing::{error, info};

use crate::api::FishApiClient;
use crate::error::ApiError;
use crate::table::FishMutations;
use crate::types::{CreateFish, Fish, UpdateFish};

pub struct FishPage<C> {
    api: C,
    fish: Vec<Fish>,
    loading: bool,
    mounted: bool,
}

impl<C: FishApiClient> FishPage<C> {
    pub fn new(api: C) -> Self {
        Self {
            api,
            fish: Vec::new(),
            loading: true,
            mounted: false,
        }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load the collection. Only the first completed call does anything; a
    /// failed load is logged and leaves the collection empty. A mount dropped
    /// before the load resolves does not count.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.loading = true;
        let loaded = self.api.get_all().await;
        self.mounted = true;
        match loaded {
            Ok(fish) => {
                info!(count = fish.len(), "fish loaded");
                self.fish = fish;
            }
            Err(e) => {
                error!(error = %e, "failed to load fish");
                self.fish.clear();
            }
        }
        self.loading = false;
    }
}

#[async_trait]
impl<C: FishApiClient> FishMutations for FishPage<C> {
    async fn add_fish(&mut self, input: CreateFish) -> Result<Fish, ApiError> {
        let fish = self.api.create(input).await?;
        info!(id = %fish.id, name = %fish.name, "fish added");
        self.fish.push(fish.clone());
        Ok(fish)
    }

    async fn update_fish(&mut self, id: &str, input: UpdateFish) -> Result<Fish, ApiError> {
        let updated = self.api.update(id, input).await?;
        for fish in self.fish.iter_mut().filter(|f| f.id == id) {
            *fish = updated.clone();
        }
        info!(id, "fish updated");
        Ok(updated)
    }

    async fn delete_fish(&mut self, id: &str) -> Result<(), ApiError> {
        self.api.delete(id).await?;
        self.fish.retain(|f| f.id != id);
        info!(id, "fish deleted");
        Ok(())
    }
}
