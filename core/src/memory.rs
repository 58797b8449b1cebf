//! In-memory `FishApiClient` backend.
//!
//! # Design
//! Records live in a `BTreeMap` keyed by the numeric id, so uniqueness and
//! lookup-by-id hold by construction and iteration order is creation order.
//! The map and the id counter share one `RwLock`: a `create` reserves its id
//! and inserts the record under the same write guard, so concurrent creates
//! never observe or reuse the same id.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::FishApiClient;
use crate::error::ApiError;
use crate::types::{CreateFish, Fish, UpdateFish};

#[derive(Debug)]
struct Store {
    fish: BTreeMap<u64, Fish>,
    next_id: u64,
}

/// Process-local fish storage.
#[derive(Debug)]
pub struct InMemoryFishApi {
    store: RwLock<Store>,
    latency: Duration,
}

impl InMemoryFishApi {
    /// An empty store; the first record gets id `"1"`.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// The three reference records, with the next id at `"4"`.
    pub fn seeded() -> Self {
        Self::with_records(seed_records())
    }

    /// Store `records` under ids `"1"..="n"` in the given order.
    pub fn with_records(records: Vec<CreateFish>) -> Self {
        let mut fish = BTreeMap::new();
        let mut next_id = 1;
        for input in records {
            fish.insert(next_id, Fish::from_input(next_id.to_string(), input));
            next_id += 1;
        }
        Self {
            store: RwLock::new(Store { fish, next_id }),
            latency: Duration::ZERO,
        }
    }

    /// Sleep for `latency` before every operation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.fish.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.fish.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for InMemoryFishApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FishApiClient for InMemoryFishApi {
    async fn get_all(&self) -> Result<Vec<Fish>, ApiError> {
        self.simulate_latency().await;
        let store = self.store.read().await;
        Ok(store.fish.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Fish>, ApiError> {
        self.simulate_latency().await;
        let Some(key) = parse_key(id) else {
            return Ok(None);
        };
        Ok(self.store.read().await.fish.get(&key).cloned())
    }

    async fn create(&self, input: CreateFish) -> Result<Fish, ApiError> {
        input.validate()?;
        self.simulate_latency().await;
        let mut store = self.store.write().await;
        let key = store.next_id;
        store.next_id += 1;
        let fish = Fish::from_input(key.to_string(), input);
        store.fish.insert(key, fish.clone());
        debug!(id = %fish.id, name = %fish.name, "fish created");
        Ok(fish)
    }

    async fn update(&self, id: &str, input: UpdateFish) -> Result<Fish, ApiError> {
        self.simulate_latency().await;
        let key = parse_key(id).ok_or(ApiError::NotFound)?;
        let mut store = self.store.write().await;
        let fish = store.fish.get_mut(&key).ok_or(ApiError::NotFound)?;
        input.validate()?;
        input.apply_to(fish);
        debug!(id = %fish.id, "fish updated");
        Ok(fish.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.simulate_latency().await;
        if let Some(key) = parse_key(id) {
            if self.store.write().await.fish.remove(&key).is_some() {
                debug!(id, "fish deleted");
            }
        }
        Ok(())
    }
}

/// Ids are canonical decimal numbers; `"01"` or `"+1"` never match `"1"`.
fn parse_key(id: &str) -> Option<u64> {
    let key: u64 = id.parse().ok()?;
    (key.to_string() == id).then_some(key)
}

fn seed_records() -> Vec<CreateFish> {
    vec![
        CreateFish {
            name: "Nemo".to_string(),
            species: "Clownfish".to_string(),
            length_in_cm: 11.0,
            weight_in_kg: 0.025,
        },
        CreateFish {
            name: "Dory".to_string(),
            species: "Blue Tang".to_string(),
            length_in_cm: 30.0,
            weight_in_kg: 0.6,
        },
        CreateFish {
            name: "Bruce".to_string(),
            species: "Great White Shark".to_string(),
            length_in_cm: 450.0,
            weight_in_kg: 1100.0,
        },
    ]
}
