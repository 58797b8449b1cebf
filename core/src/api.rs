//! The storage boundary between presentation code and a fish backend.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{CreateFish, Fish, UpdateFish};

/// CRUD contract every fish backend implements.
///
/// Each implementation serves all five operations from one storage: a record
/// created through a client is visible to that client's next `get_all` and
/// `get_by_id`.
#[async_trait]
pub trait FishApiClient: Send + Sync {
    /// Every record, in ascending id order.
    async fn get_all(&self) -> Result<Vec<Fish>, ApiError>;

    /// `Ok(None)` when no record has this id.
    async fn get_by_id(&self, id: &str) -> Result<Option<Fish>, ApiError>;

    /// Store a new record under a freshly assigned, never reused id.
    async fn create(&self, input: CreateFish) -> Result<Fish, ApiError>;

    /// Merge the present fields into the record. `ApiError::NotFound` when
    /// the id does not exist.
    async fn update(&self, id: &str, input: UpdateFish) -> Result<Fish, ApiError>;

    /// Remove the record. Unknown ids are ignored.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: FishApiClient + ?Sized> FishApiClient for std::sync::Arc<T> {
    async fn get_all(&self) -> Result<Vec<Fish>, ApiError> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Fish>, ApiError> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, input: CreateFish) -> Result<Fish, ApiError> {
        (**self).create(input).await
    }

    async fn update(&self, id: &str, input: UpdateFish) -> Result<Fish, ApiError> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}

#[async_trait]
impl<T: FishApiClient + ?Sized> FishApiClient for Box<T> {
    async fn get_all(&self) -> Result<Vec<Fish>, ApiError> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Fish>, ApiError> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, input: CreateFish) -> Result<Fish, ApiError> {
        (**self).create(input).await
    }

    async fn update(&self, id: &str, input: UpdateFish) -> Result<Fish, ApiError> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}
