use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use fish_core::{ApiError, CreateFish, Fish, FishApiClient, InMemoryFishApi, UpdateFish};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;

pub use config::Settings;

pub type Db = Arc<dyn FishApiClient>;

/// Failures of a handler, rendered as `{"error": ..., "status": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Request body that is not JSON or does not fit the DTO.
    #[error(transparent)]
    Json(#[from] JsonRejection),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Api(ApiError::NotFound) => (StatusCode::NOT_FOUND, ApiError::NotFound.to_string()),
            ServerError::Api(ApiError::ValidationError(message)) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ServerError::Api(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ServerError::Json(rejection) => (rejection.status(), rejection.body_text()),
        };
        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

/// Router over the three reference records.
pub fn app() -> Router {
    app_with(Arc::new(InMemoryFishApi::seeded()))
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/fish", get(list_fish).post(create_fish))
        .route("/fish/{id}", get(get_fish).patch(update_fish).delete(delete_fish))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "fish mock server listening");
    }
    axum::serve(listener, app).await
}

async fn list_fish(State(db): State<Db>) -> Result<Json<Vec<Fish>>, ServerError> {
    Ok(Json(db.get_all().await?))
}

async fn create_fish(
    State(db): State<Db>,
    payload: Result<Json<CreateFish>, JsonRejection>,
) -> Result<(StatusCode, Json<Fish>), ServerError> {
    let Json(input) = payload?;
    let fish = db.create(input).await?;
    info!(id = %fish.id, "created fish");
    Ok((StatusCode::CREATED, Json(fish)))
}

async fn get_fish(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Fish>, ServerError> {
    let fish = db.get_by_id(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(fish))
}

async fn update_fish(
    State(db): State<Db>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFish>, JsonRejection>,
) -> Result<Json<Fish>, ServerError> {
    let Json(input) = payload?;
    Ok(Json(db.update(&id, input).await?))
}

async fn delete_fish(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ServerError> {
    db.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
