use crate::{error::AppError, AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use comparison::{ComparisonResult, ComparisonService};
use core_types::{PlayerId, Role};
use database::{DeliveryStore, SnapshotInfo};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    /// Only players with at least one delivery in this role.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub first: PlayerId,
    pub second: PlayerId,
}

/// The store in use right now. Cloning the `Arc` lets the read lock go
/// before any computation starts.
async fn current_store(state: &AppState) -> Arc<DeliveryStore> {
    state.store.read().await.clone()
}

/// # GET /api/players
pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlayersQuery>,
) -> Json<Vec<PlayerId>> {
    let store = current_store(&state).await;
    let service = ComparisonService::new(store.as_ref());
    let players = match query.role {
        Some(role) => service.list_players_in_role(role),
        None => service.list_players(),
    };
    Json(players)
}

/// # GET /api/compare?first=..&second=..
pub async fn get_comparison(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparisonResult>, AppError> {
    let store = current_store(&state).await;
    let result = ComparisonService::new(store.as_ref()).compare(&query.first, &query.second)?;
    Ok(Json(result))
}

/// # GET /api/dataset
pub async fn get_dataset(State(state): State<Arc<AppState>>) -> Json<SnapshotInfo> {
    Json(current_store(&state).await.info())
}

/// # POST /api/dataset/reload
/// Loads a fresh snapshot from the configured source and swaps it in.
/// In-flight requests keep the snapshot they started with. Reloads run one
/// at a time so each one builds on the version the previous one swapped in.
pub async fn reload_dataset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotInfo>, AppError> {
    let _reloading = state.reload_lock.lock().await;
    let current = current_store(&state).await;
    let reloaded = Arc::new(current.reload(state.source.as_ref()).await?);
    let info = reloaded.info();
    *state.store.write().await = reloaded;

    tracing::info!(version = info.version, "Dataset reloaded.");
    Ok(Json(info))
}
