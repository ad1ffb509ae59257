//! Dataset Routes
//!
//! Read-only views of the loaded datasets.
//!
//! - GET /api/v1/datasets - List all datasets
//! - GET /api/v1/datasets/:name - Get one dataset's summary

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DatasetListResponse, DatasetSummary};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/datasets
///
/// List every dataset in dropdown order.
pub async fn list_datasets(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DatasetListResponse>> {
    let datasets = state
        .registry
        .names()
        .map(|name| state.registry.entry(name).map(DatasetSummary::from))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DatasetListResponse {
        total: datasets.len(),
        datasets,
    }))
}

/// GET /api/v1/datasets/:name
///
/// Get fields, defaults and row count of one dataset.
pub async fn get_dataset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<DatasetSummary>> {
    let entry = state.registry.entry(&name)?;
    Ok(Json(DatasetSummary::from(entry)))
}
