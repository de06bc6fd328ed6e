/// Fleet overview
///
/// ```text
/// GET /v1
/// ```
///
/// ```json
/// { "num_drivers": 3, "num_cars": 7, "num_manufacturers": 2 }
/// ```
///
/// Counts are read live on every request.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use taxi_shared::models::summary::FleetSummary;

pub async fn index(State(state): State<AppState>) -> ApiResult<Json<FleetSummary>> {
    Ok(Json(FleetSummary::load(&state.db).await?))
}
