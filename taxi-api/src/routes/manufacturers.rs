/// Manufacturer endpoints
///
/// Deleting a manufacturer deletes all of its cars.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::JsonBody,
    pagination::{Page, PageQuery, PageWindow},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taxi_shared::models::manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateManufacturerRequest {
    #[validate(length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."))]
    pub country: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateManufacturerRequest {
    #[validate(length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."))]
    pub country: Option<String>,
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Manufacturer {} not found", id))
}

pub async fn list_manufacturers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<Manufacturer>>> {
    let window = PageWindow::new(query.page, Manufacturer::count(&state.db).await?)?;
    let manufacturers = Manufacturer::list(&state.db, window.limit(), window.offset()).await?;

    Ok(Json(Page::new(manufacturers, window)))
}

pub async fn create_manufacturer(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateManufacturerRequest>,
) -> ApiResult<(StatusCode, Json<Manufacturer>)> {
    req.validate()?;

    let manufacturer = Manufacturer::create(
        &state.db,
        CreateManufacturer {
            name: req.name,
            country: req.country,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(manufacturer)))
}

pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Manufacturer>> {
    Manufacturer::find_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateManufacturerRequest>,
) -> ApiResult<Json<Manufacturer>> {
    req.validate()?;

    Manufacturer::update(
        &state.db,
        id,
        UpdateManufacturer {
            name: req.name,
            country: req.country,
        },
    )
    .await?
    .map(Json)
    .ok_or_else(|| not_found(id))
}

pub async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !Manufacturer::delete(&state.db, id).await? {
        return Err(not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
