/// Car endpoints, including assignment of the acting driver
///
/// `POST /v1/cars/:id/assign` and `POST /v1/cars/:id/unassign` add or remove
/// the authenticated driver and answer with the refreshed car detail. Both
/// are idempotent; a missing car is a 404.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::JsonBody,
    pagination::{Page, PageQuery, PageWindow},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use taxi_shared::{
    auth::middleware::AuthContext,
    models::{
        car::{Car, CarWithManufacturer, CreateCar, UpdateCar},
        driver::Driver,
    },
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."))]
    pub model: String,

    pub manufacturer_id: Uuid,

    #[serde(default)]
    pub driver_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."))]
    pub model: Option<String>,

    pub manufacturer_id: Option<Uuid>,

    /// Replaces the whole driver set when present
    pub driver_ids: Option<Vec<Uuid>>,
}

/// Car detail response
#[derive(Debug, Serialize, Deserialize)]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: CarWithManufacturer,

    pub drivers: Vec<Driver>,

    /// Whether the acting driver is among `drivers`
    pub is_driver_assigned: bool,
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Car {} not found", id))
}

async fn load_detail(pool: &PgPool, id: Uuid, actor: Uuid) -> ApiResult<CarDetail> {
    let car = Car::find_with_manufacturer(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let drivers = Driver::list_for_car(pool, id).await?;
    let is_driver_assigned = drivers.iter().any(|d| d.id == actor);

    Ok(CarDetail {
        car,
        drivers,
        is_driver_assigned,
    })
}

pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<CarWithManufacturer>>> {
    let window = PageWindow::new(query.page, Car::count(&state.db).await?)?;
    let cars = Car::list(&state.db, window.limit(), window.offset()).await?;

    Ok(Json(Page::new(cars, window)))
}

pub async fn create_car(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    JsonBody(req): JsonBody<CreateCarRequest>,
) -> ApiResult<(StatusCode, Json<CarDetail>)> {
    req.validate()?;

    let car = Car::create(
        &state.db,
        CreateCar {
            model: req.model,
            manufacturer_id: req.manufacturer_id,
            driver_ids: req.driver_ids,
        },
    )
    .await?;

    let detail = load_detail(&state.db, car.id, auth.driver_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn get_car(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CarDetail>> {
    Ok(Json(load_detail(&state.db, id, auth.driver_id).await?))
}

pub async fn update_car(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateCarRequest>,
) -> ApiResult<Json<CarDetail>> {
    req.validate()?;

    Car::update(
        &state.db,
        id,
        UpdateCar {
            model: req.model,
            manufacturer_id: req.manufacturer_id,
            driver_ids: req.driver_ids,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(load_detail(&state.db, id, auth.driver_id).await?))
}

pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !Car::delete(&state.db, id).await? {
        return Err(not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Adds the acting driver to the car
pub async fn assign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CarDetail>> {
    if !Car::assign_driver(&state.db, id, auth.driver_id).await? {
        return Err(not_found(id));
    }

    info!(car_id = %id, driver_id = %auth.driver_id, "Driver assigned themselves to car");
    Ok(Json(load_detail(&state.db, id, auth.driver_id).await?))
}

/// Removes the acting driver from the car
pub async fn unassign(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CarDetail>> {
    if !Car::unassign_driver(&state.db, id, auth.driver_id).await? {
        return Err(not_found(id));
    }

    info!(car_id = %id, driver_id = %auth.driver_id, "Driver removed themselves from car");
    Ok(Json(load_detail(&state.db, id, auth.driver_id).await?))
}
