/// Driver endpoints
///
/// - `GET    /v1/drivers?page=N`
/// - `POST   /v1/drivers`
/// - `GET    /v1/drivers/:id`: driver with the cars assigned to it
/// - `PUT    /v1/drivers/:id`: profile update
/// - `DELETE /v1/drivers/:id`
/// - `PUT    /v1/drivers/:id/license`: license number only
///
/// License numbers are checked twice: by the request structs here, through
/// [`validate_license_field`], and again by the model before any write.

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
use serde::{Deserialize, Serialize};
use taxi_shared::{
    auth::password::{hash_password, validate_password_field},
    models::{
        car::{Car, CarWithManufacturer},
        driver::{CreateDriver, Driver, UpdateDriver},
    },
    validation::{license::validate_license_field, username::validate_username_field},
};
use uuid::Uuid;
use validator::Validate;

/// New driver, used by both registration and `POST /v1/drivers`
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(custom(function = "validate_username_field"))]
    pub username: String,

    #[validate(custom(function = "validate_password_field"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this field has at most 150 characters."))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this field has at most 150 characters."))]
    pub last_name: String,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_license_field"))]
    pub license_number: String,
}

impl CreateDriverRequest {
    /// Hashes the password and builds the model input
    pub fn into_create_driver(self) -> ApiResult<CreateDriver> {
        Ok(CreateDriver {
            password_hash: hash_password(&self.password)?,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email.unwrap_or_default(),
            license_number: self.license_number,
            is_staff: false,
        })
    }
}

/// Profile update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(custom(function = "validate_username_field"))]
    pub username: Option<String>,

    #[validate(custom(function = "validate_password_field"))]
    pub password: Option<String>,

    #[validate(length(max = 150, message = "Ensure this field has at most 150 characters."))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Ensure this field has at most 150 characters."))]
    pub last_name: Option<String>,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_license_field"))]
    pub license_number: Option<String>,

    pub is_active: Option<bool>,
}

/// Body of `PUT /v1/drivers/:id/license`
#[derive(Debug, Deserialize, Validate)]
pub struct LicenseUpdateRequest {
    #[validate(custom(function = "validate_license_field"))]
    pub license_number: String,
}

/// Driver detail response
#[derive(Debug, Serialize, Deserialize)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: Driver,

    pub cars: Vec<CarWithManufacturer>,
}

fn driver_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Driver {} not found", id))
}

pub async fn list_drivers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<Driver>>> {
    let window = PageWindow::new(query.page, Driver::count(&state.db).await?)?;
    let drivers = Driver::list(&state.db, window.limit(), window.offset()).await?;

    Ok(Json(Page::new(drivers, window)))
}

pub async fn create_driver(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateDriverRequest>,
) -> ApiResult<(StatusCode, Json<Driver>)> {
    req.validate()?;

    let driver = Driver::create(&state.db, req.into_create_driver()?).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

pub async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DriverDetail>> {
    let driver = Driver::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| driver_not_found(id))?;
    let cars = Car::list_for_driver(&state.db, id).await?;

    Ok(Json(DriverDetail { driver, cars }))
}

pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateDriverRequest>,
) -> ApiResult<Json<Driver>> {
    req.validate()?;

    let password_hash = req.password.as_deref().map(hash_password).transpose()?;

    let update = UpdateDriver {
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password_hash,
        license_number: req.license_number,
        is_staff: None,
        is_active: req.is_active,
    };

    let driver = Driver::update(&state.db, id, update)
        .await?
        .ok_or_else(|| driver_not_found(id))?;

    Ok(Json(driver))
}

pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !Driver::delete(&state.db, id).await? {
        return Err(driver_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<LicenseUpdateRequest>,
) -> ApiResult<Json<Driver>> {
    req.validate()?;

    let driver = Driver::update_license(&state.db, id, &req.license_number)
        .await?
        .ok_or_else(|| driver_not_found(id))?;

    Ok(Json(driver))
}
