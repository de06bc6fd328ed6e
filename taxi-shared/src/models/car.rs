/// Car model, car-driver assignments and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE cars (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     model VARCHAR(255) NOT NULL,
///     manufacturer_id UUID NOT NULL REFERENCES manufacturers(id) ON DELETE CASCADE
/// );
///
/// CREATE TABLE car_drivers (
///     car_id UUID NOT NULL REFERENCES cars(id) ON DELETE CASCADE,
///     driver_id UUID NOT NULL REFERENCES drivers(id) ON DELETE CASCADE,
///     PRIMARY KEY (car_id, driver_id)
/// );
/// ```
///
/// # Assignments
///
/// [`Car::assign_driver`] and [`Car::unassign_driver`] each run as one
/// statement against `car_drivers`: insert-on-conflict-do-nothing and
/// delete-if-present. Both are idempotent and report whether the car exists,
/// so the caller can tell "no such car" apart from "nothing to change".
///
/// # Example
///
/// ```no_run
/// use taxi_shared::models::car::{Car, CreateCar};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, manufacturer_id: Uuid, driver_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let car = Car::create(&pool, CreateCar {
///     model: "Corolla".to_string(),
///     manufacturer_id,
///     driver_ids: vec![],
/// }).await?;
///
/// assert!(Car::assign_driver(&pool, car.id, driver_id).await?);
/// assert!(Car::is_driver_assigned(&pool, car.id, driver_id).await?);
/// # Ok(())
/// # }
/// ```

use crate::error::{violates_constraint, ModelError};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

/// A car in the fleet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Car {
    /// Unique car ID
    pub id: Uuid,

    /// Model name, e.g. "Corolla"
    pub model: String,

    /// Owning manufacturer
    pub manufacturer_id: Uuid,
}

/// A car joined with its manufacturer, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CarWithManufacturer {
    pub id: Uuid,
    pub model: String,
    pub manufacturer_id: Uuid,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
}

/// Input for creating a car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCar {
    pub model: String,
    pub manufacturer_id: Uuid,

    /// Initial driver set (may be empty, duplicates are ignored)
    #[serde(default)]
    pub driver_ids: Vec<Uuid>,
}

/// Input for updating a car
///
/// Only non-None fields are updated. `driver_ids` replaces the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCar {
    pub model: Option<String>,
    pub manufacturer_id: Option<Uuid>,
    pub driver_ids: Option<Vec<Uuid>>,
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)
    }
}

fn ensure_model(model: &str) -> Result<(), ModelError> {
    if model.is_empty() {
        return Err(ModelError::invalid("model", "This field is required."));
    }
    Ok(())
}

impl Car {
    /// Creates a car and its initial driver set in one transaction
    ///
    /// # Errors
    ///
    /// - `ModelError::Validation` on `model` if empty
    /// - `ModelError::Validation` on `manufacturer` if the manufacturer doesn't exist
    /// - `ModelError::Validation` on `drivers` if a driver doesn't exist
    pub async fn create(pool: &PgPool, data: CreateCar) -> Result<Self, ModelError> {
        ensure_model(&data.model)?;

        let mut tx = pool.begin().await?;

        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (model, manufacturer_id)
            VALUES ($1, $2)
            RETURNING id, model, manufacturer_id
            "#,
        )
        .bind(data.model)
        .bind(data.manufacturer_id)
        .fetch_one(&mut *tx)
        .await?;

        if !data.driver_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO car_drivers (car_id, driver_id)
                SELECT $1, UNNEST($2::uuid[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(car.id)
            .bind(data.driver_ids.as_slice())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(car_id = %car.id, model = %car.model, drivers = data.driver_ids.len(), "Car created");
        Ok(car)
    }

    /// Finds a car by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Car>("SELECT id, model, manufacturer_id FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a car by ID together with its manufacturer
    pub async fn find_with_manufacturer(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<CarWithManufacturer>, sqlx::Error> {
        sqlx::query_as::<_, CarWithManufacturer>(
            r#"
            SELECT c.id, c.model, c.manufacturer_id,
                   m.name AS manufacturer_name, m.country AS manufacturer_country
            FROM cars c
            JOIN manufacturers m ON m.id = c.manufacturer_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Updates a car
    ///
    /// When `driver_ids` is present the car's driver set is replaced; the
    /// whole update commits or rolls back as one transaction.
    ///
    /// # Returns
    ///
    /// The updated car, or None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateCar,
    ) -> Result<Option<Self>, ModelError> {
        if let Some(ref model) = data.model {
            ensure_model(model)?;
        }

        let mut tx = pool.begin().await?;

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET model = COALESCE($2, model),
                manufacturer_id = COALESCE($3, manufacturer_id)
            WHERE id = $1
            RETURNING id, model, manufacturer_id
            "#,
        )
        .bind(id)
        .bind(data.model)
        .bind(data.manufacturer_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(car) = car else {
            return Ok(None);
        };

        if let Some(driver_ids) = data.driver_ids {
            sqlx::query("DELETE FROM car_drivers WHERE car_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                INSERT INTO car_drivers (car_id, driver_id)
                SELECT $1, UNNEST($2::uuid[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(id)
            .bind(driver_ids.as_slice())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(car))
    }

    /// Deletes a car
    ///
    /// Drivers assigned to the car are not deleted.
    ///
    /// # Returns
    ///
    /// True if the car was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(car_id = %id, "Car deleted");
        }
        Ok(deleted)
    }

    /// Lists cars with their manufacturer, ordered by model
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CarWithManufacturer>, sqlx::Error> {
        sqlx::query_as::<_, CarWithManufacturer>(
            r#"
            SELECT c.id, c.model, c.manufacturer_id,
                   m.name AS manufacturer_name, m.country AS manufacturer_country
            FROM cars c
            JOIN manufacturers m ON m.id = c.manufacturer_id
            ORDER BY c.model, c.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Lists the cars a driver is assigned to, with their manufacturer
    pub async fn list_for_driver(
        pool: &PgPool,
        driver_id: Uuid,
    ) -> Result<Vec<CarWithManufacturer>, sqlx::Error> {
        sqlx::query_as::<_, CarWithManufacturer>(
            r#"
            SELECT c.id, c.model, c.manufacturer_id,
                   m.name AS manufacturer_name, m.country AS manufacturer_country
            FROM cars c
            JOIN manufacturers m ON m.id = c.manufacturer_id
            JOIN car_drivers cd ON cd.car_id = c.id
            WHERE cd.driver_id = $1
            ORDER BY c.model, c.id
            "#,
        )
        .bind(driver_id)
        .fetch_all(pool)
        .await
    }

    /// Counts all cars
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Adds a driver to a car's driver set
    ///
    /// Assigning a driver that is already assigned changes nothing.
    ///
    /// # Returns
    ///
    /// True if the car exists (whether or not a row was inserted), false
    /// otherwise, including when the car is deleted while the insert runs
    ///
    /// # Errors
    ///
    /// `ModelError::Validation` on `drivers` if the driver doesn't exist
    pub async fn assign_driver(
        pool: &PgPool,
        car_id: Uuid,
        driver_id: Uuid,
    ) -> Result<bool, ModelError> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            WITH car AS (
                SELECT id FROM cars WHERE id = $1
            ), assigned AS (
                INSERT INTO car_drivers (car_id, driver_id)
                SELECT id, $2 FROM car
                ON CONFLICT DO NOTHING
            )
            SELECT EXISTS (SELECT 1 FROM car)
            "#,
        )
        .bind(car_id)
        .bind(driver_id)
        .fetch_one(pool)
        .await;

        let car_exists = match result {
            Ok(car_exists) => car_exists,
            // The car row was visible to the select but gone by the FK check
            Err(err) if violates_constraint(&err, "car_drivers_car_id_fkey") => false,
            Err(err) => return Err(err.into()),
        };

        debug!(car_id = %car_id, driver_id = %driver_id, car_exists, "Driver assigned to car");
        Ok(car_exists)
    }

    /// Removes a driver from a car's driver set
    ///
    /// Removing a driver that isn't assigned changes nothing.
    ///
    /// # Returns
    ///
    /// True if the car exists (whether or not a row was deleted), false otherwise
    pub async fn unassign_driver(
        pool: &PgPool,
        car_id: Uuid,
        driver_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let car_exists = sqlx::query_scalar::<_, bool>(
            r#"
            WITH car AS (
                SELECT id FROM cars WHERE id = $1
            ), removed AS (
                DELETE FROM car_drivers
                WHERE car_id IN (SELECT id FROM car) AND driver_id = $2
            )
            SELECT EXISTS (SELECT 1 FROM car)
            "#,
        )
        .bind(car_id)
        .bind(driver_id)
        .fetch_one(pool)
        .await?;

        debug!(car_id = %car_id, driver_id = %driver_id, car_exists, "Driver removed from car");
        Ok(car_exists)
    }

    /// Checks whether a driver is assigned to a car
    pub async fn is_driver_assigned(
        pool: &PgPool,
        car_id: Uuid,
        driver_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM car_drivers WHERE car_id = $1 AND driver_id = $2)",
        )
        .bind(car_id)
        .bind(driver_id)
        .fetch_one(pool)
        .await
    }
}
