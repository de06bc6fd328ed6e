/// Manufacturer model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE manufacturers (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL UNIQUE CHECK (name <> ''),
///     country VARCHAR(255) NOT NULL CHECK (country <> '')
/// );
/// ```
///
/// Deleting a manufacturer deletes its cars (`ON DELETE CASCADE` on
/// `cars.manufacturer_id`).
///
/// # Example
///
/// ```no_run
/// use taxi_shared::models::manufacturer::{CreateManufacturer, Manufacturer};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let toyota = Manufacturer::create(&pool, CreateManufacturer {
///     name: "Toyota".to_string(),
///     country: "Japan".to_string(),
/// }).await?;
///
/// let first_page = Manufacturer::list(&pool, 5, 0).await?;
/// # Ok(())
/// # }
/// ```

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// A car manufacturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Manufacturer {
    /// Unique manufacturer ID
    pub id: Uuid,

    /// Manufacturer name, unique across all manufacturers
    pub name: String,

    /// Country of origin
    pub country: String,
}

/// Input for creating a manufacturer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateManufacturer {
    pub name: String,
    pub country: String,
}

/// Input for updating a manufacturer
///
/// Only non-None fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateManufacturer {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}

fn ensure_present(field: &'static str, value: &str) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::invalid(field, "This field is required."));
    }
    Ok(())
}

impl Manufacturer {
    /// Creates a manufacturer
    ///
    /// # Errors
    ///
    /// - `ModelError::Validation` on `name` if it is empty or already taken
    /// - `ModelError::Validation` on `country` if it is empty
    /// - `ModelError::Database` if the database fails
    pub async fn create(pool: &PgPool, data: CreateManufacturer) -> Result<Self, ModelError> {
        ensure_present("name", &data.name)?;
        ensure_present("country", &data.country)?;

        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            r#"
            INSERT INTO manufacturers (name, country)
            VALUES ($1, $2)
            RETURNING id, name, country
            "#,
        )
        .bind(data.name)
        .bind(data.country)
        .fetch_one(pool)
        .await?;

        info!(manufacturer_id = %manufacturer.id, name = %manufacturer.name, "Manufacturer created");
        Ok(manufacturer)
    }

    /// Finds a manufacturer by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Manufacturer>(
            "SELECT id, name, country FROM manufacturers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Updates a manufacturer
    ///
    /// # Returns
    ///
    /// The updated manufacturer, or None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateManufacturer,
    ) -> Result<Option<Self>, ModelError> {
        if let Some(ref name) = data.name {
            ensure_present("name", name)?;
        }
        if let Some(ref country) = data.country {
            ensure_present("country", country)?;
        }

        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            r#"
            UPDATE manufacturers
            SET name = COALESCE($2, name),
                country = COALESCE($3, country)
            WHERE id = $1
            RETURNING id, name, country
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.country)
        .fetch_optional(pool)
        .await?;

        Ok(manufacturer)
    }

    /// Deletes a manufacturer together with all of its cars
    ///
    /// # Returns
    ///
    /// True if the manufacturer was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(manufacturer_id = %id, "Manufacturer deleted");
        }
        Ok(deleted)
    }

    /// Lists manufacturers ordered by name
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Manufacturer>(
            r#"
            SELECT id, name, country
            FROM manufacturers
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Counts all manufacturers
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM manufacturers")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
