/// Driver model and database operations
///
/// Drivers are the user accounts of the service: every authenticated actor is
/// a driver. A driver can be linked to any number of cars through the
/// `car_drivers` join table.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE drivers (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(150) NOT NULL UNIQUE,
///     first_name VARCHAR(150) NOT NULL DEFAULT '',
///     last_name VARCHAR(150) NOT NULL DEFAULT '',
///     email VARCHAR(254) NOT NULL DEFAULT '',
///     password_hash VARCHAR(255) NOT NULL,
///     license_number VARCHAR(255) NOT NULL UNIQUE,
///     is_staff BOOLEAN NOT NULL DEFAULT FALSE,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     date_joined TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login TIMESTAMPTZ
/// );
/// ```
///
/// # License Numbers
///
/// `create`, `update` and `update_license` run
/// [`validate_license_number`] before touching the database, so a malformed
/// number never reaches an INSERT or UPDATE. Uniqueness is left to the
/// `drivers_license_number_key` constraint, which is the only guard that holds
/// under concurrent writes.
///
/// # Example
///
/// ```no_run
/// use taxi_shared::models::driver::{CreateDriver, Driver};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let driver = Driver::create(&pool, CreateDriver {
///     username: "jdoe".to_string(),
///     first_name: "John".to_string(),
///     last_name: "Doe".to_string(),
///     email: String::new(),
///     password_hash: "$argon2id$...".to_string(),
///     license_number: "ABC12345".to_string(),
///     is_staff: false,
/// }).await?;
///
/// Driver::update_license(&pool, driver.id, "XYZ54321").await?;
/// # Ok(())
/// # }
/// ```

use crate::error::ModelError;
use crate::validation::{license::validate_license_number, username::validate_username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use tracing::info;
use uuid::Uuid;

const DRIVER_COLUMNS: &str = "id, username, first_name, last_name, email, password_hash, \
                              license_number, is_staff, is_active, date_joined, last_login";

/// A driver account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Driver {
    /// Unique driver ID
    pub id: Uuid,

    /// Login name, unique across all drivers
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    /// Email address (empty when not provided)
    pub email: String,

    /// Argon2id password hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// License number, unique and format-checked
    pub license_number: String,

    /// Whether the driver may operate the back office
    pub is_staff: bool,

    /// Inactive drivers cannot log in
    pub is_active: bool,

    pub date_joined: DateTime<Utc>,

    pub last_login: Option<DateTime<Utc>>,
}

/// Input for creating a driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDriver {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    pub license_number: String,
    pub is_staff: bool,
}

/// Input for updating a driver profile
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDriver {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub license_number: Option<String>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.username, self.first_name, self.last_name)
    }
}

/// Model-level adapter for the license number rule
fn ensure_license_number(license_number: &str) -> Result<(), ModelError> {
    validate_license_number(license_number)
        .map_err(|e| ModelError::invalid("license_number", e.to_string()))
}

fn ensure_username(username: &str) -> Result<(), ModelError> {
    validate_username(username).map_err(|reason| ModelError::invalid("username", reason))
}

impl Driver {
    /// Creates a driver
    ///
    /// # Errors
    ///
    /// - `ModelError::Validation` if the username or license number is malformed
    ///   (checked before the INSERT) or already taken (unique constraint)
    /// - `ModelError::Database` if the database fails
    pub async fn create(pool: &PgPool, data: CreateDriver) -> Result<Self, ModelError> {
        ensure_username(&data.username)?;
        ensure_license_number(&data.license_number)?;

        let query = format!(
            r#"
            INSERT INTO drivers (username, first_name, last_name, email, password_hash,
                                 license_number, is_staff)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {DRIVER_COLUMNS}
            "#
        );

        let driver = sqlx::query_as::<_, Driver>(&query)
            .bind(data.username)
            .bind(data.first_name)
            .bind(data.last_name)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.license_number)
            .bind(data.is_staff)
            .fetch_one(pool)
            .await?;

        info!(driver_id = %driver.id, username = %driver.username, "Driver created");
        Ok(driver)
    }

    /// Finds a driver by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = $1");

        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a driver by username (exact match)
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE username = $1");

        sqlx::query_as::<_, Driver>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Updates a driver profile
    ///
    /// Only non-None fields in `data` are written. A new license number goes
    /// through the same check as on creation.
    ///
    /// # Returns
    ///
    /// The updated driver, or None if the driver doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateDriver,
    ) -> Result<Option<Self>, ModelError> {
        if let Some(ref username) = data.username {
            ensure_username(username)?;
        }
        if let Some(ref license_number) = data.license_number {
            ensure_license_number(license_number)?;
        }

        // Build dynamic update query based on which fields are present
        let mut assignments: Vec<String> = Vec::new();
        let mut bind_count = 1;
        let mut push = |column: &str| {
            bind_count += 1;
            assignments.push(format!("{} = ${}", column, bind_count));
        };

        if data.username.is_some() {
            push("username");
        }
        if data.first_name.is_some() {
            push("first_name");
        }
        if data.last_name.is_some() {
            push("last_name");
        }
        if data.email.is_some() {
            push("email");
        }
        if data.password_hash.is_some() {
            push("password_hash");
        }
        if data.license_number.is_some() {
            push("license_number");
        }
        if data.is_staff.is_some() {
            push("is_staff");
        }
        if data.is_active.is_some() {
            push("is_active");
        }

        if assignments.is_empty() {
            return Ok(Self::find_by_id(pool, id).await?);
        }

        let query = format!(
            "UPDATE drivers SET {} WHERE id = $1 RETURNING {DRIVER_COLUMNS}",
            assignments.join(", ")
        );

        let mut q = sqlx::query_as::<_, Driver>(&query).bind(id);

        if let Some(username) = data.username {
            q = q.bind(username);
        }
        if let Some(first_name) = data.first_name {
            q = q.bind(first_name);
        }
        if let Some(last_name) = data.last_name {
            q = q.bind(last_name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }
        if let Some(license_number) = data.license_number {
            q = q.bind(license_number);
        }
        if let Some(is_staff) = data.is_staff {
            q = q.bind(is_staff);
        }
        if let Some(is_active) = data.is_active {
            q = q.bind(is_active);
        }

        Ok(q.fetch_optional(pool).await?)
    }

    /// Replaces a driver's license number
    ///
    /// This is the narrow update used by the license form: nothing but
    /// `license_number` is touched.
    ///
    /// # Returns
    ///
    /// The updated driver, or None if the driver doesn't exist
    ///
    /// # Errors
    ///
    /// `ModelError::Validation` on `license_number` if the number is malformed
    /// or held by another driver
    pub async fn update_license(
        pool: &PgPool,
        id: Uuid,
        license_number: &str,
    ) -> Result<Option<Self>, ModelError> {
        ensure_license_number(license_number)?;

        let query = format!(
            "UPDATE drivers SET license_number = $2 WHERE id = $1 RETURNING {DRIVER_COLUMNS}"
        );

        let driver = sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(license_number)
            .fetch_optional(pool)
            .await?;

        if driver.is_some() {
            info!(driver_id = %id, "Driver license number updated");
        }
        Ok(driver)
    }

    /// Records a successful login
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE drivers SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a driver
    ///
    /// Car assignments are removed with it; the cars themselves stay.
    ///
    /// # Returns
    ///
    /// True if the driver was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(driver_id = %id, "Driver deleted");
        }
        Ok(deleted)
    }

    /// Lists drivers ordered by username
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY username LIMIT $1 OFFSET $2"
        );

        sqlx::query_as::<_, Driver>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Lists the drivers assigned to a car, ordered by username
    pub async fn list_for_car(pool: &PgPool, car_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Driver>(
            r#"
            SELECT d.id, d.username, d.first_name, d.last_name, d.email, d.password_hash,
                   d.license_number, d.is_staff, d.is_active, d.date_joined, d.last_login
            FROM drivers d
            JOIN car_drivers cd ON cd.driver_id = d.id
            WHERE cd.car_id = $1
            ORDER BY d.username
            "#,
        )
        .bind(car_id)
        .fetch_all(pool)
        .await
    }

    /// Counts all drivers
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drivers")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
