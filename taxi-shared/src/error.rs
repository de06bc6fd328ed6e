/// Error type for model write operations
///
/// Reads return `sqlx::Error` directly. Writes return [`ModelError`] so that
/// validation failures detected before the query, and constraint violations
/// reported by PostgreSQL, reach the caller as the same `Validation` variant.
///
/// # Constraint Mapping
///
/// | Constraint                        | Field            |
/// |-----------------------------------|------------------|
/// | `manufacturers_name_key`          | `name`           |
/// | `manufacturers_name_not_empty`    | `name`           |
/// | `manufacturers_country_not_empty` | `country`        |
/// | `drivers_username_key`            | `username`       |
/// | `drivers_license_number_key`      | `license_number` |
/// | `cars_manufacturer_id_fkey`       | `manufacturer`   |
/// | `cars_model_not_empty`            | `model`          |
/// | `car_drivers_driver_id_fkey`      | `drivers`        |

use tracing::debug;

/// Error returned by model create/update/assign operations
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Input rejected, either before the write or by a database constraint
    #[error("{field}: {message}")]
    Validation {
        /// Field the failure is attributed to
        field: &'static str,

        /// Human-readable message
        message: String,
    },

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl ModelError {
    /// Builds a validation error for `field`
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ModelError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns true for validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, ModelError::Validation { .. })
    }
}

impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if let Some((field, message)) = db_err.constraint().and_then(constraint_message) {
                debug!(constraint = ?db_err.constraint(), field, "Constraint violation");
                return ModelError::invalid(field, message);
            }
        }
        ModelError::Database(err)
    }
}

/// True when `err` is a violation of the named constraint
pub(crate) fn violates_constraint(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

fn constraint_message(constraint: &str) -> Option<(&'static str, &'static str)> {
    let mapped = match constraint {
        "manufacturers_name_key" => ("name", "Manufacturer with this name already exists."),
        "manufacturers_name_not_empty" => ("name", "This field is required."),
        "manufacturers_country_not_empty" => ("country", "This field is required."),
        "drivers_username_key" => ("username", "A user with that username already exists."),
        "drivers_license_number_key" => (
            "license_number",
            "Driver with this license number already exists.",
        ),
        "cars_manufacturer_id_fkey" => ("manufacturer", "Select a valid manufacturer."),
        "cars_model_not_empty" => ("model", "This field is required."),
        "car_drivers_driver_id_fkey" => ("drivers", "Select a valid driver."),
        _ => return None,
    };
    Some(mapped)
}
