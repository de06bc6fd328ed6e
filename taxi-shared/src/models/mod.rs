/// Database models for the taxi fleet
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `manufacturer`: Car manufacturers, listed by name
/// - `driver`: Driver accounts with license numbers
/// - `car`: Cars, their manufacturer and their assigned drivers
/// - `summary`: Live entity counts for the landing page
///
/// # Example
///
/// ```no_run
/// use taxi_shared::models::manufacturer::{CreateManufacturer, Manufacturer};
/// use taxi_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let manufacturer = Manufacturer::create(&pool, CreateManufacturer {
///     name: "Volvo".to_string(),
///     country: "Sweden".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod car;
pub mod driver;
pub mod manufacturer;
pub mod summary;
