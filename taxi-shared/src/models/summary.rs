/// Fleet-wide counts shown on the landing page
///
/// Counts are read live on every call; nothing is cached.

use super::{car::Car, driver::Driver, manufacturer::Manufacturer};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Row counts of each entity at the time of the call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub num_drivers: i64,
    pub num_cars: i64,
    pub num_manufacturers: i64,
}

impl FleetSummary {
    /// Reads the current counts
    ///
    /// # Example
    ///
    /// ```no_run
    /// use taxi_shared::models::summary::FleetSummary;
    /// use sqlx::PgPool;
    ///
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let summary = FleetSummary::load(&pool).await?;
    /// println!("{} drivers, {} cars", summary.num_drivers, summary.num_cars);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            num_drivers: Driver::count(pool).await?,
            num_cars: Car::count(pool).await?,
            num_manufacturers: Manufacturer::count(pool).await?,
        })
    }
}
