/// API route handlers, one module per resource
///
/// - `health`: liveness and database check
/// - `auth`: registration, login, token refresh
/// - `index`: fleet counts
/// - `manufacturers`, `cars`, `drivers`: CRUD plus car assignment and
///   driver license updates

pub mod auth;
pub mod cars;
pub mod drivers;
pub mod health;
pub mod index;
pub mod manufacturers;
