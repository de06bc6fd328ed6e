/// Field validation rules shared by the models and the API request types
///
/// # Modules
///
/// - [`license`]: Driver license number format check
/// - [`username`]: Driver username format check
///
/// Every rule is a pure function returning `Result<(), _>`. The model layer
/// wraps failures in [`ModelError::Validation`](crate::error::ModelError) and
/// the API layer plugs the `*_field` adapters into `#[validate(custom(...))]`.

pub mod license;
pub mod username;
