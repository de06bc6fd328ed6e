/// Request body extraction
///
/// [`JsonBody`] behaves like `axum::Json` but rejects with [`ApiError`], so a
/// body that fails to parse gets the same JSON error envelope as every other
/// failure:
///
/// | Rejection                     | Response                              |
/// |-------------------------------|---------------------------------------|
/// | well-formed JSON, wrong shape | 422 `validation_error`, field `body`  |
/// | malformed JSON                | 400 `bad_request`                     |
/// | missing JSON content type     | 400 `bad_request`                     |

use crate::error::ApiError;
use axum::{extract::rejection::JsonRejection, extract::FromRequest};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ApiError::invalid("body", err.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}
