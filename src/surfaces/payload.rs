use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;

use crate::services::error::ResourceError;

/**
 * JSON body extractor for both surfaces
 * an unreadable body becomes a 500 `{error}` like any other failed write
 */
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ResourceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ResourceError::Validation(rejection.body_text()))?;
        Ok(Payload(value))
    }
}
