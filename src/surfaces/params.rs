use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;

use crate::services::blog::ListParams;
use crate::services::error::ResourceError;

/**
 * `Path` that answers with `{error}` instead of axum's plain-text 400
 */
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ResourceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ResourceError::Validation(rejection.body_text()))?;
        Ok(PathParam(value))
    }
}

/**
 * query string of `GET /blog`
 * read as raw pairs so a repeated key never rejects the request
 */
pub struct ListQuery(pub ListParams);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ResourceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| ResourceError::Validation(rejection.body_text()))?;
        Ok(ListQuery(ListParams::from_pairs(pairs)))
    }
}
