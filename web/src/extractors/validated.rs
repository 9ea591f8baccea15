use crate::Error;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

/// `Query<T>` whose rejection is a 422 `validation_error`.
pub(crate) struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                Error::validation(
                    "Invalid query parameters",
                    json!({ "errors": [rejection.body_text()] }),
                )
            })?;
        Ok(Self(value))
    }
}

/// `Path<T>` whose rejection is a 422 `validation_error`.
pub(crate) struct ValidatedPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                Error::validation(
                    "Invalid path parameters",
                    json!({ "errors": [rejection.body_text()] }),
                )
            })?;
        Ok(Self(value))
    }
}

/// `Json<T>` whose rejection is a 422 `validation_error`.
pub(crate) struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                Error::validation(
                    "Invalid request body",
                    json!({ "errors": [rejection.body_text()] }),
                )
            })?;
        Ok(Self(value))
    }
}
