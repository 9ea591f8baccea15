use super::validated::ValidatedQuery;
use crate::params::pagination::PaginationParams;
use crate::Error;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Range-checked `skip` / `limit` taken from the query string.
pub(crate) struct Paginate(pub domain::Pagination);

impl<S> FromRequestParts<S> for Paginate
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ValidatedQuery(params) =
            ValidatedQuery::<PaginationParams>::from_request_parts(parts, state).await?;
        Ok(Self(params.try_into()?))
    }
}
