use crate::error::Error;
use domain::{Pagination, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

/// `skip` / `limit` query parameters accepted by every listing endpoint.
///
/// Both are parsed as signed integers so that a negative value reaches the range
/// check below and is reported as such, instead of as a generic parse failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of records to skip (default 0)
    #[param(minimum = 0)]
    pub skip: Option<i64>,
    /// Maximum number of records to return (default 20, max 100)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = Error;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let skip = params.skip.unwrap_or(0);
        let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT as i64);

        let mut problems = Vec::new();
        if skip < 0 {
            problems.push(json!({
                "field": "skip",
                "message": "skip must be greater than or equal to 0",
                "value": skip,
            }));
        }
        if !(1..=MAX_PAGE_LIMIT as i64).contains(&limit) {
            problems.push(json!({
                "field": "limit",
                "message": format!("limit must be between 1 and {MAX_PAGE_LIMIT}"),
                "value": limit,
            }));
        }

        if !problems.is_empty() {
            return Err(Error::validation(
                "Invalid pagination parameters",
                json!({ "errors": problems }),
            ));
        }

        Ok(Pagination::new(skip as u64, limit as u64))
    }
}
