use super::sort::SortOrder;
use serde::Deserialize;
use utoipa::IntoParams;

/// Free-text search and sorting query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive text matched against name and title
    pub q: Option<String>,
    /// Column to sort by, e.g. `name`, `title` or `created_at`
    pub sort_by: Option<String>,
    /// Sort direction (default `asc`)
    #[serde(default)]
    #[param(inline)]
    pub order: SortOrder,
}
