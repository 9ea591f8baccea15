use domain::Order;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Common sort order values used across all entities
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[schema(example = "desc")]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl From<SortOrder> for Order {
    fn from(sort_order: SortOrder) -> Self {
        match sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}
