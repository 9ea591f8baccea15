use crate::error::{EntityApiErrorKind, Error};
use log::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryOrder, QuerySelect,
    Select,
};
use serde::Serialize;

/// Number of rows returned when the caller does not ask for a specific page size.
pub const DEFAULT_PAGE_LIMIT: u64 = 20;
/// Upper bound on the page size of any listing.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Offset/limit window over a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: u64,
}

impl Pagination {
    /// Builds a window, clamping `limit` into `1..=MAX_PAGE_LIMIT`.
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

/// One window of a listing together with the size of the whole (filtered) listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<M> {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub items: Vec<M>,
}

/// Applies `pagination` to `select` and runs it.
pub async fn fetch_window<E>(
    db: &impl ConnectionTrait,
    select: Select<E>,
    pagination: Pagination,
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait,
{
    Ok(select
        .offset(pagination.skip)
        .limit(pagination.limit)
        .all(db)
        .await?)
}

/// Counts the rows matched by `select`, then fetches the requested window of them.
pub async fn paginate<E>(
    db: &impl ConnectionTrait,
    select: Select<E>,
    pagination: Pagination,
) -> Result<Page<E::Model>, Error>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let total = select.clone().count(db).await?;
    let items = fetch_window(db, select, pagination).await?;

    debug!(
        "Fetched {} of {total} rows (skip={}, limit={})",
        items.len(),
        pagination.skip,
        pagination.limit
    );

    Ok(Page {
        total,
        skip: pagination.skip,
        limit: pagination.limit,
        items,
    })
}

/// Provides a column and direction to order a query by.
pub trait QuerySort<C> {
    fn get_sort_column(&self) -> Option<C>;
    fn get_sort_order(&self) -> Option<Order>;
}

/// Orders `select` by the requested column, or by `default` when none was requested.
/// A requested column without a direction sorts ascending.
pub fn apply_sort<E, C, S>(select: Select<E>, sort: &S, default: (C, Order)) -> Select<E>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait,
    S: QuerySort<C>,
{
    match sort.get_sort_column() {
        Some(column) => select.order_by(column, sort.get_sort_order().unwrap_or(Order::Asc)),
        None => select.order_by(default.0, default.1),
    }
}

/// Resolves a column of an entity by its database name.
pub fn parse_sort_column<C>(name: &str) -> Result<C, Error>
where
    C: ColumnTrait,
{
    name.parse::<C>().map_err(|_| {
        warn!("Invalid sort_by field: {name}");
        Error {
            source: None,
            error_kind: EntityApiErrorKind::InvalidSortField(name.to_string()),
        }
    })
}

/// Free-text search plus an optional sort, resolved against one entity's columns.
#[derive(Clone, Debug)]
pub struct Search<C> {
    pub term: Option<String>,
    pub sort_column: Option<C>,
    pub sort_order: Option<Order>,
}

impl<C> Search<C>
where
    C: ColumnTrait,
{
    /// Builds a search, rejecting a `sort_by` that names no column of the entity.
    /// An empty search term is treated as absent.
    pub fn parse(term: Option<String>, sort_by: Option<&str>, order: Order) -> Result<Self, Error> {
        let sort_column = sort_by.map(parse_sort_column::<C>).transpose()?;
        Ok(Self {
            term: term.filter(|t| !t.is_empty()),
            sort_column,
            sort_order: Some(order),
        })
    }
}

impl<C> QuerySort<C> for Search<C>
where
    C: Copy,
{
    fn get_sort_column(&self) -> Option<C> {
        self.sort_column
    }

    fn get_sort_order(&self) -> Option<Order> {
        self.sort_order.clone()
    }
}
