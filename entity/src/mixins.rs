//! Behaviour shared by persisted tables.
//!
//! A mixin is a trait implemented on an entity that names the column carrying one
//! concern. The free functions in this module operate on any `ActiveModel` whose
//! entity implements the matching trait, so an entity opts in by implementing the
//! trait and calling the helpers from its `ActiveModelBehavior`.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

use crate::Id;

/// First value of a version column for a newly inserted row.
pub const INITIAL_VERSION: i32 = 1;

/// Entity with a UUID primary key generated when the row is created.
pub trait UuidPrimaryKeyMixin: EntityTrait {
    fn id_column() -> Self::Column;
}

/// Entity with `created_at` / `updated_at` columns.
///
/// `created_at` is written once on insert; `updated_at` on every insert and update.
pub trait TimestampMixin: EntityTrait {
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
}

/// Entity with an integer counter used for optimistic locking.
pub trait VersionMixin: EntityTrait {
    fn version_column() -> Self::Column;
}

/// Assigns a fresh v4 UUID unless the caller already set an explicit id.
pub fn assign_id<A>(active_model: &mut A)
where
    A: ActiveModelTrait,
    A::Entity: UuidPrimaryKeyMixin,
{
    let column = <A::Entity as UuidPrimaryKeyMixin>::id_column();
    if active_model.is_not_set(column) {
        active_model.set(column, Id::new_v4().into());
    }
}

/// Stamps the timestamp columns for an insert (`insert == true`) or an update.
pub fn touch<A>(active_model: &mut A, insert: bool)
where
    A: ActiveModelTrait,
    A::Entity: TimestampMixin,
{
    let now: DateTimeWithTimeZone = Utc::now().into();

    if insert {
        active_model.set(
            <A::Entity as TimestampMixin>::created_at_column(),
            now.into(),
        );
    }
    active_model.set(
        <A::Entity as TimestampMixin>::updated_at_column(),
        now.into(),
    );
}

/// Sets the version column to [`INITIAL_VERSION`].
pub fn init_version<A>(active_model: &mut A)
where
    A: ActiveModelTrait,
    A::Entity: VersionMixin,
{
    active_model.set(
        <A::Entity as VersionMixin>::version_column(),
        INITIAL_VERSION.into(),
    );
}

/// Moves the version column to `expected + 1` and returns the new value.
///
/// `expected` is the version the writer read; the caller filters the UPDATE on it.
pub fn bump_version<A>(active_model: &mut A, expected: i32) -> i32
where
    A: ActiveModelTrait,
    A::Entity: VersionMixin,
{
    let next = expected + 1;
    active_model.set(<A::Entity as VersionMixin>::version_column(), next.into());
    next
}

/// True when the version column has been explicitly set on the active model.
pub fn version_is_set<A>(active_model: &A) -> bool
where
    A: ActiveModelTrait,
    A::Entity: VersionMixin,
{
    matches!(
        active_model.get(<A::Entity as VersionMixin>::version_column()),
        ActiveValue::Set(_)
    )
}
