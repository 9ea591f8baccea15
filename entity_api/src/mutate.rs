use crate::error::{EntityApiErrorKind, Error};
use entity::mixins::{self, TimestampMixin, VersionMixin};
use log::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, Value,
};
use std::collections::HashMap;

/// Copies every value in `update_map` whose key names a column of the entity onto
/// `active_model`. Keys that match no column are ignored.
pub fn apply_update_map<A, C>(active_model: &mut A, update_map: &UpdateMap)
where
    A: ActiveModelTrait,
    C: ColumnTrait,
    A::Entity: EntityTrait<Column = C>,
{
    for column in C::iter() {
        if let Some(value) = update_map.get(&column.to_string()) {
            active_model.set(column, value.clone());
        }
    }
}

/// Updates an existing record under optimistic locking.
///
/// The fields in `update_map` are applied to `active_model`, `updated_at` is
/// stamped and the version column moves to `expected_version + 1`. The UPDATE only
/// matches the row while its stored version still equals `expected_version`; when
/// another writer got there first nothing is updated and `StaleVersion` is returned.
pub async fn update_versioned<A, C>(
    db: &impl ConnectionTrait,
    mut active_model: A,
    expected_version: i32,
    update_map: UpdateMap,
) -> Result<<A::Entity as EntityTrait>::Model, Error>
where
    A: ActiveModelTrait + Send,
    C: ColumnTrait,
    A::Entity: EntityTrait<Column = C> + TimestampMixin + VersionMixin,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    apply_update_map(&mut active_model, &update_map);
    mixins::touch(&mut active_model, false);
    let next_version = mixins::bump_version(&mut active_model, expected_version);

    let version_column = <A::Entity as VersionMixin>::version_column();
    let result = <A::Entity as EntityTrait>::update(active_model)
        .filter(version_column.eq(expected_version))
        .exec(db)
        .await;

    match result {
        Ok(model) => {
            debug!("Record updated to version {next_version}");
            Ok(model)
        }
        Err(DbErr::RecordNotUpdated) => {
            warn!("Stale write rejected, expected version {expected_version}");
            Err(Error {
                source: Some(DbErr::RecordNotUpdated),
                error_kind: EntityApiErrorKind::StaleVersion,
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// A map structure that holds column names and their corresponding values for updates.
///
/// A key mapped to `None` is treated the same as an absent key: the column is left
/// untouched.
#[derive(Debug, Default)]
pub struct UpdateMap {
    map: HashMap<String, Option<Value>>,
}

impl UpdateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key).and_then(|opt| opt.as_ref())
    }

    /// Inserts a key-value pair into the map, overwriting any previous value.
    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }

    pub fn is_empty(&self) -> bool {
        self.map.values().all(Option::is_none)
    }
}

/// A trait that allows types to be converted into an UpdateMap.
pub trait IntoUpdateMap {
    fn into_update_map(self) -> UpdateMap;
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::users;
    use sea_orm::ActiveValue::{NotSet, Set};

    #[test]
    fn update_map_ignores_none_values() {
        let mut update_map = UpdateMap::new();
        update_map.insert("name".to_string(), None);
        assert!(update_map.get("name").is_none());
        assert!(update_map.is_empty());

        update_map.insert("name".to_string(), Some(Value::from("Ada")));
        assert_eq!(update_map.get("name"), Some(&Value::from("Ada")));
        assert!(!update_map.is_empty());
    }

    #[test]
    fn apply_update_map_only_touches_known_columns() {
        let mut update_map = UpdateMap::new();
        update_map.insert("title".to_string(), Some(Value::from("Engineer")));
        update_map.insert("password".to_string(), Some(Value::from("secret")));

        let mut active_model = <users::ActiveModel as ActiveModelTrait>::default();
        apply_update_map(&mut active_model, &update_map);

        assert_eq!(active_model.title, Set(Some("Engineer".to_string())));
        assert_eq!(active_model.name, NotSet);
    }
}
