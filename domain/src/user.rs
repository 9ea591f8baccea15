use crate::{error::Error, users, Id};
use entity_api::mutate::IntoUpdateMap;
use entity_api::query::{Page, Pagination, Search};
use entity_api::user;
use sea_orm::{ConnectionTrait, Order};

pub use entity_api::user::NewUser;

pub async fn create(db: &impl ConnectionTrait, new_user: NewUser) -> Result<users::Model, Error> {
    Ok(user::create(db, new_user).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<users::Model, Error> {
    Ok(user::find_by_id(db, id).await?)
}

pub async fn find_all(
    db: &impl ConnectionTrait,
    pagination: Pagination,
) -> Result<Vec<users::Model>, Error> {
    Ok(user::find_all(db, pagination).await?)
}

pub async fn find_page(
    db: &impl ConnectionTrait,
    pagination: Pagination,
) -> Result<Page<users::Model>, Error> {
    Ok(user::find_page(db, pagination).await?)
}

/// Searches users by free text, resolving `sort_by` against the users table's columns.
pub async fn search(
    db: &impl ConnectionTrait,
    term: Option<String>,
    sort_by: Option<&str>,
    order: Order,
    pagination: Pagination,
) -> Result<Page<users::Model>, Error> {
    let search = Search::<users::Column>::parse(term, sort_by, order)?;
    Ok(user::search(db, &search, pagination).await?)
}

pub async fn count(db: &impl ConnectionTrait) -> Result<u64, Error> {
    Ok(user::count(db).await?)
}

pub async fn update(
    db: &impl ConnectionTrait,
    user_id: Id,
    expected_version: i32,
    params: impl IntoUpdateMap,
) -> Result<users::Model, Error> {
    Ok(user::update(db, user_id, expected_version, params.into_update_map()).await?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, user_id: Id) -> Result<(), Error> {
    Ok(user::delete_by_id(db, user_id).await?)
}


#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod mock_tests {
    use super::*;
    use crate::error::EntityErrorKind;
    use crate::UpdateMap;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    struct Rename(&'static str);

    impl IntoUpdateMap for Rename {
        fn into_update_map(self) -> UpdateMap {
            let mut update_map = UpdateMap::new();
            update_map.insert("name".to_string(), Some(self.0.into()));
            update_map
        }
    }

    fn user_model(version: i32) -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: Id::new_v4(),
            name: Some("Ada".to_string()),
            title: None,
            version,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn update_with_a_stale_version_is_a_conflict() {
        let stored = user_model(2);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .into_connection();

        let err = update(&db, stored.id, 1, Rename("Grace")).await.unwrap_err();

        assert_eq!(err.entity_error_kind(), &EntityErrorKind::Conflict);
    }

    #[tokio::test]
    async fn database_failures_surface_as_db_transaction_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = count(&db).await.unwrap_err();

        assert_eq!(err.entity_error_kind(), &EntityErrorKind::DbTransaction);
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn find_by_id_of_a_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let err = find_by_id(&db, Id::new_v4()).await.unwrap_err();

        assert_eq!(err.entity_error_kind(), &EntityErrorKind::NotFound);
    }
}
