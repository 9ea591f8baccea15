use super::error::{EntityApiErrorKind, Error};
use crate::mutate::{self, UpdateMap};
use crate::query::{self, Page, Pagination, QuerySort, Search};
use entity::users::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::prelude::*, ActiveModelBehavior, Condition, ConnectionTrait, IntoActiveModel, Order,
    QueryOrder, Select, Set,
};

/// Fields a caller may supply when creating a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Explicit primary key; a v4 UUID is generated when absent.
    pub id: Option<Id>,
    pub name: Option<String>,
    pub title: Option<String>,
}

pub async fn create(db: &impl ConnectionTrait, new_user: NewUser) -> Result<Model, Error> {
    debug!("New User to be inserted: {new_user:?}");

    let mut user_active_model = ActiveModel::new();
    if let Some(id) = new_user.id {
        user_active_model.id = Set(id);
    }
    user_active_model.name = Set(new_user.name);
    user_active_model.title = Set(new_user.title);

    Ok(user_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| {
        warn!("User with id {id} not found");
        Error::not_found()
    })
}

/// Users ordered by creation time, oldest first.
pub async fn find_all(
    db: &impl ConnectionTrait,
    pagination: Pagination,
) -> Result<Vec<Model>, Error> {
    query::fetch_window(
        db,
        Entity::find().order_by_asc(Column::CreatedAt),
        pagination,
    )
    .await
}

/// One page of users, newest first, with the total number of users.
pub async fn find_page(
    db: &impl ConnectionTrait,
    pagination: Pagination,
) -> Result<Page<Model>, Error> {
    query::paginate(
        db,
        Entity::find().order_by_desc(Column::CreatedAt),
        pagination,
    )
    .await
}

/// Case-insensitive substring match on `name` or `title`, sorted by the requested
/// column (newest first by default). `total` counts every match, not just the page.
pub async fn search(
    db: &impl ConnectionTrait,
    search: &Search<Column>,
    pagination: Pagination,
) -> Result<Page<Model>, Error> {
    let select = query::apply_sort(
        filter_by_term(Entity::find(), search.term.as_deref()),
        search,
        (Column::CreatedAt, Order::Desc),
    );

    debug!(
        "Searching users: term={:?} sort_column={:?} sort_order={:?}",
        search.term,
        search.get_sort_column(),
        search.get_sort_order()
    );

    query::paginate(db, select, pagination).await
}

fn filter_by_term(select: Select<Entity>, term: Option<&str>) -> Select<Entity> {
    match term {
        Some(term) => {
            let pattern = format!("%{term}%");
            select.filter(
                Condition::any()
                    .add(Expr::col((Entity, Column::Name)).ilike(pattern.clone()))
                    .add(Expr::col((Entity, Column::Title)).ilike(pattern)),
            )
        }
        None => select,
    }
}

pub async fn count(db: &impl ConnectionTrait) -> Result<u64, Error> {
    Ok(Entity::find().count(db).await?)
}

/// Applies `update_map` to the user with `id`, provided the stored row is still at
/// `expected_version`.
pub async fn update(
    db: &impl ConnectionTrait,
    id: Id,
    expected_version: i32,
    update_map: UpdateMap,
) -> Result<Model, Error> {
    let user = find_by_id(db, id).await?;

    if user.version != expected_version {
        warn!(
            "Stale update of user {id}: stored version {}, caller read {expected_version}",
            user.version
        );
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::StaleVersion,
        });
    }

    mutate::update_versioned(db, user.into_active_model(), expected_version, update_map).await
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let result = Entity::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        warn!("User with id {id} not found for deletion");
        return Err(Error::not_found());
    }

    Ok(())
}

#[cfg(test)]
mod sql_tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn filter_by_term_matches_name_or_title_case_insensitively() {
        let sql = filter_by_term(Entity::find(), Some("ad"))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"WHERE ("users"."name" ILIKE '%ad%') OR ("users"."title" ILIKE '%ad%')"#));
    }

    #[test]
    fn filter_by_term_without_a_term_leaves_the_query_unfiltered() {
        let sql = filter_by_term(Entity::find(), None)
            .build(DbBackend::Postgres)
            .to_string();

        assert!(!sql.contains("WHERE"));
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};
    use std::collections::BTreeMap;

    fn user_model(name: &str, version: i32) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            name: Some(name.to_string()),
            title: Some("Engineer".to_string()),
            version,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn create_returns_the_inserted_user() -> Result<(), Error> {
        let user = user_model("Ada", 1);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();

        let created = create(
            &db,
            NewUser {
                id: Some(user.id),
                name: user.name.clone(),
                title: user.title.clone(),
            },
        )
        .await?;

        assert_eq!(created.id, user.id);
        assert_eq!(created.version, 1);
        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_a_single_record() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let user_id = Id::new_v4();
        let _ = find_by_id(&db, user_id).await;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "users"."id", "users"."name", "users"."title", "users"."version", "users"."created_at", "users"."updated_at" FROM "users" WHERE "users"."id" = $1 LIMIT $2"#,
                [user_id.into(), sea_orm::Value::BigUnsigned(Some(1))]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_not_found_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let result = find_by_id(&db, Id::new_v4()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn find_all_orders_by_created_at_and_paginates() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model("Ada", 1), user_model("Grace", 1)]])
            .into_connection();

        let users = find_all(&db, Pagination::new(10, 2)).await?;
        assert_eq!(users.len(), 2);

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "users"."id", "users"."name", "users"."title", "users"."version", "users"."created_at", "users"."updated_at" FROM "users" ORDER BY "users"."created_at" ASC LIMIT $1 OFFSET $2"#,
                [
                    sea_orm::Value::BigUnsigned(Some(2)),
                    sea_orm::Value::BigUnsigned(Some(10))
                ]
            )]
        );
        Ok(())
    }

    #[tokio::test]
    async fn find_page_reports_the_total_count() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(42)]])
            .append_query_results([vec![user_model("Ada", 1)]])
            .into_connection();

        let page = find_page(&db, Pagination::new(0, 1)).await?;

        assert_eq!(page.total, 42);
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 1);
        assert_eq!(page.items.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn search_counts_before_fetching_the_page() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(1)]])
            .append_query_results([vec![user_model("Ada", 1)]])
            .into_connection();

        let search = Search::parse(Some("ad".to_string()), Some("name"), Order::Asc)?;
        let page = super::search(&db, &search, Pagination::default()).await?;

        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(db.into_transaction_log().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_a_stale_version_without_writing() {
        let stored = user_model("Ada", 3);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .into_connection();

        let result = update(&db, stored.id, 2, UpdateMap::new()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::StaleVersion
        );
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn update_with_the_current_version_bumps_it() -> Result<(), Error> {
        let stored = user_model("Ada", 1);
        let updated = Model {
            name: Some("Ada L.".to_string()),
            version: 2,
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .append_query_results([[updated.clone()]])
            .into_connection();

        let mut update_map = UpdateMap::new();
        update_map.insert("name".to_string(), Some(Value::from("Ada L.")));

        let result = update(&db, stored.id, 1, update_map).await?;

        assert_eq!(result.version, 2);
        assert_eq!(result.name.as_deref(), Some("Ada L."));
        assert_eq!(db.into_transaction_log().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn delete_by_id_returns_not_found_when_nothing_was_deleted() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = delete_by_id(&db, Id::new_v4()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn delete_by_id_deletes_a_user() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let user_id = Id::new_v4();
        delete_by_id(&db, user_id).await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"DELETE FROM "users" WHERE "users"."id" = $1"#,
                [user_id.into()]
            )]
        );

        Ok(())
    }
}
