//! Endpoints demonstrating how handlers combine injected dependencies: the
//! database pool, validated query parameters and the application settings.

use crate::extractors::{
    db_conn::DbConn, pagination::Paginate, settings::Settings, validated::ValidatedQuery,
};
use crate::params::{pagination::PaginationParams, search::SearchParams};
use crate::Error;
use axum::{response::IntoResponse, Json};
use domain::{user as UserApi, users};
use serde_json::json;

use log::*;

/// GET a page of Users, newest first, with the total number of Users
#[utoipa::path(
    get,
    path = "/api/v1/examples/users/paginated",
    params(PaginationParams),
    responses(
        (status = 200, description = "A page of Users with the total count"),
        (status = 422, description = "Invalid pagination parameters"),
    )
)]
pub async fn paginated_users(
    Paginate(pagination): Paginate,
    DbConn(db): DbConn,
) -> Result<impl IntoResponse, Error> {
    let page = UserApi::find_page(db.as_ref(), pagination).await?;

    Ok(Json(json!({
        "total": page.total,
        "skip": page.skip,
        "limit": page.limit,
        "users": page.items,
    })))
}

/// GET Users matching a free-text query, sorted and paginated
#[utoipa::path(
    get,
    path = "/api/v1/examples/users/search",
    params(SearchParams, PaginationParams),
    responses(
        (status = 200, description = "Matching Users; total counts every match"),
        (status = 400, description = "Invalid sort_by field"),
        (status = 422, description = "Invalid query parameters"),
    )
)]
pub async fn search_users(
    ValidatedQuery(search): ValidatedQuery<SearchParams>,
    Paginate(pagination): Paginate,
    DbConn(db): DbConn,
) -> Result<impl IntoResponse, Error> {
    debug!("SEARCH Users with {search:?} and {pagination:?}");

    let page = UserApi::search(
        db.as_ref(),
        search.q.clone(),
        search.sort_by.as_deref(),
        search.order.into(),
        pagination,
    )
    .await?;

    let users: Vec<users::Model> = page.items;

    Ok(Json(json!({
        "total": page.total,
        "skip": page.skip,
        "limit": page.limit,
        "query": search.q,
        "sort_by": search.sort_by,
        "order": search.order,
        "users": users,
    })))
}

/// GET application metadata taken from the settings
#[utoipa::path(
    get,
    path = "/api/v1/examples/info",
    responses(
        (status = 200, description = "Application name, version and environment"),
    )
)]
pub async fn info(Settings(config): Settings) -> impl IntoResponse {
    Json(json!({
        "app": "Project API",
        "version": config.app_version,
        "environment": config.environment(),
        "debug_mode": config.debug,
        "database_provider": config.postgres_provider,
    }))
}

/// GET a response built from the database, the settings and the pagination at once
#[utoipa::path(
    get,
    path = "/api/v1/examples/multi-dependency",
    params(PaginationParams),
    responses(
        (status = 200, description = "Values drawn from every injected dependency"),
    )
)]
pub async fn multi_dependency(
    Settings(config): Settings,
    Paginate(pagination): Paginate,
    DbConn(db): DbConn,
) -> Result<impl IntoResponse, Error> {
    let total_users = UserApi::count(db.as_ref()).await?;

    Ok(Json(json!({
        "environment": {
            "environment": config.environment(),
            "version": config.app_version,
        },
        "pagination": {
            "skip": pagination.skip,
            "limit": pagination.limit,
        },
        "total_users": total_users,
        "message": "This endpoint demonstrates multiple dependencies",
    })))
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use crate::router::define_routes;
    use crate::test_support::{app_state, body_json, get_request};
    use axum::http::StatusCode;
    use domain::{users, Id};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use serde_json::json;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn user_model(name: &str) -> users::Model {
        let now = chrono::Utc::now();
        users::Model {
            id: Id::new_v4(),
            name: Some(name.to_string()),
            title: None,
            version: 1,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn paginated_users_reports_total_and_window() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(3)]])
            .append_query_results([vec![user_model("Ada"), user_model("Grace")]])
            .into_connection();
        let app = define_routes(app_state(db, "development"));

        let response = app
            .oneshot(get_request("/api/v1/examples/users/paginated?skip=1&limit=2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["skip"], 1);
        assert_eq!(body["limit"], 2);
        assert_eq!(body["users"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn search_users_echoes_the_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(1)]])
            .append_query_results([vec![user_model("Ada")]])
            .into_connection();
        let app = define_routes(app_state(db, "development"));

        let response = app
            .oneshot(get_request(
                "/api/v1/examples/users/search?q=ad&sort_by=name&order=desc",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["query"], "ad");
        assert_eq!(body["sort_by"], "name");
        assert_eq!(body["order"], "desc");
        assert_eq!(body["skip"], 0);
        assert_eq!(body["limit"], 20);
    }

    #[tokio::test]
    async fn search_users_rejects_unknown_sort_columns() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = define_routes(app_state(db, "development"));

        let response = app
            .oneshot(get_request("/api/v1/examples/users/search?sort_by=password"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "bad_request");
        assert_eq!(body["error"]["message"], "Invalid sort_by field: password");
    }

    #[tokio::test]
    async fn multi_dependency_combines_every_dependency() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(7)]])
            .into_connection();
        let app = define_routes(app_state(db, "test"));

        let response = app
            .oneshot(get_request("/api/v1/examples/multi-dependency?limit=5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "environment": {"environment": "test", "version": "0.0.0-test"},
                "pagination": {"skip": 0, "limit": 5},
                "total_users": 7,
                "message": "This endpoint demonstrates multiple dependencies"
            })
        );
    }
}
