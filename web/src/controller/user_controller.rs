use crate::extractors::{
    db_conn::DbConn,
    pagination::Paginate,
    validated::{ValidatedJson, ValidatedPath},
};
use crate::params::pagination::PaginationParams;
use crate::{controller::ApiResponse, params::user::*};
use crate::Error;
use axum::{http::StatusCode, response::IntoResponse, Json};
use domain::{user as UserApi, users, Id};
use serde_json::json;

use log::*;

/// GET all Users, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Successfully retrieved Users", body = [users::Model]),
        (status = 422, description = "Invalid pagination parameters"),
        (status = 503, description = "Database not initialized"),
    )
)]
pub async fn index(
    Paginate(pagination): Paginate,
    DbConn(db): DbConn,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Users with {pagination:?}");

    let users = UserApi::find_all(db.as_ref(), pagination).await?;

    debug!("Found {} Users", users.len());

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), users)))
}

/// CREATE a new User
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully created a new User", body = users::Model),
        (status = 422, description = "Invalid request body"),
    )
)]
pub async fn create(
    DbConn(db): DbConn,
    ValidatedJson(params): ValidatedJson<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new User from: {params:?}");
    params.validate()?;

    let user = UserApi::create(db.as_ref(), params.into()).await?;

    debug!("Newly created User {user:?}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED.into(), user)),
    ))
}

/// GET a User by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = sea_orm::prelude::Uuid, Path, description = "User id to retrieve")),
    responses(
        (status = 200, description = "Successfully retrieved a User", body = users::Model),
        (status = 404, description = "User not found"),
    )
)]
pub async fn read(
    ValidatedPath(id): ValidatedPath<Id>,
    DbConn(db): DbConn,
) -> Result<impl IntoResponse, Error> {
    debug!("GET User by id: {id}");

    let user = UserApi::find_by_id(db.as_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user)))
}

/// UPDATE a User, guarded by the version the client last read
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = sea_orm::prelude::Uuid, Path, description = "User id to update")),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated a User", body = users::Model),
        (status = 404, description = "User not found"),
        (status = 409, description = "The User was modified since the given version"),
        (status = 422, description = "Invalid request body"),
    )
)]
pub async fn update(
    ValidatedPath(id): ValidatedPath<Id>,
    DbConn(db): DbConn,
    ValidatedJson(params): ValidatedJson<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("UPDATE User {id} with: {params:?}");
    params.validate()?;

    let expected_version = params.version;
    let user = UserApi::update(db.as_ref(), id, expected_version, params).await?;

    debug!("Updated User {user:?} to version {}", user.version);

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user)))
}

/// DELETE a User by id
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = sea_orm::prelude::Uuid, Path, description = "User id to delete")),
    responses(
        (status = 200, description = "Successfully deleted a User"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete(
    ValidatedPath(id): ValidatedPath<Id>,
    DbConn(db): DbConn,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE User by id: {id}");

    UserApi::delete_by_id(db.as_ref(), id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        json!({"id": id}),
    )))
}
