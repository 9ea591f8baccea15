use crate::controller::{
    example_controller, health_check_controller, root_controller, user_controller,
};
use crate::{middleware::error_details, params, AppState, Error};
use axum::{
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Project API"
        ),
        paths(
            root_controller::index,
            health_check_controller::health_check,
            health_check_controller::readiness,
            user_controller::index,
            user_controller::create,
            user_controller::read,
            user_controller::update,
            user_controller::delete,
            example_controller::paginated_users,
            example_controller::search_users,
            example_controller::info,
            example_controller::multi_dependency,
        ),
        components(
            schemas(
                domain::users::Model,
                params::user::CreateParams,
                params::user::UpdateParams,
                params::sort::SortOrder,
            )
        ),
        tags(
            (name = "project_api", description = "Project API")
        )
    )]
struct ApiDoc;

/// The OpenAPI document, versioned like the running application.
pub fn api_doc(app_state: &AppState) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.info.version = app_state.config.app_version.clone();
    openapi.info.description = Some("API Endpoint for Project".to_string());
    openapi
}

pub fn define_routes(app_state: AppState) -> Router {
    let mut router = Router::new()
        .merge(root_routes(app_state.clone()))
        .merge(health_routes())
        .nest(
            "/api/v1",
            Router::new()
                .merge(readiness_routes(app_state.clone()))
                .merge(user_routes(app_state.clone()))
                .merge(example_routes(app_state.clone())),
        );

    // The API docs are not published in production.
    if !app_state.config.is_production() {
        router = router.merge(
            RapiDoc::with_openapi("/api-docs/openapi.json", api_doc(&app_state)).path("/rapidoc"),
        );
    }

    router
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn_with_state(app_state, error_details::render))
}

fn root_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root_controller::index))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn readiness_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_controller::readiness))
        .with_state(app_state)
}

pub fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/users", get(user_controller::index))
        .route("/users", post(user_controller::create))
        .route("/users/{id}", get(user_controller::read))
        .route("/users/{id}", put(user_controller::update))
        .route("/users/{id}", delete(user_controller::delete))
        .with_state(app_state)
}

fn example_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/examples/users/paginated",
            get(example_controller::paginated_users),
        )
        .route(
            "/examples/users/search",
            get(example_controller::search_users),
        )
        .route("/examples/info", get(example_controller::info))
        .route(
            "/examples/multi-dependency",
            get(example_controller::multi_dependency),
        )
        .with_state(app_state)
}

async fn not_found() -> Error {
    Error::NotFound("Not Found".to_string())
}

async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed("Method Not Allowed".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    Error::internal("An unexpected error occurred", json!({ "panic": details })).into_response()
}
