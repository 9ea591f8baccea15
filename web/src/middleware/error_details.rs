use crate::error::ErrorReport;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use log::*;

/// Logs every error response with the request method and path, and re-renders the
/// error envelope with its technical `details` unless running in production.
///
/// Intended to be given to axum::middleware::from_fn_with_state in the router, outside
/// of the panic catcher so that panics are reported the same way.
pub(crate) async fn render(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    if report.status.is_server_error() {
        error!(
            "{method} {path} -> {} {:?}: {} {:?}",
            report.status.as_u16(),
            report.body.kind,
            report.body.message,
            report.body.details
        );
    } else {
        warn!(
            "{method} {path} -> {} {:?}: {}",
            report.status.as_u16(),
            report.body.kind,
            report.body.message
        );
    }

    if app_state.config.is_production() {
        response
    } else {
        report.render(true)
    }
}
