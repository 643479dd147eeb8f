use std::time::Instant;
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reject::Rejection;
use warp::reply::{Reply, Response};
use warp::Filter;

/// Wraps a route filter so every request is logged on arrival and on completion.
///
/// The completion event carries the response status and duration; its level
/// follows the status class.
pub fn with_request_logging<F, T>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (T,), Error = Rejection> + Clone + Send + Sync + 'static,
    T: Reply,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: FullPath, method: Method| {
            tracing::debug!(path = %path.as_str(), method = %method, "incoming request");
            (path, method, Instant::now())
        })
        .and(filter)
        .map(|(path, method, start): (FullPath, Method, Instant), reply: T| {
            let response = reply.into_response();
            log_completion(
                response.status(),
                path.as_str(),
                &method,
                start.elapsed().as_millis(),
            );
            response
        })
}

fn log_completion(status: StatusCode, path: &str, method: &Method, duration_ms: u128) {
    let status_code = status.as_u16();
    if status.is_server_error() {
        tracing::error!(status = status_code, path, method = %method, duration_ms, "request completed");
    } else if status.is_client_error() {
        tracing::warn!(status = status_code, path, method = %method, duration_ms, "request completed");
    } else {
        tracing::info!(status = status_code, path, method = %method, duration_ms, "request completed");
    }
}
