use serde::Serialize;
use warp::reply::Json;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

/// Liveness probe: `GET /health` → `{"status":"ok"}`.
pub fn health() -> Json {
    warp::reply::json(&HealthBody { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::Reply;

    #[tokio::test]
    async fn reports_ok() {
        let response = health().into_response();
        assert_eq!(response.status(), warp::http::StatusCode::OK);
        let body = warp::hyper::body::to_bytes(response.into_body())
            .await
            .expect("body");
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }
}
