//! Serves the browser page and its assets from a directory on disk.
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use mime_guess::{mime, MimeGuess};
use tokio::fs;
use warp::http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use warp::http::{Response, StatusCode};
use warp::hyper::Body;

use crate::errors::{ErrorSeverity, IntoErrorResponse};

#[derive(Debug, thiserror::Error)]
pub enum StaticError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("asset io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoErrorResponse for StaticError {
    fn status_code(&self) -> StatusCode {
        match self {
            StaticError::NotFound(_) => StatusCode::NOT_FOUND,
            StaticError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StaticError::NotFound(_) => "static_not_found",
            StaticError::Io(_) => "static_io_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            StaticError::NotFound(_) => ErrorSeverity::Client,
            StaticError::Io(_) => ErrorSeverity::Server,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaticHandler {
    root: Arc<PathBuf>,
}

impl StaticHandler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// The game page.
    pub async fn index(&self) -> Result<warp::reply::Response, StaticError> {
        self.serve_relative("index.html").await
    }

    pub async fn asset(&self, path: &str) -> Result<warp::reply::Response, StaticError> {
        self.serve_relative(path).await
    }

    async fn serve_relative(&self, relative: &str) -> Result<warp::reply::Response, StaticError> {
        let resolved = self.resolve(relative)?;
        let bytes = match fs::read(&resolved).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StaticError::NotFound(relative.to_string()))
            }
            Err(err) => return Err(StaticError::Io(err)),
        };

        let mime = MimeGuess::from_path(&resolved).first_or_octet_stream();
        tracing::debug!(path = relative, mime = %mime, "serving static asset");
        Ok(build_response(bytes, &mime))
    }

    /// Maps a request path under the root, refusing anything that climbs out of it.
    fn resolve(&self, path: &str) -> Result<PathBuf, StaticError> {
        let mut buf = PathBuf::new();
        for comp in Path::new(path).components() {
            match comp {
                Component::Normal(seg) => buf.push(seg),
                Component::CurDir | Component::RootDir => {}
                Component::Prefix(_) | Component::ParentDir => {
                    return Err(StaticError::NotFound(path.to_string()))
                }
            }
        }

        if buf.as_os_str().is_empty() {
            return Err(StaticError::NotFound(path.to_string()));
        }

        Ok(self.root.join(buf))
    }
}

fn build_response(bytes: Vec<u8>, mime: &mime::Mime) -> warp::reply::Response {
    let mut content_type = mime.essence_str().to_string();
    if mime.type_() == mime::TEXT || mime.subtype() == mime::JAVASCRIPT {
        content_type.push_str("; charset=utf-8");
    }

    let mut response = Response::new(Body::from(bytes));
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    // The page script changes with the API; keep browsers from pinning an old copy.
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    *response.status_mut() = StatusCode::OK;
    response
}
