use crate::errors::IntoErrorResponse;
use crate::handlers;
use crate::middleware::with_request_logging;
use crate::session::{GameId, SessionManager};
use crate::static_handler::StaticHandler;
use std::convert::Infallible;
use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::hyper::body::Bytes;
use warp::reply::{Reply, Response};
use warp::Filter;

/// How often idle games are swept from the session map.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    static_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            static_dir: static_dir.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

/// Shared state handed to every route.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    sessions: Arc<SessionManager>,
    static_handler: Arc<StaticHandler>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        if !config.static_dir().exists() {
            fs::create_dir_all(config.static_dir())
                .map_err(|err| ServerError::Config(err.to_string()))?;
        }

        let sessions = Arc::new(SessionManager::new());
        let static_handler = Arc::new(StaticHandler::new(config.static_dir()));
        Ok(Self::with_sessions(config, sessions, static_handler))
    }

    pub fn with_sessions(
        config: ServerConfig,
        sessions: Arc<SessionManager>,
        static_handler: Arc<StaticHandler>,
    ) -> Self {
        Self {
            config,
            sessions,
            static_handler,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.sessions)
    }

    pub fn static_handler(&self) -> Arc<StaticHandler> {
        Arc::clone(&self.static_handler)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Every route the server answers, wrapped in request logging.
pub fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
    let health = warp::path("health")
        .and(warp::get())
        .and(warp::path::end())
        .map(|| handlers::health().into_response());

    let all = health
        .or(static_routes(context))
        .unify()
        .or(game_routes(context))
        .unify();

    with_request_logging(all).boxed()
}

fn static_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
    let handler = context.static_handler();

    let index = warp::path::end()
        .and(warp::get())
        .and(with_static_handler(Arc::clone(&handler)))
        .and_then(|handler: Arc<StaticHandler>| async move {
            let response = handler
                .index()
                .await
                .unwrap_or_else(IntoErrorResponse::into_http_response);
            Ok::<_, Infallible>(response)
        });

    let assets = warp::path("static")
        .and(warp::path::tail())
        .and(warp::get())
        .and(with_static_handler(handler))
        .and_then(
            |tail: warp::path::Tail, handler: Arc<StaticHandler>| async move {
                let response = handler
                    .asset(tail.as_str())
                    .await
                    .unwrap_or_else(IntoErrorResponse::into_http_response);
                Ok::<_, Infallible>(response)
            },
        );

    index.or(assets).unify().boxed()
}

fn game_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
    let sessions = context.sessions();

    let create = warp::path!("api" / "games")
        .and(warp::post())
        .and(with_sessions(Arc::clone(&sessions)))
        .and(warp::body::bytes())
        .and_then(|sessions: Arc<SessionManager>, body: Bytes| async move {
            Ok::<_, Infallible>(handlers::create_game(sessions, body).await)
        });

    let show = warp::path!("api" / "games" / GameId)
        .and(warp::get())
        .and(with_sessions(Arc::clone(&sessions)))
        .and_then(|game_id: GameId, sessions: Arc<SessionManager>| async move {
            Ok::<_, Infallible>(handlers::get_game(sessions, game_id).await)
        });

    let rounds = warp::path!("api" / "games" / GameId / "rounds")
        .and(warp::post())
        .and(with_sessions(Arc::clone(&sessions)))
        .and(warp::body::bytes())
        .and_then(
            |game_id: GameId, sessions: Arc<SessionManager>, body: Bytes| async move {
                Ok::<_, Infallible>(handlers::play_round(sessions, game_id, body).await)
            },
        );

    let reset = warp::path!("api" / "games" / GameId / "reset")
        .and(warp::post())
        .and(with_sessions(Arc::clone(&sessions)))
        .and_then(|game_id: GameId, sessions: Arc<SessionManager>| async move {
            Ok::<_, Infallible>(handlers::reset_game(sessions, game_id).await)
        });

    let delete = warp::path!("api" / "games" / GameId)
        .and(warp::delete())
        .and(with_sessions(sessions))
        .and_then(|game_id: GameId, sessions: Arc<SessionManager>| async move {
            Ok::<_, Infallible>(handlers::delete_game(sessions, game_id).await)
        });

    create
        .or(rounds)
        .unify()
        .or(reset)
        .unify()
        .or(show)
        .unify()
        .or(delete)
        .unify()
        .boxed()
}

fn with_static_handler(
    handler: Arc<StaticHandler>,
) -> impl Filter<Extract = (Arc<StaticHandler>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&handler))
}

fn with_sessions(
    sessions: Arc<SessionManager>,
) -> impl Filter<Extract = (Arc<SessionManager>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&sessions))
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let context = AppContext::new(config)?;
        Ok(Self { context })
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Binds the listener, then serves until the returned handle is shut down or dropped.
    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = bind_addr(context.config())?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes(&context))
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(map_warp_error)?;

        tracing::info!(
            %addr,
            static_dir = %context.config().static_dir().display(),
            "web server listening"
        );

        let task = tokio::spawn(server_future);
        let cleanup = tokio::spawn(sweep_expired_games(context.sessions()));

        Ok(ServerHandle {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
            cleanup: Some(cleanup),
            context,
        })
    }
}

async fn sweep_expired_games(sessions: Arc<SessionManager>) {
    let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
    loop {
        ticker.tick().await;
        let removed = sessions.cleanup_expired_games();
        if removed > 0 {
            tracing::debug!(
                removed,
                remaining = sessions.active_games().len(),
                "swept idle games"
            );
        }
    }
}

fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
    let host = config.host();

    if let Ok(addr) = host.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = host.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, config.port()));
    }

    let candidate = format!("{}:{}", host, config.port());
    let mut addrs = candidate.to_socket_addrs().map_err(|err| {
        ServerError::Config(format!("failed to resolve address `{candidate}`: {err}"))
    })?;

    addrs
        .next()
        .ok_or_else(|| ServerError::Config(format!("failed to resolve address `{candidate}`")))
}

fn map_warp_error(err: warp::Error) -> ServerError {
    use std::error::Error as StdError;

    if let Some(io_err) = err
        .source()
        .and_then(|source| source.downcast_ref::<std::io::Error>())
    {
        return ServerError::Bind(std::io::Error::new(io_err.kind(), io_err.to_string()));
    }

    ServerError::Config(err.to_string())
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    cleanup: Option<JoinHandle<()>>,
    context: AppContext,
}

impl ServerHandle {
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Stops accepting connections and waits for in-flight requests to finish.
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup.abort();
        }
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|err| ServerError::Config(format!("server task join error: {err}")))?;
        }
        tracing::info!(addr = %self.addr, "web server stopped");
        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup.abort();
        }
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
