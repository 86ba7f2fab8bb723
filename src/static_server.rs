//! Serves a directory as static content. Everything under the root except dotfiles is exposed to
//! anyone who can reach the port.

use std::{
    future::Future,
    net::{Ipv4Addr, SocketAddr, TcpListener},
    path::{Path, PathBuf},
};

use axum::{
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use http::{Method, Request, StatusCode};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{Parser, Result, WrapErr};

#[derive(Debug, Clone, Parser)]
pub struct StaticServerConfig {
    #[clap(long = "static-port", env = "STATIC_PORT", default_value = "8000")]
    pub port: u16,

    #[clap(long = "static-root", env = "STATIC_ROOT", default_value = ".")]
    pub root: PathBuf,
}

impl StaticServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

pub fn router(root: impl AsRef<Path>) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(middleware::from_fn(hide_unservable))
        .layer(TraceLayer::new_for_http())
}

/// Answers 404 for anything other than a plain read of a visible file: dotfiles and dot
/// directories (`.env`, `.git/`) stay hidden, and non-read methods fall through to not found.
async fn hide_unservable<B>(request: Request<B>, next: Next<B>) -> Response {
    let readable = matches!(*request.method(), Method::GET | Method::HEAD);

    if !readable || is_hidden(request.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    next.run(request).await
}

fn is_hidden(path: &str) -> bool {
    path.split('/').any(|segment| {
        segment.starts_with('.')
            || segment
                .get(..3)
                .map_or(false, |prefix| prefix.eq_ignore_ascii_case("%2e"))
    })
}

/// Serves `root` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, root: impl AsRef<Path>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let root = root.as_ref();
    let server = axum::Server::from_tcp(listener)
        .wrap_err("Failed to listen for static file requests")?
        .serve(router(root).into_make_service());

    let port = server.local_addr().port();
    tracing::info!(root = %root.display(), "Server running at http://localhost:{port}");

    server
        .with_graceful_shutdown(shutdown)
        .await
        .wrap_err("Static server failed")
}
