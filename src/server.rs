//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. stops accepting new connections,
//! 2. lets every in-flight connection run to completion,
//! 3. returns from [`Server::serve`], letting `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

enum Bind {
    Addr(SocketAddr),
    Listener(std::net::TcpListener),
}

/// Request bodies larger than this are answered with 413 unless
/// [`Server::max_body_bytes`] says otherwise.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The HTTP server.
pub struct Server {
    bind: Bind,
    max_body_bytes: usize,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use chirpy::Server;
    /// let server = Server::bind(([0, 0, 0, 0], 8080));
    /// ```
    pub fn bind(addr: impl Into<SocketAddr>) -> Self {
        Self { bind: Bind::Addr(addr.into()), max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }

    /// Serves on an already-bound listener, e.g. one bound to port 0.
    pub fn from_listener(listener: std::net::TcpListener) -> Self {
        Self { bind: Bind::Listener(listener), max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }

    /// Caps how many body bytes are buffered per request.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Accepts connections and dispatches them through `router` until
    /// SIGTERM or Ctrl-C, then drains in-flight connections.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops accepting when `signal` resolves.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let listener = match self.bind {
            Bind::Addr(addr) => TcpListener::bind(addr).await?,
            Bind::Listener(std_listener) => {
                std_listener.set_nonblocking(true)?;
                TcpListener::from_std(std_listener)?
            }
        };
        let addr = listener.local_addr()?;
        let router = Arc::new(router);
        let limit = self.max_body_bytes;

        info!(%addr, "chirpy listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting immediately.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, limit, req).await }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the set does not grow unbounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("chirpy stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Collects the body, routes, and converts the response. Every failure
/// becomes a status code, so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    limit: usize,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let path = req.uri().path().to_owned();
    let wire_method = req.method().clone();

    let response = match Method::try_from(&wire_method) {
        Ok(method) => match into_request(method, path.clone(), limit, req).await {
            Ok(request) => router.route(request).await,
            Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
                warn!(%path, limit, "request body too large");
                Response::status(Status::ContentTooLarge)
            }
            Err(e) => {
                warn!(%path, "failed to read request body: {e}");
                Response::status(Status::BadRequest)
            }
        },
        Err(()) => Response::status(Status::MethodNotAllowed),
    };

    debug!(
        method = %wire_method,
        %path,
        status = response.status_code(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request",
    );
    Ok(response.into_inner())
}

async fn into_request(
    method: Method,
    path: String,
    limit: usize,
    req: hyper::Request<Incoming>,
) -> Result<Request, BoxError> {
    let (parts, body) = req.into_parts();
    let headers = parts.headers.iter()
        .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
        .collect();
    let body = Limited::new(body, limit).collect().await?.to_bytes().to_vec();
    Ok(Request::new(method, path, headers, body))
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT. If a handler cannot be
/// installed that arm never fires and the error is logged.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
