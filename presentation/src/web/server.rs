//! HTTP server

use crate::web::routes::{chat_router, unavailable_router};
use crate::web::state::{ChatState, UiSessionStore};
use axum::Router;
use parley_application::EnsureSessionUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// How long a page may stay silent before its session is dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// The web UI, ready to be served.
pub struct ChatServer {
    router: Router,
    /// `None` when only the error page is served
    sessions: Option<Arc<UiSessionStore>>,
}

impl ChatServer {
    /// Full chat UI.
    pub fn new(ensure: EnsureSessionUseCase) -> Self {
        let state = ChatState::new(ensure);
        Self {
            sessions: Some(Arc::clone(&state.sessions)),
            router: chat_router(state),
        }
    }

    /// Blocking error page only; no chat is offered.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            router: unavailable_router(message),
            sessions: None,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind `addr` and serve until Ctrl-C.
    pub async fn serve(self, addr: &str) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local = listener.local_addr()?;

        let chat_ready = self.sessions.is_some();
        match self.sessions {
            Some(sessions) => {
                tokio::spawn(sweep_idle_sessions(sessions, SESSION_IDLE_TIMEOUT));
                info!("Chat UI listening on http://{}", local);
            }
            None => {
                info!("Serving the error page on http://{}", local);
            }
        }
        // Printed regardless of the log filter
        println!("{}", banner(local, chat_ready));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

fn banner(local: SocketAddr, chat_ready: bool) -> String {
    if chat_ready {
        format!("Open http://{local} to chat")
    } else {
        format!("Open http://{local} for details")
    }
}

async fn sweep_idle_sessions(sessions: Arc<UiSessionStore>, idle: Duration) {
    let mut ticks = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        ticks.tick().await;
        let dropped = sessions.sweep(idle).await;
        if dropped > 0 {
            debug!("{} UI sessions left after sweep", sessions.len().await);
        }
    }
}

async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

async fn shutdown_on(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            // Without a signal handler the server runs until killed
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
