//! Local HTTP stand-in for the upstream APIs.

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use tokio::{net::TcpListener, sync::oneshot};

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    /// Answers every request, whatever its method or path, with `status` and `body`.
    pub async fn start(status: u16, body: &'static str) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        let app = Router::new().fallback(move |uri: Uri| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(uri.to_string());
                (status, body).into_response()
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            base_url,
            requests,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Path and query of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
    }
}
