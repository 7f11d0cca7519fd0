//! A local HTTP server that stands in for a remote JSON source.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Router;
use tokio::task::JoinHandle;

/// What the simulated source answers on one path.
#[derive(Debug, Clone)]
pub struct SimulatedResponse {
    pub status: u16,
    pub body: String,
}

impl SimulatedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        SimulatedResponse {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        SimulatedResponse {
            status,
            body: String::new(),
        }
    }
}

type Routes = Arc<HashMap<String, SimulatedResponse>>;

/// Serves fixed responses until dropped. Unknown paths answer 404.
pub struct SimulatedSource {
    address: SocketAddr,
    server: JoinHandle<()>,
}

impl SimulatedSource {
    pub async fn start<I, P>(routes: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (P, SimulatedResponse)>,
        P: Into<String>,
    {
        let routes: Routes = Arc::new(
            routes
                .into_iter()
                .map(|(path, response)| (path.into(), response))
                .collect(),
        );
        let app = Router::new().fallback(respond).with_state(routes);

        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let address = listener.local_addr()?;
        let server = axum::Server::from_tcp(listener)?.serve(app.into_make_service());

        let server = tokio::spawn(async move {
            if let Err(error) = server.await {
                eprintln!("simulated source stopped: {error}");
            }
        });

        Ok(SimulatedSource { address, server })
    }

    /// The absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }
}

impl Drop for SimulatedSource {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn respond(State(routes): State<Routes>, uri: Uri) -> (StatusCode, String) {
    match routes.get(uri.path()) {
        Some(response) => (
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            response.body.clone(),
        ),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
