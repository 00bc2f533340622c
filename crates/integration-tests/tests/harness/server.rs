//! Test server wrapper that starts Foreman on a random port

use std::net::SocketAddr;

use foreman_config::Config;
use foreman_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let server = Server::new(&config).await?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// POST a raw body and return status plus decoded JSON body
    pub async fn post(&self, path: &str, body: &str) -> anyhow::Result<(u16, serde_json::Value)> {
        let resp = self.client.post(self.url(path)).body(body.to_owned()).send().await?;
        let status = resp.status().as_u16();
        let json = resp.json().await?;
        Ok((status, json))
    }

    /// POST a raw body and return the full response
    pub async fn post_raw(&self, path: &str, body: &str) -> anyhow::Result<reqwest::Response> {
        Ok(self.client.post(self.url(path)).body(body.to_owned()).send().await?)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
