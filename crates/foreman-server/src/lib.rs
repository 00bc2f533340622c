mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use foreman_config::Config;
use foreman_llm::{GenerationState, Provider};
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration, backed by Bedrock
    ///
    /// # Errors
    ///
    /// Returns an error if the Bedrock client cannot be configured
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let state = GenerationState::from_config(&config.bedrock).await?;

        tracing::info!(
            region = %config.bedrock.region,
            model_id = %config.bedrock.model_id,
            "bedrock provider ready"
        );

        Ok(Self::with_state(config, state))
    }

    /// Build the server around an existing provider
    pub fn with_provider(config: &Config, provider: Arc<dyn Provider>) -> Self {
        Self::with_state(config, GenerationState::new(provider))
    }

    fn with_state(config: &Config, state: GenerationState) -> Self {
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Generation routes
        app = app.merge(foreman_llm::generation_router(state));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address: config.server.listen_address(),
        }
    }

    /// Override the listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
