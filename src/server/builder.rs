//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{AclError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| AclError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build and run the server until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting pipeline ACL service v{}", crate::VERSION);

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!(
        "Server starting at: http://{}",
        server.config().address()
    );
    info!("API Endpoints:");
    info!("   GET    /health");
    info!("   GET    /v1/acl/{{pipelineName}}");
    info!("   POST   /v1/acl/{{pipelineName}}");
    info!("   GET    /v1/acl/{{pipelineName}}/permissions");
    info!("   GET    /v1/pipelines");
    info!("   POST   /v1/pipelines");
    info!("   GET    /v1/pipelines/{{name}}");
    info!("   DELETE /v1/pipelines/{{name}}");

    server.start().await
}
