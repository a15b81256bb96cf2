use std::sync::Arc;

use docstore::service::http;
use docstore::{init_logging, DocumentService, InMemoryDocumentStore, ListLimits, ServiceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    init_logging(&config.log_filter)?;

    let service = Arc::new(DocumentService::with_limits(
        InMemoryDocumentStore::new(),
        ListLimits::from(&config),
    ));

    http::serve_with_shutdown(service, &config.collection, &config.bind_addr(), async {
        let _ = tokio::signal::ctrl_c().await;
        info!(target: "docstore::http", "shutdown requested");
    })
    .await?;

    Ok(())
}
