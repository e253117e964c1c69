use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use word_counter::counter::cache::ResourceCache;
use word_counter::counter::handlers::{routes, DefaultResource};
use word_counter::resources::loader::FsResourceLoader;
use word_counter::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("{}", word_counter::config::USAGE);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Serving resources from {} (default: {}, missing resources: {})",
        config.resource_root.display(),
        config.default_resource,
        config.missing_resource
    );

    // 1. Resource loading + index cache:
    let loader = Arc::new(FsResourceLoader::new(config.resource_root.clone()));
    let cache = ResourceCache::new(loader, config.missing_resource);

    // 2. HTTP Router:
    let app = routes(cache, DefaultResource(config.default_resource.clone()));

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
