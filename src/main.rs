use clap::Parser;
use distributed_cache::config::NodeConfig;
use distributed_cache::group::handlers::api_router;
use distributed_cache::peers::handlers::peer_router;
use distributed_cache::peers::pool::HttpPool;
use distributed_cache::{Group, GroupRegistry, GetterFn};
use std::collections::HashMap;
use std::sync::Arc;

const GROUP_NAME: &str = "scores";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let self_url = config.self_url();
    let peers = config.peer_urls();
    tracing::info!("Starting cache node {}", self_url);
    tracing::info!("Peers: {:?}", peers);

    // 1. Groups:
    let registry = GroupRegistry::new();
    let group = create_group(&registry, config.cache_bytes);

    // 2. Peer picker:
    let pool = HttpPool::with_options(&self_url, config.replicas, config.peer_timeout());
    pool.set(&peers);
    group.register_peers(pool.clone());

    // 3. Optional front-end API server:
    if config.api {
        let api_addr = config.api_addr;
        let api_app = api_router(group.clone());
        tokio::spawn(async move {
            tracing::info!("API server listening on {}", api_addr);
            match tokio::net::TcpListener::bind(api_addr).await {
                Ok(listener) => {
                    if let Err(e) = axum::serve(listener, api_app).await {
                        tracing::error!("API server failed: {}", e);
                    }
                }
                Err(e) => tracing::error!("Failed to bind API server on {}: {}", api_addr, e),
            }
        });
    }

    // 4. Stats reporter:
    if let Some(period) = config.stats_interval() {
        let stats_group = group.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let stats = stats_group.stats();
                tracing::info!(
                    "Group '{}' stats: gets={} hits={} peer_loads={} peer_errors={} local_loads={} local_load_errs={} entries={} bytes={} evictions={}",
                    stats_group.name(),
                    stats.gets,
                    stats.cache_hits,
                    stats.peer_loads,
                    stats.peer_errors,
                    stats.local_loads,
                    stats.local_load_errs,
                    stats.cache.entries,
                    stats.cache.bytes,
                    stats.cache.evictions
                );
            }
        });
    }

    // 5. Peer server:
    let bind_addr = config.bind_addr()?;
    let app = peer_router(registry);

    tracing::info!("Cache server listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Demo group backed by an in-memory "slow database".
fn create_group(registry: &GroupRegistry, cache_bytes: usize) -> Arc<Group> {
    let db: Arc<HashMap<&'static str, &'static str>> =
        Arc::new(HashMap::from([("tom", "630"), ("jack", "589"), ("sam", "567")]));

    registry.new_group(
        GROUP_NAME,
        cache_bytes,
        GetterFn::new(move |key: String| {
            let db = db.clone();
            async move {
                tracing::info!("[SlowDB] search key {}", key);
                match db.get(key.as_str()) {
                    Some(value) => Ok(value.as_bytes().to_vec()),
                    None => Err(anyhow::anyhow!("{} not exist", key)),
                }
            }
        }),
    )
}
