//! Binary entrypoint: wire configuration, adapters, and services, then serve.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use seva_guide::adapters::embedding::{GeminiConfig, GeminiEmbedding};
use seva_guide::adapters::http::{api_routes, AppState};
use seva_guide::adapters::index::FileVectorIndex;
use seva_guide::adapters::session::InMemorySessionStore;
use seva_guide::application::{NavigationService, RetrievalEngine};
use seva_guide::config::AppConfig;
use seva_guide::domain::knowledge::KnowledgeBase;
use seva_guide::ports::EmbeddingProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate()?;

    let knowledge = Arc::new(KnowledgeBase::load(&config.knowledge.path)?);
    info!(
        entries = knowledge.len(),
        services = knowledge.services().len(),
        path = %config.knowledge.path,
        "knowledge base loaded"
    );

    let provider = build_provider(&config)?;
    let index = Arc::new(FileVectorIndex::new(&config.index.data_dir));

    let retrieval = Arc::new(RetrievalEngine::new(
        provider,
        index,
        config.index.collection.clone(),
    ));
    retrieval.initialize(&knowledge).await?;

    let sessions = Arc::new(InMemorySessionStore::new());
    let navigation = Arc::new(NavigationService::new(Arc::clone(&knowledge), sessions));

    let state = AppState {
        navigation,
        retrieval,
        knowledge,
    };
    let app = api_routes(state);

    let addr = config.server.socket_addr()?;
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_provider(config: &AppConfig) -> Result<Arc<dyn EmbeddingProvider>, Box<dyn Error>> {
    let api_key = config
        .embedding
        .gemini_api_key
        .clone()
        .ok_or("GEMINI_API_KEY is required")?;

    let gemini = GeminiConfig::new(api_key)
        .with_model(&config.embedding.model)
        .with_timeout(Duration::from_secs(config.embedding.timeout_secs));
    Ok(Arc::new(GeminiEmbedding::new(gemini)?))
}
