use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use fitclub_ai::after_image::HttpAfterImageClient;
use fitclub_ai::client::HttpVisionClient;
use fitclub_ai::config::AiConfig;
use fitclub_ai::pipeline::RecommendationPipeline;
use fitclub_ai::store::PgRecommendationStore;
use fitclub_api::config::ApiConfig;
use fitclub_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    let ai_config = AiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Assemble the recommendation pipeline; without an API key it runs in
    // fallback-only mode
    let client = HttpVisionClient::from_config(&ai_config)?;
    let store = PgRecommendationStore::new(db_pool.clone());
    let mut pipeline = RecommendationPipeline::new(client, store, &ai_config);

    // Optional after-image vendor; photo requests get a generated preview
    // when a key is configured
    if let Ok(api_key) = std::env::var("AFTER_IMAGE_API_KEY") {
        let base_url = std::env::var("AFTER_IMAGE_API_BASE_URL")
            .unwrap_or_else(|_| ai_config.base_url.clone());
        let model =
            std::env::var("AFTER_IMAGE_MODEL").unwrap_or_else(|_| "gpt-image-1".to_string());
        pipeline =
            pipeline.with_after_image(Arc::new(HttpAfterImageClient::new(base_url, api_key, model)));
    }

    // Start API server
    fitclub_api::start_server(config, db_pool, pipeline).await?;

    Ok(())
}
