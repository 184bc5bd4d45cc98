use sketchgen::{
    logger::{self, LoggerConfig},
    Config,
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();

    let logger_config = if config.json_logs {
        LoggerConfig::production()
    } else {
        LoggerConfig::development()
    };
    logger::init_with_config(logger_config)?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    sketchgen::server::run(config).await?;
    Ok(())
}
