use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

// Import our modules
mod config;
mod config_loader;
mod downloader;
mod error;
mod file_utils;
mod handlers;
mod models;
mod transcriber;

// Import the types we need
use config::{HandlerConfig, ServerConfig};
use downloader::{AudioDownloader, DownloaderConfig, YtDlpDownloader};
use handlers::{index, transcribe};
use transcriber::{EngineConfig, SpeechToText, WhisperEngine};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Seed environment from the optional configuration file
    config_loader::load_config();

    // Load configurations
    let server_config = ServerConfig::default();
    let handler_config = HandlerConfig::default();
    let engine_config = EngineConfig::default();
    let downloader_config = DownloaderConfig::default();

    // Create the workspace base directory if it doesn't exist
    if let Err(e) = handler_config.ensure_temp_dir() {
        warn!(
            "Failed to create temp directory {}: {}",
            handler_config.temp_dir, e
        );
    }

    // Load the model once before serving traffic; every request reuses it
    let engine = WhisperEngine::load(&engine_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let engine: web::Data<dyn SpeechToText> =
        web::Data::from(Arc::new(engine) as Arc<dyn SpeechToText>);
    let downloader: web::Data<dyn AudioDownloader> =
        web::Data::from(Arc::new(YtDlpDownloader::new(downloader_config)) as Arc<dyn AudioDownloader>);

    info!(
        "Starting video transcriber on http://{}:{}",
        server_config.host, server_config.port
    );
    info!("Using temp directory: {}", handler_config.temp_dir);
    info!("Whisper model: {}", engine_config.model_path);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(engine.clone())
            .app_data(downloader.clone())
            .app_data(web::Data::new(handler_config.clone()))
            .service(index)
            .service(transcribe)
    })
    .bind(server_config.bind_addr())?
    .run()
    .await
}
