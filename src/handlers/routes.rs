// API route handlers
//
// This module implements the static page and the transcription endpoint. The
// endpoint walks a linear pipeline: validate the URL, stage a scratch
// workspace, download the audio, locate the artifact, transcribe it. Every
// failure is mapped to a JSON error body; the HTTP status stays 200 on all
// branches so clients only inspect the body.

use actix_web::{get, post, web, HttpResponse};
use log::{error, info, warn};

use crate::config::HandlerConfig;
use crate::downloader::AudioDownloader;
use crate::error::HandlerError;
use crate::file_utils::{create_workspace, find_audio_file};
use crate::models::{ErrorResponse, TranscribeRequest, TranscriptionResponse};
use crate::transcriber::{SpeechToText, Transcription};

/// Static page served at the root path
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Serve the transcription form
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Handler for transcription requests
///
/// Receives a video URL, downloads its audio track into a per-request scratch
/// workspace, transcribes it and responds with transcript, detected language
/// and duration.
#[post("/transcribe")]
pub async fn transcribe(
    request: web::Json<TranscribeRequest>,
    downloader: web::Data<dyn AudioDownloader>,
    engine: web::Data<dyn SpeechToText>,
    config: web::Data<HandlerConfig>,
) -> HttpResponse {
    let url = request.url.trim().to_string();

    match run_pipeline(&url, downloader, engine, &config).await {
        Ok(transcription) => {
            info!(
                "Transcription finished: language {}, {} segments",
                transcription.language,
                transcription.segments.len()
            );
            HttpResponse::Ok().json(TranscriptionResponse::from(transcription))
        }
        Err(e) => {
            error!("Transcription request failed: {}", e);
            HttpResponse::Ok().json(ErrorResponse::from(&e))
        }
    }
}

/// Run the download/locate/transcribe pipeline for one request
///
/// The scratch workspace is released on every exit path, which removes the
/// directory and everything staged inside it.
async fn run_pipeline(
    url: &str,
    downloader: web::Data<dyn AudioDownloader>,
    engine: web::Data<dyn SpeechToText>,
    config: &HandlerConfig,
) -> Result<Transcription, HandlerError> {
    if url.is_empty() {
        return Err(HandlerError::EmptyUrl);
    }

    let workspace = create_workspace(&config.temp_dir)?;
    let result = transcribe_into(workspace.path(), url, downloader, engine).await;

    if let Err(e) = workspace.close() {
        warn!("Failed to remove scratch workspace: {}", e);
    }

    result
}

/// Download into the workspace, locate the artifact and transcribe it
async fn transcribe_into(
    workspace: &std::path::Path,
    url: &str,
    downloader: web::Data<dyn AudioDownloader>,
    engine: web::Data<dyn SpeechToText>,
) -> Result<Transcription, HandlerError> {
    downloader.fetch_audio(url, workspace).await?;

    let audio_file = find_audio_file(workspace)?.ok_or(HandlerError::AudioFileNotFound)?;

    // Inference is CPU-bound; run it on the blocking pool so server workers
    // stay free to accept requests.
    web::block(move || engine.transcribe_file(&audio_file))
        .await
        .map_err(|e| HandlerError::Internal(e.to_string()))?
        .map_err(HandlerError::from)
}
