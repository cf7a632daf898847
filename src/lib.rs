// Video Transcriber Library
//
// This crate provides a small web service that downloads the audio track of a
// video URL with yt-dlp and transcribes it with a whisper model loaded once
// at startup.

pub mod config;
pub mod config_loader;
pub mod downloader;
pub mod error;
pub mod file_utils;
pub mod handlers;
pub mod models;
pub mod transcriber;

// Re-export common types for easier access
pub use config::{HandlerConfig, ServerConfig};
pub use downloader::{AudioDownloader, DownloadError, DownloaderConfig, YtDlpDownloader};
pub use error::HandlerError;
pub use handlers::{index, transcribe};
pub use models::{ErrorResponse, TranscribeRequest, TranscriptionResponse};
pub use transcriber::{
    EngineConfig, SpeechToText, Transcription, TranscriptionError, TranscriptionSegment,
    WhisperEngine,
};
