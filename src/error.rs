// Error handling for the video transcriber
//
// This module defines the error kinds a transcription request can end in.
// Each adapter reports its own error enum; `HandlerError` aggregates them and
// its Display strings are exactly the messages sent back to the client.

use thiserror::Error;

use crate::downloader::DownloadError;
use crate::transcriber::TranscriptionError;

/// Errors that can occur while handling a transcription request
///
/// Every variant is reported to the client as `{success: false, error: <Display>}`
/// with HTTP status 200; the body carries the failure, not the status code.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The submitted URL was missing or blank after trimming
    #[error("Please provide a URL")]
    EmptyUrl,

    /// The media download step failed
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    /// The download reported success but no recognized audio file appeared
    #[error("Audio file not found")]
    AudioFileNotFound,

    /// Creating or scanning the scratch workspace failed
    #[error("{0}")]
    Workspace(#[from] std::io::Error),

    /// Speech-to-text inference failed
    #[error("{0}")]
    Transcription(#[from] TranscriptionError),

    /// Any failure not covered by a more specific variant
    #[error("{0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_message_matches_contract() {
        assert_eq!(HandlerError::EmptyUrl.to_string(), "Please provide a URL");
    }

    #[test]
    fn download_error_is_stage_prefixed() {
        let err = HandlerError::from(DownloadError::Tool("no video formats found".to_string()));
        let message = err.to_string();
        assert!(message.starts_with("Download failed: "));
        assert!(message.contains("no video formats found"));
    }

    #[test]
    fn missing_audio_message_matches_contract() {
        assert_eq!(
            HandlerError::AudioFileNotFound.to_string(),
            "Audio file not found"
        );
    }

    #[test]
    fn transcription_error_passes_through() {
        let err = HandlerError::from(TranscriptionError::Inference("tensor shape".to_string()));
        assert_eq!(err.to_string(), "transcription failed: tensor shape");
    }
}
