// Video transcriber data models
//
// This module contains the request and response types used by the API.

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;
use crate::transcriber::Transcription;

/// Request body for the transcription endpoint
#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Video URL to download and transcribe; a missing field reads as empty
    #[serde(default)]
    pub url: String,
}

/// Response for a completed transcription
#[derive(Serialize)]
pub struct TranscriptionResponse {
    /// Success flag, always true for this body
    pub success: bool,
    /// Full transcript text
    pub transcript: String,
    /// Detected language code, or "unknown"
    pub language: String,
    /// End timestamp of the last segment in seconds, rounded to two decimals
    pub duration: f64,
}

impl From<Transcription> for TranscriptionResponse {
    fn from(transcription: Transcription) -> Self {
        let duration = round_two_decimals(transcription.duration());
        Self {
            success: true,
            transcript: transcription.text.trim().to_string(),
            language: transcription.language,
            duration,
        }
    }
}

/// Error response for the API
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Success flag, always false for this body
    pub success: bool,
    /// Error message
    pub error: String,
}

impl From<&HandlerError> for ErrorResponse {
    fn from(error: &HandlerError) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcriber::TranscriptionSegment;

    fn segment(start: f64, end: f64) -> TranscriptionSegment {
        TranscriptionSegment {
            start,
            end,
            text: String::new(),
        }
    }

    #[test]
    fn duration_is_rounded_to_two_decimals() {
        let response = TranscriptionResponse::from(Transcription {
            text: "hello world".to_string(),
            language: "en".to_string(),
            segments: vec![segment(0.0, 5.0), segment(5.0, 12.345)],
        });
        assert_eq!(response.duration, 12.35);
        assert_eq!(response.transcript, "hello world");
        assert!(response.success);
    }

    #[test]
    fn duration_is_zero_without_segments() {
        let response = TranscriptionResponse::from(Transcription {
            text: String::new(),
            language: "unknown".to_string(),
            segments: Vec::new(),
        });
        assert_eq!(response.duration, 0.0);
    }

    #[test]
    fn transcript_is_trimmed() {
        let response = TranscriptionResponse::from(Transcription {
            text: "  padded  ".to_string(),
            language: "en".to_string(),
            segments: Vec::new(),
        });
        assert_eq!(response.transcript, "padded");
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::from(&HandlerError::EmptyUrl)).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Please provide a URL");
    }

    #[test]
    fn missing_url_field_reads_as_empty() {
        let request: TranscribeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.url.is_empty());
    }
}
