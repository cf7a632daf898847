// Speech-to-text adapter
//
// This module wraps whisper.cpp (via whisper-rs) behind a narrow trait. The
// model is loaded exactly once at process startup; every request runs
// inference on its own state object against the shared context.

use std::env;
use std::path::Path;
use std::process::Command;

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Errors raised by the transcription adapter
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The whisper model file could not be loaded
    #[error("failed to load whisper model {path}: {message}")]
    ModelLoad {
        /// Path to the model file
        path: String,
        /// Underlying error message
        message: String,
    },

    /// The audio file could not be decoded to PCM samples
    #[error("audio decoding failed: {0}")]
    Decode(String),

    /// Whisper inference failed
    #[error("transcription failed: {0}")]
    Inference(String),
}

/// A timed slice of the transcript
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Segment text
    pub text: String,
}

/// Full output of one transcription run
#[derive(Debug, Clone)]
pub struct Transcription {
    /// Transcript text, trimmed
    pub text: String,
    /// Detected language code, or "unknown"
    pub language: String,
    /// Ordered timed segments
    pub segments: Vec<TranscriptionSegment>,
}

impl Transcription {
    /// End timestamp of the last segment, or zero when none exist
    pub fn duration(&self) -> f64 {
        self.segments.last().map(|segment| segment.end).unwrap_or(0.0)
    }
}

/// Adapter contract for converting an audio file to text
///
/// The call blocks until inference completes; callers on an async runtime are
/// expected to dispatch it to a blocking thread pool.
pub trait SpeechToText: Send + Sync {
    /// Transcribe the audio content of a local file
    fn transcribe_file(&self, audio_file: &Path) -> Result<Transcription, TranscriptionError>;
}

/// Configuration for the whisper engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Path to the GGML model file
    pub model_path: String,
    /// Path to the ffmpeg executable used for PCM conversion
    pub ffmpeg_path: String,
    /// Number of inference threads
    pub threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: env::var("TRANSCRIBER_MODEL_PATH")
                .unwrap_or_else(|_| String::from("models/ggml-base.bin")),
            ffmpeg_path: env::var("FFMPEG_CMD").unwrap_or_else(|_| String::from("ffmpeg")),
            threads: env::var("TRANSCRIBER_THREADS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(num_cpus::get),
        }
    }
}

/// Whisper transcription engine
///
/// Holds the loaded model context for the lifetime of the process.
pub struct WhisperEngine {
    ctx: WhisperContext,
    ffmpeg_path: String,
    threads: i32,
}

impl WhisperEngine {
    /// Load the whisper model from the configured path
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError::ModelLoad` if the model file is missing or invalid
    pub fn load(config: &EngineConfig) -> Result<Self, TranscriptionError> {
        info!("Loading whisper model from {}", config.model_path);

        let ctx = WhisperContext::new_with_params(
            &config.model_path,
            WhisperContextParameters::default(),
        )
        .map_err(|e| TranscriptionError::ModelLoad {
            path: config.model_path.clone(),
            message: e.to_string(),
        })?;

        info!("Whisper model loaded");

        let threads = i32::try_from(config.threads.max(1)).unwrap_or(i32::MAX);
        Ok(Self {
            ctx,
            ffmpeg_path: config.ffmpeg_path.clone(),
            threads,
        })
    }

    /// Decode an audio file to 16 kHz mono f32 samples
    ///
    /// whisper.cpp consumes raw PCM, so the downloaded artifact is first
    /// converted with ffmpeg into a temporary WAV next to the input file.
    fn decode_samples(&self, audio_file: &Path) -> Result<Vec<f32>, TranscriptionError> {
        let parent = audio_file.parent().unwrap_or_else(|| Path::new("."));
        let wav = tempfile::Builder::new()
            .suffix(".wav")
            .tempfile_in(parent)
            .map_err(|e| TranscriptionError::Decode(e.to_string()))?;

        let output = Command::new(&self.ffmpeg_path)
            .arg("-nostdin")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(audio_file)
            .arg("-vn")
            .arg("-ac")
            .arg("1")
            .arg("-ar")
            .arg("16000")
            .arg("-f")
            .arg("wav")
            .arg(wav.path())
            .output()
            .map_err(|e| {
                TranscriptionError::Decode(format!("failed to run {}: {}", self.ffmpeg_path, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscriptionError::Decode(stderr.trim().to_string()));
        }

        read_wav_samples(wav.path())
    }
}

impl SpeechToText for WhisperEngine {
    fn transcribe_file(&self, audio_file: &Path) -> Result<Transcription, TranscriptionError> {
        debug!("Transcribing {}", audio_file.display());
        let samples = self.decode_samples(audio_file)?;

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| TranscriptionError::Inference(format!("failed to create state: {}", e)))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.threads);
        // No language hint: let the model detect it
        params.set_language(None);
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &samples)
            .map_err(|e| TranscriptionError::Inference(e.to_string()))?;

        let mut text = String::new();
        let mut segments = Vec::new();
        for segment in state.as_iter() {
            let segment_text = segment.to_string();
            // whisper reports timestamps in centiseconds
            segments.push(TranscriptionSegment {
                start: segment.start_timestamp() as f64 / 100.0,
                end: segment.end_timestamp() as f64 / 100.0,
                text: segment_text.trim().to_string(),
            });
            text.push_str(&segment_text);
        }

        let language = whisper_rs::get_lang_str(state.full_lang_id_from_state())
            .unwrap_or("unknown")
            .to_string();

        debug!(
            "Transcribed {} segments, detected language {}",
            segments.len(),
            language
        );

        Ok(Transcription {
            text: text.trim().to_string(),
            language,
            segments,
        })
    }
}

/// Read a WAV file into f32 samples
fn read_wav_samples(path: &Path) -> Result<Vec<f32>, TranscriptionError> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| TranscriptionError::Decode(format!("failed to read WAV: {}", e)))?;
    let spec = reader.spec();

    match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TranscriptionError::Decode(e.to_string())),
        hound::SampleFormat::Int => {
            let max_value = (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| TranscriptionError::Decode(e.to_string()))
                .map(|samples| {
                    samples
                        .into_iter()
                        .map(|sample| sample as f32 / max_value)
                        .collect()
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64) -> TranscriptionSegment {
        TranscriptionSegment {
            start,
            end,
            text: String::new(),
        }
    }

    #[test]
    fn duration_is_last_segment_end() {
        let transcription = Transcription {
            text: String::new(),
            language: "en".to_string(),
            segments: vec![segment(0.0, 4.5), segment(4.5, 9.25)],
        };
        assert_eq!(transcription.duration(), 9.25);
    }

    #[test]
    fn duration_is_zero_without_segments() {
        let transcription = Transcription {
            text: String::new(),
            language: "unknown".to_string(),
            segments: Vec::new(),
        };
        assert_eq!(transcription.duration(), 0.0);
    }

    #[test]
    fn reads_int_wav_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(i16::MIN).unwrap();
        writer.finalize().unwrap();

        let samples = read_wav_samples(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 1.0).abs() < 1e-3);
        assert!((samples[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn unreadable_wav_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"not a wav").unwrap();

        let err = read_wav_samples(&path).unwrap_err();
        assert!(matches!(err, TranscriptionError::Decode(_)));
    }

    #[test]
    fn model_load_failure_names_the_path() {
        let config = EngineConfig {
            model_path: "/nonexistent/ggml-base.bin".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            threads: 4,
        };
        let err = WhisperEngine::load(&config).unwrap_err();
        match err {
            TranscriptionError::ModelLoad { path, .. } => {
                assert!(path.contains("ggml-base.bin"));
            }
            other => panic!("expected ModelLoad error, got {:?}", other),
        }
    }
}
