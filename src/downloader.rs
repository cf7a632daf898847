// Media download adapter
//
// This module wraps the external yt-dlp tool behind a narrow trait. yt-dlp
// resolves the page, picks the best available audio stream and transcodes it
// to the target codec through its ffmpeg post-processing step.

use std::env;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use thiserror::Error;
use tokio::process::Command;
use uuid::Uuid;

/// Errors raised by the download adapter
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The downloader executable could not be started
    #[error("failed to run {command}: {source}")]
    Spawn {
        /// Command that failed to start
        command: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The downloader ran but reported a failure
    #[error("{0}")]
    Tool(String),
}

/// Adapter contract for fetching the audio track of a video URL
///
/// Implementations write exactly one audio file into `dest_dir` on success.
#[async_trait]
pub trait AudioDownloader: Send + Sync {
    /// Download the audio track of `url` into `dest_dir`
    async fn fetch_audio(&self, url: &str, dest_dir: &Path) -> Result<(), DownloadError>;
}

/// Configuration for the yt-dlp invocation
#[derive(Clone, Debug)]
pub struct DownloaderConfig {
    /// Path to the yt-dlp executable
    pub command_path: String,
    /// Target codec for the audio post-processing step
    pub audio_format: String,
    /// Target quality passed to the post-processor
    pub audio_quality: String,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            command_path: env::var("YTDLP_CMD").unwrap_or_else(|_| String::from("yt-dlp")),
            audio_format: String::from("mp3"),
            audio_quality: String::from("192K"),
        }
    }
}

/// yt-dlp based downloader
pub struct YtDlpDownloader {
    config: DownloaderConfig,
}

impl YtDlpDownloader {
    /// Create a new downloader with the given configuration
    pub fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Build the argument list for a single download
    ///
    /// The output template carries a fresh UUID so the artifact name never
    /// collides; yt-dlp substitutes the extension chosen by the post-processor.
    fn build_args(&self, url: &str, dest_dir: &Path) -> Vec<String> {
        let output_template = dest_dir
            .join(format!("{}.%(ext)s", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();

        vec![
            "--format".to_string(),
            "bestaudio/best".to_string(),
            "--output".to_string(),
            output_template,
            "--no-playlist".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            self.config.audio_format.clone(),
            "--audio-quality".to_string(),
            self.config.audio_quality.clone(),
            url.to_string(),
        ]
    }
}

#[async_trait]
impl AudioDownloader for YtDlpDownloader {
    async fn fetch_audio(&self, url: &str, dest_dir: &Path) -> Result<(), DownloadError> {
        let args = self.build_args(url, dest_dir);
        debug!("Running {} for {}", self.config.command_path, url);

        let output = Command::new(&self.config.command_path)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| DownloadError::Spawn {
                command: self.config.command_path.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            if message.is_empty() {
                return Err(DownloadError::Tool(format!(
                    "{} exited with {}",
                    self.config.command_path, output.status
                )));
            }
            return Err(DownloadError::Tool(message.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloader() -> YtDlpDownloader {
        YtDlpDownloader::new(DownloaderConfig {
            command_path: "yt-dlp".to_string(),
            audio_format: "mp3".to_string(),
            audio_quality: "192K".to_string(),
        })
    }

    #[test]
    fn args_request_single_item_best_audio() {
        let args = downloader().build_args("https://example.com/v", Path::new("/tmp/ws"));

        assert!(args.contains(&"--no-playlist".to_string()));
        assert!(args.contains(&"--quiet".to_string()));
        assert!(args.contains(&"bestaudio/best".to_string()));
        assert_eq!(args.last().unwrap(), "https://example.com/v");
    }

    #[test]
    fn output_template_is_unique_per_call() {
        let d = downloader();
        let dest = Path::new("/tmp/ws");

        let template = |args: &[String]| {
            let at = args.iter().position(|a| a == "--output").unwrap();
            args[at + 1].clone()
        };

        let first = template(&d.build_args("https://example.com/v", dest));
        let second = template(&d.build_args("https://example.com/v", dest));
        assert!(first.starts_with("/tmp/ws/"));
        assert!(first.ends_with(".%(ext)s"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn missing_executable_is_a_spawn_error() {
        let d = YtDlpDownloader::new(DownloaderConfig {
            command_path: "/nonexistent/yt-dlp".to_string(),
            ..DownloaderConfig::default()
        });
        let dir = tempfile::tempdir().unwrap();

        let err = d
            .fetch_audio("https://example.com/v", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn silent_nonzero_exit_reports_status() {
        let d = YtDlpDownloader::new(DownloaderConfig {
            command_path: "false".to_string(),
            ..DownloaderConfig::default()
        });
        let dir = tempfile::tempdir().unwrap();

        let err = d
            .fetch_audio("https://example.com/v", dir.path())
            .await
            .unwrap_err();
        match err {
            DownloadError::Tool(message) => assert!(message.contains("exited with")),
            other => panic!("expected Tool error, got {:?}", other),
        }
    }
}
