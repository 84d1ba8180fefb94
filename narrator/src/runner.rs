//! Sequential batch runner with a file-existence cache.
//!
//! [`BatchRunner::run`] walks the items in order. An item whose artifact
//! already exists is skipped without touching the provider; every other item
//! gets exactly one provider call. A failed item is recorded in the
//! [`RunReport`] and the batch moves on.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::audio::{OutputFormat, SpeechRequest, TextToSpeechProvider, Voice};
use crate::error::{Error, Result};
use crate::narration::{NarrationItem, validate_batch};

/// Settings shared by every item of a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Directory that holds the artifacts.
    pub output_dir: PathBuf,
    /// Synthesis model id.
    pub model: String,
    /// Voice used for every clip.
    pub voice: Voice,
    /// Output encoding; its container decides the artifact extension.
    pub format: OutputFormat,
}

impl RunnerConfig {
    /// Default artifact directory, relative to the working directory.
    pub const DEFAULT_OUTPUT_DIR: &'static str = "app/audio";
    /// Default synthesis model.
    pub const DEFAULT_MODEL: &'static str = "sonic-2";
    /// Default narrator voice.
    pub const DEFAULT_VOICE_ID: &'static str = "e8e5fffb-252c-436d-b842-8879b84445b6";

    /// Sets the artifact directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the synthesis model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the voice.
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<Voice>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Path of the artifact for `key`.
    #[must_use]
    pub fn artifact_path(&self, key: &str) -> PathBuf {
        self.output_dir
            .join(format!("{key}.{}", self.format.extension()))
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(Self::DEFAULT_OUTPUT_DIR),
            model: Self::DEFAULT_MODEL.to_owned(),
            voice: Voice::new(Self::DEFAULT_VOICE_ID),
            format: OutputFormat::default(),
        }
    }
}

/// What happened to one item.
#[derive(Debug)]
pub enum ItemOutcome {
    /// The artifact already existed; no request was made.
    Skipped {
        /// Item key.
        key: String,
        /// Existing artifact.
        path: PathBuf,
    },
    /// The artifact was generated and written.
    Generated {
        /// Item key.
        key: String,
        /// New artifact.
        path: PathBuf,
        /// Bytes written.
        bytes: usize,
    },
    /// The request or the write failed.
    Failed {
        /// Item key.
        key: String,
        /// Cause of the failure.
        error: Error,
    },
}

impl ItemOutcome {
    /// Key of the item this outcome belongs to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Skipped { key, .. } | Self::Generated { key, .. } | Self::Failed { key, .. } => {
                key
            }
        }
    }

    /// Returns `true` if the item failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcomes of a run, one per item, in input order.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Per-item outcomes.
    pub outcomes: Vec<ItemOutcome>,
}

impl RunReport {
    /// Number of items generated in this run.
    #[must_use]
    pub fn generated(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Generated { .. }))
    }

    /// Number of items skipped because their artifact existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped { .. }))
    }

    /// Number of items that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(ItemOutcome::is_failed)
    }

    /// Iterate over failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Drives a batch of narration items through a speech provider.
#[derive(Debug)]
pub struct BatchRunner<P> {
    provider: P,
    config: RunnerConfig,
}

impl<P: TextToSpeechProvider> BatchRunner<P> {
    /// Create a runner.
    #[must_use]
    pub const fn new(provider: P, config: RunnerConfig) -> Self {
        Self { provider, config }
    }

    /// Render every item whose artifact is missing.
    ///
    /// Items are processed one at a time in the given order. Per-item
    /// failures are recorded in the report and do not stop the batch.
    ///
    /// # Errors
    ///
    /// Returns an error, before any request is made, if the batch has an
    /// unsafe or duplicate key or the output directory cannot be created.
    pub async fn run(&self, items: &[NarrationItem]) -> Result<RunReport> {
        validate_batch(items)?;

        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| Error::write(&self.config.output_dir, e))?;

        info!(
            provider = self.provider.name(),
            dir = %self.config.output_dir.display(),
            "Generating {} narration clips...",
            items.len()
        );

        let mut report = RunReport {
            outcomes: Vec::with_capacity(items.len()),
        };
        for item in items {
            report.outcomes.push(self.process(item).await);
        }

        info!(
            generated = report.generated(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Done!"
        );
        Ok(report)
    }

    async fn process(&self, item: &NarrationItem) -> ItemOutcome {
        let key = item.key().to_owned();
        let path = self.config.artifact_path(&key);
        let file = display_name(&path);

        if artifact_exists(&path).await {
            info!(key = %key, "  [skip] {file} already exists");
            return ItemOutcome::Skipped { key, path };
        }

        let request = SpeechRequest::new(&self.config.model, item.text(), self.config.voice.clone())
            .format(self.config.format);

        let response = match self.provider.speech(&request).await {
            Ok(response) => response,
            Err(err) => {
                error!(key = %key, status = ?tts_status(&err), "  [error] {key}: {err}");
                return ItemOutcome::Failed { key, error: err };
            }
        };

        if let Err(err) = response.save(&path).await {
            error!(key = %key, "  [error] {key}: {err}");
            return ItemOutcome::Failed { key, error: err };
        }

        let bytes = response.audio.len();
        info!(key = %key, bytes, "  [ok] {file} ({} KB)", response.size_kb());
        ItemOutcome::Generated { key, path, bytes }
    }
}

const fn tts_status(err: &Error) -> Option<u16> {
    match err {
        Error::Tts(tts) => tts.status(),
        _ => None,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

async fn artifact_exists(path: &Path) -> bool {
    match tokio::fs::try_exists(path).await {
        Ok(exists) => exists,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not check artifact, treating as missing");
            false
        }
    }
}
