use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::document::SubtitleDocument;
use crate::errors::AppError;
use crate::file_utils::{FileManager, FileType};
use crate::notifier::{LogNotifier, Notifier};
use crate::time_shift::TimeShift;

// @module: Application controller for subtitle timing adjustments

/// Timing adjustment requested for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Shift every subtitle
    All(TimeShift),

    /// Shift subtitles numbered within the bounds; a missing bound means the
    /// first (or last) number of each file
    Range {
        shift: TimeShift,
        from: Option<u32>,
        to: Option<u32>,
    },

    /// Shift from `anchor` onward and taper the preceding subtitles
    Proportional { shift: TimeShift, anchor: u32 },
}

impl Adjustment {
    pub fn shift(&self) -> TimeShift {
        match self {
            Adjustment::All(shift) => *shift,
            Adjustment::Range { shift, .. } => *shift,
            Adjustment::Proportional { shift, .. } => *shift,
        }
    }

    /// Apply this adjustment to a loaded document
    pub fn apply(&self, document: &mut SubtitleDocument) -> Result<()> {
        let shift = self.shift();
        match *self {
            Adjustment::All(_) => {
                document.shift_all(shift.minutes, shift.seconds, shift.milliseconds);
            }
            Adjustment::Range { from, to, .. } => {
                let min = from.or(document.first_number()).unwrap_or(0);
                let max = to.or(document.last_number()).unwrap_or(0);
                if min > max {
                    return Err(anyhow!("Invalid range: subtitle {} is after subtitle {}", min, max));
                }
                document.shift_range(shift.minutes, shift.seconds, shift.milliseconds, min, max);
            }
            Adjustment::Proportional { anchor, .. } => {
                document.shift_proportional(shift.minutes, shift.seconds, shift.milliseconds, anchor)?;
            }
        }
        Ok(())
    }
}

/// Main application controller for subtitle timing
pub struct Controller {
    // @field: App configuration
    pub config: Config,

    // @field: Sink for document notifications
    notifier: Arc<dyn Notifier>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self, AppError> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            config,
            notifier: Arc::new(LogNotifier),
        })
    }

    /// Route document notifications somewhere other than the log
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// New document configured with this controller's encoding and notifier
    pub fn new_document(&self) -> SubtitleDocument {
        let mut document = SubtitleDocument::new();
        document.set_encoding(self.config.encoding.clone());
        document.add_notifier(Arc::clone(&self.notifier));
        document
    }

    /// Where the adjusted copy of `input_file` goes
    pub fn output_path_for(&self, input_file: &Path) -> PathBuf {
        if self.config.output.in_place {
            input_file.to_path_buf()
        } else {
            FileManager::generate_output_path(input_file, &self.config.output.suffix)
        }
    }

    /// Load a subtitle file for inspection
    pub fn open(&self, input_file: &Path) -> Result<SubtitleDocument> {
        let mut document = self.new_document();
        document
            .load(input_file)
            .with_context(|| format!("Failed to load subtitles from {:?}", input_file))?;
        Ok(document)
    }

    /// Adjust one file. Returns the path written, or `None` when skipped.
    pub fn run(
        &self,
        input_file: &Path,
        adjustment: Adjustment,
        output: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        if FileManager::detect_file_type(input_file)? != FileType::Subtitle {
            return Err(anyhow!("Not a SubRip subtitle file: {:?}", input_file));
        }

        let output_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.output_path_for(input_file));

        // Writing over the input is what in-place mode asks for; anything else needs -f
        let overwriting_input = output_path == input_file && self.config.output.in_place;
        if output_path.exists() && !force_overwrite && !overwriting_input {
            warn!(
                "Skipping {:?}, output already exists: {:?} (use -f to force overwrite)",
                input_file, output_path
            );
            return Ok(None);
        }

        let mut document = self.open(input_file)?;
        debug!("Loaded {} subtitles from {:?}", document.len(), input_file);

        adjustment
            .apply(&mut document)
            .with_context(|| format!("Failed to adjust {:?}", input_file))?;

        document
            .save_as(&output_path)
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        Ok(Some(output_path))
    }

    /// Adjust every .srt file below `input_dir`. Returns the number of files written.
    pub fn run_folder(&self, input_dir: &Path, adjustment: Adjustment, force_overwrite: bool) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let suffix = format!(".{}", self.config.output.suffix);
        let files: Vec<PathBuf> = FileManager::find_files(input_dir, "srt")?
            .into_iter()
            // Outputs of an earlier run are not inputs
            .filter(|p| {
                self.config.output.in_place
                    || !p
                        .file_stem()
                        .map(|s| s.to_string_lossy().ends_with(&suffix))
                        .unwrap_or(false)
            })
            .collect();

        if files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(0);
        }

        info!("Processing {} subtitle files in {:?}", files.len(), input_dir);

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut written = 0;
        for file in &files {
            progress.set_message(
                file.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            match self.run(file, adjustment, None, force_overwrite) {
                Ok(Some(_)) => written += 1,
                Ok(None) => {}
                Err(e) => error!("Error processing {:?}: {:#}", file, e),
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!("Finished: {} of {} files written", written, files.len());
        Ok(written)
    }
}
