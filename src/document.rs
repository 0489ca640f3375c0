/*!
 * Subtitle document: an ordered set of SRT records.
 *
 * Owns parsing from text, rendering back to text, loading and saving through
 * the file layer, and the three timing adjustments:
 * - uniform shift of every record
 * - shift of a range of records selected by number
 * - proportional shift pinned at an anchor record, tapering towards the first
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::notifier::{Notifier, Notifiers};
use crate::subtitle::Subtitle;
use crate::time_shift::TimeShift;
use crate::timecode;

/// Separator between the start and end timestamps of a timing line
const TIMING_SEPARATOR: &str = " --> ";

/// Encoding used until the caller picks another one
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// What the parser expects on the next line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ExpectNumber,
    ExpectTiming,
    ExpectText,
    ExpectBlankOrText,
}

/// Ordered collection of subtitles with its file association
#[derive(Debug)]
pub struct SubtitleDocument {
    records: Vec<Subtitle>,
    source_path: Option<PathBuf>,
    encoding: String,
    notifiers: Notifiers,
}

impl Default for SubtitleDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleDocument {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            source_path: None,
            encoding: DEFAULT_ENCODING.to_string(),
            notifiers: Notifiers::default(),
        }
    }

    /// Build a document from records that are already in file order
    pub fn from_records(records: Vec<Subtitle>) -> Self {
        Self {
            records,
            ..Self::new()
        }
    }

    /// Register a notifier; every status message goes to all of them
    pub fn add_notifier(&mut self, notifier: Arc<dyn Notifier>) {
        self.notifiers.add(notifier);
    }

    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn set_source_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.source_path = Some(path.into());
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Encoding for the next load or save. Records already loaded are not
    /// re-decoded; load again to read the file with the new encoding.
    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = encoding.into();
    }

    pub fn records(&self) -> &[Subtitle] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    pub fn find_by_number(&self, number: u32) -> Option<&Subtitle> {
        self.records.iter().find(|s| s.number == number)
    }

    pub fn find_by_number_mut(&mut self, number: u32) -> Option<&mut Subtitle> {
        self.records.iter_mut().find(|s| s.number == number)
    }

    /// Position in file order of the first record with this number
    pub fn index_of_number(&self, number: u32) -> Option<usize> {
        self.records.iter().position(|s| s.number == number)
    }

    pub fn first_number(&self) -> Option<u32> {
        self.records.first().map(|s| s.number)
    }

    pub fn last_number(&self) -> Option<u32> {
        self.records.last().map(|s| s.number)
    }

    // ---------------------------------------------------------------------
    // Parsing and rendering
    // ---------------------------------------------------------------------

    /// Replace the records with the ones parsed from `content`.
    ///
    /// On failure the previous records are kept and a severe notification is sent.
    pub fn parse(&mut self, content: &str) -> Result<(), SubtitleError> {
        self.notifiers.notify("Loading subtitles...");

        match parse_records(content) {
            Ok(records) => {
                debug!("Parsed {} subtitle records", records.len());
                self.records = records;
                self.notifiers.notify("Subtitles loaded successfully");
                Ok(())
            }
            Err(e) => {
                warn!("Failed to parse subtitles: {}", e);
                self.notifiers
                    .notify_severe(&format!("Unable to read the subtitles: {}", e));
                Err(e)
            }
        }
    }

    /// The whole document in SRT form
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.records.len() * 64);
        for record in &self.records {
            out.push_str(&record.render());
        }
        out
    }

    // ---------------------------------------------------------------------
    // File access
    // ---------------------------------------------------------------------

    /// Load and parse `path` with the current encoding, remembering the path
    pub fn load<P: Into<PathBuf>>(&mut self, path: P) -> Result<(), SubtitleError> {
        self.source_path = Some(path.into());
        self.reload()
    }

    /// Load the file at the current source path again
    pub fn reload(&mut self) -> Result<(), SubtitleError> {
        let Some(path) = self.source_path.clone() else {
            self.notifiers.notify("No file selected, unable to load");
            return Err(SubtitleError::NoSourcePath);
        };

        let content = match FileManager::read_with_encoding(&path, &self.encoding) {
            Ok(content) => content,
            Err(e) => {
                let message = match &e {
                    _ if !path.exists() => "The selected file does not exist".to_string(),
                    SubtitleError::UnsupportedEncoding(label) => {
                        format!("The encoding {} is not supported", label)
                    }
                    _ => "Unexpected error while loading from the file".to_string(),
                };
                warn!("{}", e);
                self.notifiers.notify_severe(&message);
                return Err(e);
            }
        };

        self.parse(&content)
    }

    /// Write the rendered document to the current source path
    pub fn save(&mut self) -> Result<(), SubtitleError> {
        let Some(path) = self.source_path.clone() else {
            self.notifiers.notify("No file selected, unable to save");
            return Err(SubtitleError::NoSourcePath);
        };

        match FileManager::write_with_encoding(&path, &self.render(), &self.encoding) {
            Ok(()) => {
                self.notifiers.notify("File saved successfully");
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                self.notifiers
                    .notify_severe("Unexpected error while saving to the file");
                Err(e)
            }
        }
    }

    /// Write to a new path and make it the document's path
    pub fn save_as<P: Into<PathBuf>>(&mut self, path: P) -> Result<(), SubtitleError> {
        self.source_path = Some(path.into());
        self.save()
    }

    // ---------------------------------------------------------------------
    // Timing adjustments
    // ---------------------------------------------------------------------

    /// Shift every subtitle. Returns the number of records moved.
    pub fn shift_all(&mut self, minutes: i32, seconds: i32, milliseconds: i32) -> usize {
        let min = self.first_number().unwrap_or(0);
        let max = self.last_number().unwrap_or(0);
        self.shift_range(minutes, seconds, milliseconds, min, max)
    }

    /// Shift every subtitle whose number is within `[min, max]`.
    ///
    /// Selection is by number, not position, so unordered or gapped numbering
    /// is fine. Returns the number of records moved.
    pub fn shift_range(&mut self, minutes: i32, seconds: i32, milliseconds: i32, min: u32, max: u32) -> usize {
        let shift = TimeShift::new(minutes, seconds, milliseconds);

        let mut shifted = 0;
        for record in self.records.iter_mut().filter(|s| (min..=max).contains(&s.number)) {
            record.shift(&shift);
            shifted += 1;
        }
        debug!("Shifted {} records by {} ms", shifted, shift.total_millis());

        self.notifiers.notify(&format!(
            "Subtitles {} from subtitle {} to {}",
            shift, min, max
        ));

        shifted
    }

    /// Move the `target` subtitle and everything after it by the full delta,
    /// and spread the delta over the preceding subtitles so the correction
    /// tapers off towards the first one, which stays where it is.
    pub fn shift_proportional(
        &mut self,
        minutes: i32,
        seconds: i32,
        milliseconds: i32,
        target: u32,
    ) -> Result<(), SubtitleError> {
        let shift = TimeShift::new(minutes, seconds, milliseconds);
        let total = shift.total_millis();

        let Some(target_index) = self.index_of_number(target) else {
            self.notifiers
                .notify_severe("The subtitle selected for the update doesn't exist");
            return Err(SubtitleError::NotFound(target));
        };

        if target_index == 0 {
            self.notifiers.notify_severe(
                "The first subtitle cannot anchor a proportional update, shift all subtitles instead",
            );
            return Err(SubtitleError::AnchorIsFirst(target));
        }

        let per_step = total / target_index as i64;

        let mut change = total;
        for index in (1..target_index).rev() {
            self.records[index].shift_millis(change);
            change -= per_step;
        }

        for record in &mut self.records[target_index..] {
            record.shift_millis(total);
        }
        debug!(
            "Proportional shift of {} ms anchored at index {} ({} ms per step)",
            total, target_index, per_step
        );

        self.notifiers.notify(&format!(
            "Subtitle {} {} and preceding subtitles adjusted proportionally",
            target, shift
        ));

        Ok(())
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for record in &self.records {
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

/// Run the block state machine over `content`
fn parse_records(content: &str) -> Result<Vec<Subtitle>, SubtitleError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut current: Option<Subtitle> = None;
    let mut state = ParseState::ExpectNumber;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        match state {
            ParseState::ExpectNumber => {
                if line.trim().is_empty() {
                    continue;
                }

                let number: u32 = line.trim().parse().map_err(|_| {
                    SubtitleError::format(line_number, format!("malformed subtitle number: {:?}", line))
                })?;

                if let Some(done) = current.take() {
                    records.push(done);
                }
                current = Some(Subtitle::numbered(number));
                state = ParseState::ExpectTiming;
            }
            ParseState::ExpectTiming => {
                let (start, end) = parse_timing_line(line, line_number)?;
                if let Some(record) = current.as_mut() {
                    record.start = start;
                    record.end = end;
                }
                state = ParseState::ExpectText;
            }
            ParseState::ExpectText | ParseState::ExpectBlankOrText => {
                if line.is_empty() {
                    state = ParseState::ExpectNumber;
                } else {
                    if let Some(record) = current.as_mut() {
                        record.append_line(line);
                    }
                    state = ParseState::ExpectBlankOrText;
                }
            }
        }
    }

    if state == ParseState::ExpectTiming {
        debug!("Input ended before the timing line of the last subtitle");
    }

    if let Some(done) = current.take() {
        records.push(done);
    }

    Ok(records)
}

/// Split `HH:MM:SS,mmm --> HH:MM:SS,mmm` into start and end milliseconds
fn parse_timing_line(line: &str, line_number: usize) -> Result<(i64, i64), SubtitleError> {
    let fields: Vec<&str> = line.split(TIMING_SEPARATOR).collect();
    if fields.len() != 2 {
        return Err(SubtitleError::format(
            line_number,
            format!("expected \"start{}end\" timing, found {:?}", TIMING_SEPARATOR, line),
        ));
    }

    let at_line = |e: SubtitleError| match e {
        SubtitleError::Format { message, .. } => SubtitleError::Format {
            line: line_number,
            message,
        },
        other => other,
    };

    let start = timecode::parse(fields[0]).map_err(at_line)?;
    let end = timecode::parse(fields[1]).map_err(at_line)?;

    Ok((start, end))
}
