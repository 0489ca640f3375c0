/*!
 * # subshift - SubRip subtitle timing editor
 *
 * A Rust library for fixing the timing of SubRip (.srt) subtitle files.
 *
 * ## Features
 *
 * - Parse SRT files into numbered, timed caption records
 * - Shift all subtitles, or a range selected by subtitle number
 * - Proportional shift: pin an anchor subtitle and taper the correction
 *   over the preceding ones
 * - Render back to the exact SRT layout
 * - Read and write files in any WHATWG encoding (UTF-8, windows-1252, ...)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: `HH:MM:SS,mmm` conversion
 * - `subtitle`: A single caption record
 * - `time_shift`: Requested timing delta and its wording
 * - `document`: Parsing, rendering and timing adjustments
 * - `notifier`: Status and failure notification sinks
 * - `file_utils`: File system operations and encodings
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod notifier;
pub mod subtitle;
pub mod time_shift;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Adjustment, Controller};
pub use document::SubtitleDocument;
pub use errors::{AppError, SubtitleError};
pub use notifier::{LogNotifier, Notifier};
pub use subtitle::Subtitle;
pub use time_shift::TimeShift;
