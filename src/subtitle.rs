use std::fmt;

use crate::time_shift::{self, TimeShift};
use crate::timecode;

// @module: Single subtitle record

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subtitle {
    // @field: Sequence number as written in the file
    pub number: u32,

    // @field: Start time in ms
    pub start: i64,

    // @field: End time in ms
    pub end: i64,

    // @field: Caption lines joined by '\n'
    pub text: String,
}

impl Subtitle {
    pub fn new(number: u32, start: i64, end: i64, text: impl Into<String>) -> Self {
        Subtitle {
            number,
            start,
            end,
            text: text.into(),
        }
    }

    /// Empty record for the given number; the parser fills in timing and text
    pub fn numbered(number: u32) -> Self {
        Subtitle {
            number,
            ..Default::default()
        }
    }

    /// Move the subtitle later (positive values) or earlier (negative values)
    pub fn shift_by(&mut self, minutes: i32, seconds: i32, milliseconds: i32) {
        self.shift_millis(time_shift::combine(minutes, seconds, milliseconds));
    }

    pub fn shift(&mut self, shift: &TimeShift) {
        self.shift_by(shift.minutes, shift.seconds, shift.milliseconds);
    }

    /// Move the subtitle by a raw millisecond delta
    pub fn shift_millis(&mut self, milliseconds: i64) {
        self.start += milliseconds;
        self.end += milliseconds;
    }

    /// Add a line of text below the existing ones
    pub fn append_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn format_start_time(&self) -> String {
        timecode::format(self.start)
    }

    pub fn format_end_time(&self) -> String {
        timecode::format(self.end)
    }

    /// Display duration in milliseconds
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// The SRT block for this record, including the terminating blank line
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.number)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}
