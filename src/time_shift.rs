// @module: Requested timing delta

/// A minute/second/millisecond delta requested by the user.
///
/// Each component carries its own sign. Positive values delay subtitles
/// (show them later), negative values advance them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeShift {
    pub minutes: i32,
    pub seconds: i32,
    pub milliseconds: i32,
}

impl TimeShift {
    pub fn new(minutes: i32, seconds: i32, milliseconds: i32) -> Self {
        Self {
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Shift of a raw millisecond amount
    pub fn from_millis(milliseconds: i32) -> Self {
        Self::new(0, 0, milliseconds)
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0 && self.seconds == 0 && self.milliseconds == 0
    }

    /// Force every component to be negative (an advance)
    pub fn make_negative(&mut self) {
        self.minutes = -self.minutes.saturating_abs();
        self.seconds = -self.seconds.saturating_abs();
        self.milliseconds = -self.milliseconds.saturating_abs();
    }

    /// Force every component to be positive (a delay)
    pub fn make_positive(&mut self) {
        self.minutes = self.minutes.saturating_abs();
        self.seconds = self.seconds.saturating_abs();
        self.milliseconds = self.milliseconds.saturating_abs();
    }

    /// The opposite shift; applying both restores the original timings
    pub fn inverted(&self) -> Self {
        Self::new(
            self.minutes.saturating_neg(),
            self.seconds.saturating_neg(),
            self.milliseconds.saturating_neg(),
        )
    }

    pub fn total_millis(&self) -> i64 {
        combine(self.minutes, self.seconds, self.milliseconds)
    }

    // @returns: true when any single component is positive
    //
    // The direction is read per component, not from the total: 1 minute and
    // -90 seconds still counts as a delay.
    pub fn is_delay(&self) -> bool {
        self.minutes > 0 || self.seconds > 0 || self.milliseconds > 0
    }

    /// "delayed" or "advanced", for status messages
    pub fn direction_word(&self) -> &'static str {
        if self.is_delay() { "delayed" } else { "advanced" }
    }

    /// Human readable magnitude such as "2 minutes 1 second".
    ///
    /// Zero components are left out; a zero shift reads "0 milliseconds".
    pub fn describe_magnitude(&self) -> String {
        let parts: Vec<String> = [
            (self.minutes, "minute"),
            (self.seconds, "second"),
            (self.milliseconds, "millisecond"),
        ]
        .iter()
        .filter(|(count, _)| *count != 0)
        .map(|(count, unit)| plurify(count.unsigned_abs(), unit))
        .collect();

        if parts.is_empty() {
            plurify(0, "millisecond")
        } else {
            parts.join(" ")
        }
    }
}

impl std::fmt::Display for TimeShift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {}", self.direction_word(), self.describe_magnitude())
    }
}

/// Combined delta in milliseconds
pub fn combine(minutes: i32, seconds: i32, milliseconds: i32) -> i64 {
    i64::from(minutes) * 60_000 + i64::from(seconds) * 1_000 + i64::from(milliseconds)
}

/// "1 second", "3 seconds", "0 seconds"
pub fn plurify(count: u32, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}
