/*!
 * SRT timestamp conversion.
 *
 * Converts between a millisecond count and the `HH:MM:SS,mmm` form used on the
 * timing line of every SubRip block.
 */

use crate::errors::SubtitleError;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
///
/// Hours are not wrapped at 24. Negative values, which only appear after an
/// oversized advance, are written as `-` followed by the formatted magnitude.
pub fn format(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();

    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{}{:02}:{:02}:{:02},{:03}", sign, hours, minutes, seconds, millis)
}

/// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
pub fn parse(text: &str) -> Result<i64, SubtitleError> {
    let invalid = || SubtitleError::format(0, format!("Invalid timestamp format: {}", text));

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let blocks: Vec<&str> = body.split(':').collect();
    if blocks.len() != 3 {
        return Err(invalid());
    }

    let second_block: Vec<&str> = blocks[2].split(',').collect();
    if second_block.len() != 2 {
        return Err(invalid());
    }

    let hours = parse_field(blocks[0]).ok_or_else(invalid)?;
    let minutes = parse_field(blocks[1]).ok_or_else(invalid)?;
    let seconds = parse_field(second_block[0]).ok_or_else(invalid)?;
    let millis = parse_field(second_block[1]).ok_or_else(invalid)?;

    let total = hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|t| t.checked_add(minutes * MS_PER_MINUTE))
        .and_then(|t| t.checked_add(seconds * MS_PER_SECOND))
        .and_then(|t| t.checked_add(millis))
        .ok_or_else(invalid)?;

    Ok(if negative { -total } else { total })
}

// Digits only: `str::parse` would also accept a leading '+'
fn parse_field(field: &str) -> Option<i64> {
    if field.is_empty() || field.len() > 12 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
