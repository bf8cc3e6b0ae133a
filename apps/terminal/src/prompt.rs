//! # Console Prompts
//!
//! Line-oriented input helpers for the menu loops.
//!
//! Two shapes of prompt exist:
//! - required (`prompt_*`): parse or fail with `AppError::Input`
//! - optional (`prompt_optional_*`): a blank line means "no value", which
//!   the update flow maps to "keep the current field". A typed value of
//!   zero is a real value, never a keep-marker.
//!
//! Prices are parsed from decimal text straight into integer cents - no
//! float ever touches a monetary value.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::error::AppError;

/// Prints a label (no newline), flushes, and reads one trimmed line.
pub fn read_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Reads a menu choice. Unparsable input yields `Ok(None)` so the menu can
/// print "Invalid choice" and continue; only console I/O failures are
/// errors.
pub fn read_menu_choice(label: &str) -> Result<Option<u32>, AppError> {
    let line = read_line(label)?;
    Ok(line.parse().ok())
}

/// Reads a line of text (may be empty; validation happens downstream).
pub fn prompt_text(label: &str) -> Result<String, AppError> {
    Ok(read_line(label)?)
}

/// Reads a line of text; blank means "no value".
pub fn prompt_optional_text(label: &str) -> Result<Option<String>, AppError> {
    let line = read_line(label)?;
    Ok(if line.is_empty() { None } else { Some(line) })
}

/// Reads a required unsigned integer (ids).
pub fn prompt_u64(label: &str) -> Result<u64, AppError> {
    let line = read_line(label)?;
    line.parse()
        .map_err(|_| AppError::input(format!("expected a number, got '{line}'")))
}

/// Reads a required integer (quantities).
pub fn prompt_i64(label: &str) -> Result<i64, AppError> {
    let line = read_line(label)?;
    line.parse()
        .map_err(|_| AppError::input(format!("expected a number, got '{line}'")))
}

/// Reads an integer; blank means "no value".
pub fn prompt_optional_i64(label: &str) -> Result<Option<i64>, AppError> {
    match prompt_optional_text(label)? {
        None => Ok(None),
        Some(line) => line
            .parse()
            .map(Some)
            .map_err(|_| AppError::input(format!("expected a number, got '{line}'"))),
    }
}

/// Reads a required price in decimal notation ("12", "12.5", "12.50").
pub fn prompt_price(label: &str) -> Result<i64, AppError> {
    let line = read_line(label)?;
    parse_price(&line)
        .ok_or_else(|| AppError::input(format!("expected a price like 12.50, got '{line}'")))
}

/// Reads a price; blank means "no value".
pub fn prompt_optional_price(label: &str) -> Result<Option<i64>, AppError> {
    match prompt_optional_text(label)? {
        None => Ok(None),
        Some(line) => parse_price(&line)
            .map(Some)
            .ok_or_else(|| AppError::input(format!("expected a price like 12.50, got '{line}'"))),
    }
}

/// Reads a required date in `YYYY-MM-DD` form.
pub fn prompt_date(label: &str) -> Result<NaiveDate, AppError> {
    let line = read_line(label)?;
    parse_date(&line)
        .ok_or_else(|| AppError::input(format!("expected a date like 2027-06-30, got '{line}'")))
}

/// Reads a date; blank means "no value".
pub fn prompt_optional_date(label: &str) -> Result<Option<NaiveDate>, AppError> {
    match prompt_optional_text(label)? {
        None => Ok(None),
        Some(line) => parse_date(&line).map(Some).ok_or_else(|| {
            AppError::input(format!("expected a date like 2027-06-30, got '{line}'"))
        }),
    }
}

/// Reads a yes/no confirmation; anything but y/yes counts as no.
pub fn prompt_yes_no(label: &str) -> Result<bool, AppError> {
    let line = read_line(label)?.to_lowercase();
    Ok(line == "y" || line == "yes")
}

/// The classic "Press Enter to continue" pause.
pub fn pause() -> io::Result<()> {
    read_line("\nPress Enter to continue...")?;
    Ok(())
}

// =============================================================================
// Pure Parsers
// =============================================================================

/// Parses decimal price text into integer cents.
///
/// Accepts an optional fractional part of one or two digits: "12" → 1200,
/// "12.5" → 1250, "12.50" → 1250. Anything else (more digits, stray
/// characters, a bare ".") is rejected. A leading minus parses - rejecting
/// negative prices is the validator's job, with a clearer message.
pub fn parse_price(input: &str) -> Option<i64> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    if input.is_empty() {
        return None;
    }

    let (major_str, frac_str) = match input.split_once('.') {
        Some((major, frac)) => (major, frac),
        None => (input, ""),
    };

    if major_str.is_empty() || !major_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let major: i64 = major_str.parse().ok()?;

    let frac: i64 = match frac_str.len() {
        0 if !input.contains('.') => 0,
        1 if frac_str.bytes().all(|b| b.is_ascii_digit()) => frac_str.parse::<i64>().ok()? * 10,
        2 if frac_str.bytes().all(|b| b.is_ascii_digit()) => frac_str.parse().ok()?,
        _ => return None,
    };

    let cents = major.checked_mul(100)?.checked_add(frac)?;
    Some(if negative { -cents } else { cents })
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
