//! Timestamp patterns.
//!
//! Two dialects are accepted:
//!
//! - **Token patterns** (the default, e.g. `YYYYMMDD_hhmmss`). Letters are
//!   read as moment-style tokens, `[...]` is copied literally, and anything
//!   else is copied as is.
//! - **strftime patterns**: any pattern containing `%` is handed to chrono.
//!
//! | Token | Output | Token | Output |
//! |-------|--------|-------|--------|
//! | `YYYY` | 2024 | `HH` / `H` | 00-23 / 0-23 |
//! | `YY` | 24 | `hh` / `h` | 01-12 / 1-12 |
//! | `MMMM` / `MMM` | January / Jan | `mm` / `m` | minutes |
//! | `MM` / `M` | 01 / 1 | `ss` / `s` | seconds |
//! | `DDDD` / `DDD` | day of year 001 / 1 | `SSS` | milliseconds |
//! | `DD` / `D` | 05 / 5 | `A` / `a` | AM / am |
//! | `dddd` / `ddd` | Monday / Mon | `X` / `x` | unix s / ms |
//! | `Q` | quarter | | |

use crate::error::{NoteIdError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Year4,
    Year2,
    MonthName,
    MonthShort,
    Month2,
    Month,
    DayOfYear3,
    DayOfYear,
    Day2,
    Day,
    WeekdayName,
    WeekdayShort,
    Hour24Pad,
    Hour24,
    Hour12Pad,
    Hour12,
    Minute2,
    Minute,
    Second2,
    Second,
    Millis,
    MeridiemUpper,
    MeridiemLower,
    UnixSeconds,
    UnixMillis,
    Quarter,
}

// Longest first so `YYYY` wins over `YY`.
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Year4),
    ("YY", Token::Year2),
    ("MMMM", Token::MonthName),
    ("MMM", Token::MonthShort),
    ("MM", Token::Month2),
    ("M", Token::Month),
    ("DDDD", Token::DayOfYear3),
    ("DDD", Token::DayOfYear),
    ("DD", Token::Day2),
    ("D", Token::Day),
    ("dddd", Token::WeekdayName),
    ("ddd", Token::WeekdayShort),
    ("HH", Token::Hour24Pad),
    ("H", Token::Hour24),
    ("hh", Token::Hour12Pad),
    ("h", Token::Hour12),
    ("mm", Token::Minute2),
    ("m", Token::Minute),
    ("ss", Token::Second2),
    ("s", Token::Second),
    ("SSS", Token::Millis),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
    ("X", Token::UnixSeconds),
    ("x", Token::UnixMillis),
    ("Q", Token::Quarter),
];

fn is_strftime(pattern: &str) -> bool {
    pattern.contains('%')
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(escaped) = rest.strip_prefix('[') {
            match escaped.find(']') {
                Some(end) => {
                    literal.push_str(&escaped[..end]);
                    rest = &escaped[end + 1..];
                }
                None => {
                    literal.push_str(escaped);
                    rest = "";
                }
            }
            continue;
        }

        if let Some((text, token)) = TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(token.clone());
            rest = &rest[text.len()..];
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            literal.push(c);
        }
        rest = chars.as_str();
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Reject patterns that cannot be rendered.
pub fn validate(pattern: &str) -> Result<()> {
    if is_strftime(pattern) && StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
    {
        return Err(NoteIdError::InvalidFormat(pattern.to_string()));
    }
    Ok(())
}

/// Render `dt` with `pattern`.
pub fn format_datetime<Tz>(dt: &DateTime<Tz>, pattern: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if is_strftime(pattern) {
        validate(pattern)?;
        return Ok(dt.format(pattern).to_string());
    }

    let mut out = String::with_capacity(pattern.len() + 8);
    for token in tokenize(pattern) {
        write_token(&mut out, dt, &token)
            .map_err(|_| NoteIdError::InvalidFormat(pattern.to_string()))?;
    }
    Ok(out)
}

fn write_token<Tz>(out: &mut String, dt: &DateTime<Tz>, token: &Token) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let (is_pm, hour12) = dt.hour12();
    match token {
        Token::Literal(text) => out.write_str(text),
        Token::Year4 => write!(out, "{:04}", dt.year()),
        Token::Year2 => write!(out, "{:02}", dt.year().rem_euclid(100)),
        Token::MonthName => write!(out, "{}", dt.format("%B")),
        Token::MonthShort => write!(out, "{}", dt.format("%b")),
        Token::Month2 => write!(out, "{:02}", dt.month()),
        Token::Month => write!(out, "{}", dt.month()),
        Token::DayOfYear3 => write!(out, "{:03}", dt.ordinal()),
        Token::DayOfYear => write!(out, "{}", dt.ordinal()),
        Token::Day2 => write!(out, "{:02}", dt.day()),
        Token::Day => write!(out, "{}", dt.day()),
        Token::WeekdayName => write!(out, "{}", dt.format("%A")),
        Token::WeekdayShort => write!(out, "{}", dt.format("%a")),
        Token::Hour24Pad => write!(out, "{:02}", dt.hour()),
        Token::Hour24 => write!(out, "{}", dt.hour()),
        Token::Hour12Pad => write!(out, "{:02}", hour12),
        Token::Hour12 => write!(out, "{}", hour12),
        Token::Minute2 => write!(out, "{:02}", dt.minute()),
        Token::Minute => write!(out, "{}", dt.minute()),
        Token::Second2 => write!(out, "{:02}", dt.second()),
        Token::Second => write!(out, "{}", dt.second()),
        Token::Millis => write!(out, "{:03}", dt.timestamp_subsec_millis().min(999)),
        Token::MeridiemUpper => out.write_str(if is_pm { "PM" } else { "AM" }),
        Token::MeridiemLower => out.write_str(if is_pm { "pm" } else { "am" }),
        Token::UnixSeconds => write!(out, "{}", dt.timestamp()),
        Token::UnixMillis => write!(out, "{}", dt.timestamp_millis()),
        Token::Quarter => write!(out, "{}", dt.month0() / 3 + 1),
    }
}

/// Render a millisecond timestamp in the local time zone.
pub fn format_millis(millis: i64, pattern: &str) -> Result<String> {
    let dt = Local
        .timestamp_millis_opt(millis)
        .earliest()
        .ok_or_else(|| NoteIdError::Host(format!("timestamp {} is out of range", millis)))?;
    format_datetime(&dt, pattern)
}
