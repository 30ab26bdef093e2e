// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Text conversions for the money and date fields of the intake screens.
//!
//! Amounts are carried as whole cents so ledger totals stay exact; the two
//! decimal places only appear when a value is rendered.

use time::Date;
use time::macros::format_description;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidMoney,
    NegativeMoney,
    InvalidDate,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMoney => f.write_str("invalid money value -- use a form like 12.50"),
            Self::NegativeMoney => f.write_str("money value cannot be negative"),
            Self::InvalidDate => f.write_str("invalid date value -- use YYYY-MM-DD"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Parses a price or payment field. An empty field is the zero placeholder a
/// fresh row starts with.
pub fn parse_amount(input: &str) -> ValidationResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    parse_cents(trimmed)
}

pub fn parse_cents(input: &str) -> ValidationResult<i64> {
    let compact = input.trim().replace(',', "");
    if compact.starts_with('-') {
        return Err(ValidationError::NegativeMoney);
    }
    let unsigned = compact.strip_prefix('$').unwrap_or(&compact);
    if unsigned.is_empty() {
        return Err(ValidationError::InvalidMoney);
    }

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let dollars = if whole.is_empty() {
        0
    } else {
        digits_value(whole)?
    };
    let cents = match fraction {
        None => 0,
        Some(fraction) if fraction.is_empty() || fraction.len() > 2 => {
            return Err(ValidationError::InvalidMoney);
        }
        Some(fraction) => {
            let value = digits_value(fraction)?;
            if fraction.len() == 1 { value * 10 } else { value }
        }
    };

    dollars
        .checked_mul(100)
        .and_then(|value| value.checked_add(cents))
        .ok_or(ValidationError::InvalidMoney)
}

pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!(
        "{sign}${}.{:02}",
        group_thousands(magnitude / 100),
        magnitude % 100
    )
}

pub fn parse_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input.trim(), &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

pub fn parse_optional_date(input: &str) -> ValidationResult<Option<Date>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_date(input).map(Some)
}

pub fn format_date(value: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        value.year(),
        u8::from(value.month()),
        value.day()
    )
}

/// Short US style used on the picker button and client cards: `Jan 15, 2024`.
pub fn format_display_date(value: Date) -> String {
    let month = value.month().to_string();
    format!("{} {}, {}", &month[..3], value.day(), value.year())
}

fn digits_value(input: &str) -> ValidationResult<i64> {
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidMoney);
    }
    input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidMoney)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
