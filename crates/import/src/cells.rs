// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cell value parsing.
//!
//! Date cells come out of spreadsheet exports either as serial day numbers
//! or as whatever text the author typed. Both are normalized to calendar
//! dates here so the domain never sees raw cell text.

use crate::error::ImportError;
use time::macros::date;
use time::{Date, Duration, Month};

/// Day zero for serials above the phantom 1900-02-29.
const SERIAL_EPOCH: Date = date!(1899 - 12 - 30);

/// Day zero for serials before the phantom 1900-02-29.
const SERIAL_EPOCH_EARLY: Date = date!(1899 - 12 - 31);

/// Serial number the 1900 date system assigns to the nonexistent 1900-02-29.
const PHANTOM_LEAP_DAY_SERIAL: i64 = 60;

/// Largest serial the 1900 date system can represent (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Parses a date cell.
///
/// Empty cells yield `Ok(None)`.
///
/// # Errors
///
/// Returns `ImportError::InvalidDate` if the cell is not a representable
/// serial number or a recognized date format.
pub fn parse_date_cell(cell: &str) -> Result<Option<Date>, ImportError> {
    let cell: &str = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    let invalid = || ImportError::InvalidDate {
        value: cell.to_string(),
    };

    if let Ok(serial) = cell.parse::<f64>() {
        return serial_to_date(serial).map(Some).ok_or_else(invalid);
    }

    parse_text_date(cell).map(Some).ok_or_else(invalid)
}

/// Converts a 1900-system spreadsheet serial to a date.
///
/// The fractional part (time of day) is discarded.
#[must_use]
pub fn serial_to_date(serial: f64) -> Option<Date> {
    if !(1.0..MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    let days: i64 = serial.trunc() as i64;

    match days {
        PHANTOM_LEAP_DAY_SERIAL => None,
        d if d < PHANTOM_LEAP_DAY_SERIAL => SERIAL_EPOCH_EARLY.checked_add(Duration::days(d)),
        d => SERIAL_EPOCH.checked_add(Duration::days(d)),
    }
}

fn parse_text_date(text: &str) -> Option<Date> {
    // Drop a trailing time component: "2026-10-19T08:00:00", "2026-10-19 08:00"
    let date_part: &str = text
        .split(['T', ' '])
        .next()
        .filter(|part| part.len() == 10 && part.as_bytes().get(4) == Some(&b'-'))
        .unwrap_or(text);

    parse_iso(date_part)
        .or_else(|| parse_day_month_year(date_part))
        .or_else(|| parse_named_month(text))
}

/// `YYYY-MM-DD`
fn parse_iso(text: &str) -> Option<Date> {
    let mut parts = text.split('-');
    let year: &str = parts.next()?;
    let month: &str = parts.next()?;
    let day: &str = parts.next()?;

    if parts.next().is_some() || year.len() != 4 {
        return None;
    }

    build_date(year, month, day)
}

/// `DD/MM/YYYY`, `DD-MM-YYYY` or `DD.MM.YYYY`
fn parse_day_month_year(text: &str) -> Option<Date> {
    let separator: char = ['/', '-', '.']
        .into_iter()
        .find(|sep| text.contains(*sep))?;

    let mut parts = text.split(separator);
    let day: &str = parts.next()?;
    let month: &str = parts.next()?;
    let year: &str = parts.next()?;

    if parts.next().is_some() || year.len() != 4 {
        return None;
    }

    build_date(year, month, day)
}

/// `19 October 2026`, `19 Oct 2026`, `19-Oct-2026`
fn parse_named_month(text: &str) -> Option<Date> {
    let parts: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .filter(|p| !p.is_empty())
        .collect();

    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let month: Month = month_from_name(month)?;
    let day: u8 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;

    Date::from_calendar_date(year, month, day).ok()
}

fn month_from_name(name: &str) -> Option<Month> {
    let lower: String = name.to_lowercase();
    let prefix: &str = lower.get(..3)?;

    let month: Month = match prefix {
        "jan" => Month::January,
        "feb" => Month::February,
        "mar" => Month::March,
        "apr" => Month::April,
        "may" => Month::May,
        "jun" => Month::June,
        "jul" => Month::July,
        "aug" => Month::August,
        "sep" => Month::September,
        "oct" => Month::October,
        "nov" => Month::November,
        "dec" => Month::December,
        _ => return None,
    };

    Some(month)
}

fn build_date(year: &str, month: &str, day: &str) -> Option<Date> {
    let year: i32 = year.parse().ok()?;
    let month: Month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    let day: u8 = day.parse().ok()?;

    Date::from_calendar_date(year, month, day).ok()
}

/// Currency symbols tolerated before or after a money amount.
const CURRENCY_SYMBOLS: [char; 6] = ['$', '€', '£', '¥', '₹', '¢'];

/// Longest leading currency code, e.g. `R` or `ZAR`.
const MAX_CURRENCY_CODE_LEN: usize = 3;

/// Parses a money cell.
///
/// A leading currency code, currency symbols and spaces are ignored.
/// Thousands may be grouped with `,` (or `.` when the amount uses a decimal
/// comma); a final `,` followed by one or two digits is a decimal comma.
/// Empty cells are zero.
///
/// # Errors
///
/// Returns `ImportError::InvalidAmount` if anything other than a plain
/// grouped number remains, or `ImportError::NegativeAmount` for negative
/// values.
pub fn parse_money_cell(cell: &str) -> Result<f64, ImportError> {
    let cell: &str = cell.trim();
    if cell.is_empty() {
        return Ok(0.0);
    }

    let invalid = || ImportError::InvalidAmount {
        value: cell.to_string(),
    };

    let (outer_sign, unsigned) = split_sign(cell);
    let (inner_sign, amount) = split_sign(strip_currency(unsigned));
    if outer_sign && inner_sign {
        return Err(invalid());
    }

    let digits: String = amount.chars().filter(|c| !c.is_whitespace()).collect();
    let value: f64 = parse_grouped_number(&digits).ok_or_else(invalid)?;

    if (outer_sign || inner_sign) && value > 0.0 {
        return Err(ImportError::NegativeAmount {
            value: cell.to_string(),
        });
    }

    Ok(value)
}

fn split_sign(text: &str) -> (bool, &str) {
    text.strip_prefix('-')
        .map_or((false, text), |rest| (true, rest.trim_start()))
}

fn strip_currency(text: &str) -> &str {
    let is_symbol = |c: char| c.is_whitespace() || CURRENCY_SYMBOLS.contains(&c);
    let text: &str = text.trim_matches(is_symbol);

    let code_len: usize = text.chars().take_while(char::is_ascii_alphabetic).count();
    if (1..=MAX_CURRENCY_CODE_LEN).contains(&code_len) {
        // ASCII letters are one byte each
        text[code_len..].trim_start_matches(is_symbol)
    } else {
        text
    }
}

/// Parses `1234`, `1,234.50` or `1.234,50` into a number.
fn parse_grouped_number(text: &str) -> Option<f64> {
    let (decimal, thousands): (char, char) = if has_decimal_comma(text) {
        (',', '.')
    } else {
        ('.', ',')
    };

    let (integer, fraction): (&str, Option<&str>) = match text.split_once(decimal) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    let groups: Vec<&str> = integer.split(thousands).collect();
    let grouped: bool = match groups.as_slice() {
        [single] => all_digits(*single),
        [first, rest @ ..] => {
            first.len() <= 3
                && all_digits(*first)
                && rest.iter().all(|group| group.len() == 3 && all_digits(*group))
        }
        [] => false,
    };

    if !grouped || fraction.is_some_and(|f| !all_digits(f)) {
        return None;
    }

    let whole: String = groups.concat();
    match fraction {
        Some(fraction) => format!("{whole}.{fraction}").parse().ok(),
        None => whole.parse().ok(),
    }
}

fn has_decimal_comma(text: &str) -> bool {
    text.rsplit_once(',').is_some_and(|(_, tail)| {
        (1..=2).contains(&tail.len()) && tail.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Returns the trimmed cell text, or `None` for blank cells.
#[must_use]
pub fn optional_text(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
