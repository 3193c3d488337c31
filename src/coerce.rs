//! Conversion of resolved values to typed results

use crate::error::{IniError, Result};
use std::str::FromStr;

const TRUE_WORDS: [&str; 4] = ["1", "yes", "true", "on"];
const FALSE_WORDS: [&str; 4] = ["0", "no", "false", "off"];

/// Parses the whole trimmed value as an integer type
pub fn parse_integer<T: FromStr>(value: &str) -> Result<T> {
    parse_whole(value, "int")
}

/// Parses the whole trimmed value as a floating point type
pub fn parse_float<T: FromStr>(value: &str) -> Result<T> {
    parse_whole(value, "float")
}

/// Parses `1/yes/true/on` and `0/no/false/off`, ignoring ASCII case
pub fn parse_bool(value: &str) -> Result<bool> {
    let word = value.trim();
    if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
        Ok(true)
    } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
        Ok(false)
    } else {
        Err(conversion_error(value, "boolean"))
    }
}

fn parse_whole<T: FromStr>(value: &str, expected: &'static str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| conversion_error(value, expected))
}

fn conversion_error(value: &str, expected: &'static str) -> IniError {
    IniError::ValueConversion {
        value: value.to_string(),
        expected,
    }
}
