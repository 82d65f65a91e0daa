//! Parsing host color text into [`Color`].
//!
//! Accepted forms, case-insensitive with surrounding whitespace ignored:
//!
//! - `#rgb` and `#rrggbb`
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)` with numeric channels
//! - CSS named colors (`navy`, `tomato`, ...)

use std::str::FromStr;

use palette::Srgb;

use crate::color::Color;
use crate::error::CorrectionError;

/// Parse a color string as a document host would report it.
pub fn parse_color(text: &str) -> Result<Color, CorrectionError> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with('#') {
        return parse_hex(trimmed);
    }
    if let Some(args) = functional_args(&lower, "rgba").or_else(|| functional_args(&lower, "rgb")) {
        return parse_functional(text, args);
    }
    if let Some(named) = palette::named::from_str(&lower) {
        return Ok(Color::rgb(named.red, named.green, named.blue));
    }

    Err(parse_error(text, "unrecognised color syntax"))
}

fn parse_hex(text: &str) -> Result<Color, CorrectionError> {
    let rgb = Srgb::<u8>::from_str(text).map_err(|e| parse_error(text, e))?;
    Ok(Color::rgb(rgb.red, rgb.green, rgb.blue))
}

/// Body between the parentheses of `name(...)`, if `text` has that form.
fn functional_args<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_functional(text: &str, args: &str) -> Result<Color, CorrectionError> {
    let values = args
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| parse_error(text, format!("{part:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        &[r, g, b] => Ok(Color::new(r, g, b, 1.0)),
        &[r, g, b, a] => Ok(Color::new(r, g, b, a)),
        other => Err(parse_error(
            text,
            format!("expected 3 or 4 components, found {}", other.len()),
        )),
    }
}

fn parse_error(input: &str, reason: impl ToString) -> CorrectionError {
    CorrectionError::ParseColor {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
