use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Upper bound of the sub-score scale (scores are "out of 10").
pub const MAX_SCORE: f64 = 10.0;

/// A single validated ESG sub-score in `[0, 10]`.
///
/// On the wire sub-scores travel as `"<value>/10"` strings. They are parsed
/// once at intake; everything past the boundary works with this type.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SubScore(f64);

impl SubScore {
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() || !(0.0..=MAX_SCORE).contains(&value) {
            return Err(CoreError::InvalidScore {
                raw: value.to_string(),
                reason: format!("must be between 0 and {MAX_SCORE}"),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Parse the `"<value>/10"` encoding, tolerating unreadable input.
    ///
    /// Reads the longest numeric prefix after leading whitespace, so
    /// `"8abc/10"` is 8 and the denominator is never checked. Returns
    /// `Ok(None)` when there is no numeric prefix (the entry is skipped during
    /// aggregation), and an error when the number is outside `[0, 10]`.
    pub fn parse_lenient(raw: &str) -> Result<Option<Self>, CoreError> {
        match numeric_prefix(raw).parse::<f64>() {
            Ok(v) if v.is_nan() => Ok(None),
            Ok(v) => Self::new(v)
                .map(Some)
                .map_err(|_| CoreError::InvalidScore {
                    raw: raw.to_string(),
                    reason: format!("must be between 0 and {MAX_SCORE}"),
                }),
            Err(_) => Ok(None),
        }
    }
}

/// Longest prefix of `raw` (after leading whitespace) that reads as a decimal
/// literal: optional sign, then `Infinity` or digits with an optional
/// fraction and exponent.
fn numeric_prefix(raw: &str) -> &str {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return &s[..end + "Infinity".len()];
    }

    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &s[..end]
}

impl FromStr for SubScore {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)?.ok_or_else(|| CoreError::InvalidScore {
            raw: s.to_string(),
            reason: "expected a number of the form \"<value>/10\"".into(),
        })
    }
}

impl TryFrom<f64> for SubScore {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubScore> for f64 {
    fn from(score: SubScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for SubScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, MAX_SCORE)
    }
}
