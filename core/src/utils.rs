//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// EdgeGrid tokens share the `akab-` prefix, so keeping the tail is what lets
/// users tell two redacted tokens apart.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 || !self.0.is_char_boundary(3) || !self.0.is_char_boundary(length - 3)
        {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..3])?;
            f.write_str("***")?;
            f.write_str(&self.0[length - 3..])
        }
    }
}
