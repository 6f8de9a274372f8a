//! Extract the loss column from experiment log lines.
//!
//! Each line holds whitespace-separated numeric fields; only the third field
//! (index 2) is consumed:
//!
//! ```text
//! 12 0.8312 0.4527 0.9011
//!         ^^^^^^ ignored
//!        loss = 0.4527
//! ```

use thiserror::Error;

/// Zero-based index of the loss field in a log line.
pub const LOSS_COLUMN: usize = 2;

/// Error type for loss extraction failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line_number}: expected at least {} fields, found {found}: {line:?}", LOSS_COLUMN + 1)]
    MissingColumn {
        line_number: usize,
        found: usize,
        line: String,
    },
    #[error("line {line_number}: loss field {token:?} is not a number")]
    InvalidNumber { line_number: usize, token: String },
}

/// Parse the loss value out of one log line.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_loss_line(line: &str, line_number: usize) -> Result<f64, ParseError> {
    let mut fields = line.split_whitespace();
    let Some(token) = fields.nth(LOSS_COLUMN) else {
        return Err(ParseError::MissingColumn {
            line_number,
            found: line.split_whitespace().count(),
            line: line.to_string(),
        });
    };

    token.parse().map_err(|_| ParseError::InvalidNumber {
        line_number,
        token: token.to_string(),
    })
}

/// Parse every line into a loss series, stopping at the first bad line.
pub fn parse_loss_series<I, S>(lines: I) -> Result<Vec<f64>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| parse_loss_line(line.as_ref(), index + 1))
        .collect()
}
