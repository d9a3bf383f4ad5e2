//! Parser for the ESRI ASCIIGrid raster text format.
//!
//! ASCIIGrid is a plain-text raster convention: a fixed six-line header
//! (`ncols`, `nrows`, `xllcorner`, `yllcorner`, `cellsize`, `NODATA_value`)
//! followed by `nrows` lines of `ncols` space-separated samples, row-major
//! from the top row down (x-ascending, y-descending).
//!
//! # Parsing policy
//!
//! Header fields are extracted with a permissive numeric-literal scan, so
//! the label prefix and any surrounding whitespace are ignored. The NODATA
//! sentinel is kept as the literal token and compared against data tokens
//! by exact textual equality: a token that is numerically equal to the
//! sentinel but spelled differently (`-9999.0` vs `-9999`) is a regular
//! sample, not a missing one. Data tokens that fail to parse as a finite
//! number become missing samples rather than aborting the parse; a
//! truncated or garbled header, and a sample count that does not match the
//! declared dimensions, fail fast.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for ASCIIGrid parsing.
pub type AscGridResult<T> = Result<T, AscGridError>;

/// Errors raised while parsing an ASCIIGrid document.
#[derive(Debug, Error)]
pub enum AscGridError {
    /// A header line is missing or carries no usable value.
    #[error("malformed ASCIIGrid header at line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },

    /// The data section does not contain `ncols * nrows` samples.
    #[error("expected {expected} samples, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// The six-field ASCIIGrid header.
///
/// `nodata_value` is the literal sentinel token from the header line, not a
/// parsed number; missing-sample detection is textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AscGridHeader {
    /// Number of columns (samples per row).
    pub ncols: usize,
    /// Number of rows.
    pub nrows: usize,
    /// X coordinate of the lower-left corner of the extent.
    pub xllcorner: f64,
    /// Y coordinate of the lower-left corner of the extent.
    pub yllcorner: f64,
    /// Spacing between adjacent samples, in coordinate units.
    pub cellsize: f64,
    /// Literal NODATA sentinel token.
    pub nodata_value: String,
}

/// A parsed ASCIIGrid document: header plus flat samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AscGrid {
    pub header: AscGridHeader,
    /// Samples in row-major order, top row first; `None` marks missing data.
    pub samples: Vec<Option<f64>>,
}

/// Parse an ASCIIGrid document from already-loaded text.
///
/// Data lines are read until the first blank line or end of input;
/// anything after a blank line is ignored.
pub fn parse(text: &str) -> AscGridResult<AscGrid> {
    let mut lines = text.lines();

    let ncols = header_usize(lines.next(), 1, "ncols")?;
    let nrows = header_usize(lines.next(), 2, "nrows")?;
    let xllcorner = header_f64(lines.next(), 3, "xllcorner")?;
    let yllcorner = header_f64(lines.next(), 4, "yllcorner")?;
    let cellsize = header_f64(lines.next(), 5, "cellsize")?;
    let nodata_value = nodata_token(lines.next())?;

    let header = AscGridHeader {
        ncols,
        nrows,
        xllcorner,
        yllcorner,
        cellsize,
        nodata_value,
    };

    let mut samples = Vec::with_capacity(ncols * nrows);
    let mut unparseable = 0usize;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        // The format contract is single-space separation; an empty token
        // from a doubled space is just another unparseable sample.
        for token in line.split(' ') {
            if token == header.nodata_value {
                samples.push(None);
            } else {
                match token.parse::<f64>() {
                    Ok(z) if z.is_finite() => samples.push(Some(z)),
                    Ok(_) => samples.push(None),
                    Err(_) => {
                        unparseable += 1;
                        samples.push(None);
                    }
                }
            }
        }
    }

    if unparseable > 0 {
        warn!(count = unparseable, "unparseable data tokens treated as missing");
    }

    let expected = ncols * nrows;
    if samples.len() != expected {
        return Err(AscGridError::DimensionMismatch {
            expected,
            actual: samples.len(),
        });
    }

    debug!(
        ncols,
        nrows,
        xllcorner,
        yllcorner,
        cellsize,
        nodata = %header.nodata_value,
        "parsed ASCIIGrid"
    );

    Ok(AscGrid { header, samples })
}

/// Extract the first numeric literal from a header line, ignoring the label.
///
/// Accepts an optional leading sign, a decimal fraction, and an exponent.
fn numeric_literal(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        let mut j = i;
        if bytes[j] == b'-' {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'.' {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
            }
            if j + 1 < bytes.len()
                && (bytes[j] == b'e' || bytes[j] == b'E')
                && exponent_len(&bytes[j + 1..]) > 0
            {
                j += 1 + exponent_len(&bytes[j + 1..]);
            }
            return Some(&line[start..j]);
        }
        i += 1;
    }
    None
}

/// Length of an exponent body (`+`/`-` sign plus digits) at the start of
/// `bytes`, or 0 if there is none.
fn exponent_len(bytes: &[u8]) -> usize {
    let mut k = 0;
    if k < bytes.len() && (bytes[k] == b'+' || bytes[k] == b'-') {
        k += 1;
    }
    let digits_start = k;
    while k < bytes.len() && bytes[k].is_ascii_digit() {
        k += 1;
    }
    if k == digits_start {
        0
    } else {
        k
    }
}

fn header_f64(line: Option<&str>, line_no: usize, label: &str) -> AscGridResult<f64> {
    let line = line.ok_or_else(|| AscGridError::MalformedHeader {
        line: line_no,
        reason: format!("missing {label} line"),
    })?;
    let literal = numeric_literal(line).ok_or_else(|| AscGridError::MalformedHeader {
        line: line_no,
        reason: format!("no numeric value for {label} in {line:?}"),
    })?;
    literal.parse::<f64>().map_err(|e| AscGridError::MalformedHeader {
        line: line_no,
        reason: format!("{label}: {e}"),
    })
}

fn header_usize(line: Option<&str>, line_no: usize, label: &str) -> AscGridResult<usize> {
    let value = header_f64(line, line_no, label)?;
    if value < 1.0 {
        return Err(AscGridError::MalformedHeader {
            line: line_no,
            reason: format!("{label} must be a positive integer, got {value}"),
        });
    }
    Ok(value as usize)
}

fn nodata_token(line: Option<&str>) -> AscGridResult<String> {
    let line = line.ok_or(AscGridError::MalformedHeader {
        line: 6,
        reason: "missing NODATA_value line".to_string(),
    })?;
    let token = line.replace("NODATA_value", "");
    let token = token.trim();
    if token.is_empty() {
        return Err(AscGridError::MalformedHeader {
            line: 6,
            reason: "empty NODATA_value token".to_string(),
        });
    }
    Ok(token.to_string())
}
