//! Candidate CSV ingest.
//!
//! Turns a CSV of tau candidates into `TauCandidate`s:
//! - **Strict schema** for the `pt`, `eta`, `width` columns (exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - optional `id` column carried through to reports

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::domain::TauCandidate;
use crate::error::{AppError, EXIT_USAGE};

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: parsed candidates + skipped rows.
#[derive(Debug, Clone)]
pub struct IngestedCandidates {
    pub candidates: Vec<TauCandidate>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load candidates from a CSV file.
pub fn load_candidates(path: &Path) -> Result<IngestedCandidates, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to open candidate CSV '{}': {e}", path.display()),
        )
    })?;
    read_candidates(file)
}

/// Parse candidates from any CSV reader.
pub fn read_candidates<R: Read>(input: R) -> Result<IngestedCandidates, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for column in ["pt", "eta", "width"] {
        if !header_map.contains_key(column) {
            return Err(AppError::new(
                EXIT_USAGE,
                format!("Missing required column: `{column}`"),
            ));
        }
    }

    let mut candidates = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based after it.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(candidate) => candidates.push(candidate),
            Err(message) => row_errors.push(RowError {
                line,
                id: get_optional(&record, &header_map, "id").map(str::to_string),
                message,
            }),
        }
    }

    for err in &row_errors {
        warn!(line = err.line, id = ?err.id, "skipping candidate row: {}", err.message);
    }

    if candidates.is_empty() {
        return Err(AppError::new(EXIT_USAGE, "No valid candidate rows in CSV."));
    }

    Ok(IngestedCandidates {
        candidates,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<TauCandidate, String> {
    // Infinite coordinates are legal (they land in flow bins); NaN and junk are not.
    let number = |column: &str| -> Result<f64, String> {
        let raw = get_optional(record, header_map, column)
            .ok_or_else(|| format!("Missing `{column}` value."))?;
        match raw.parse::<f64>() {
            Ok(v) if !v.is_nan() => Ok(v),
            _ => Err(format!("Invalid `{column}` value '{raw}'.")),
        }
    };

    Ok(TauCandidate {
        id: get_optional(record, header_map, "id").map(str::to_string),
        pt: number("pt")?,
        eta: number("eta")?,
        width: number("width")?,
    })
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = *header_map.get(name)?;
    let value = record.get(idx)?;
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_candidates_with_optional_ids() {
        let csv = "id,pt,eta,width\ntau1,25.0,-1.1,0.05\n,40,0.3,0.12\n";
        let ingest = read_candidates(csv.as_bytes()).unwrap();
        assert_eq!(ingest.rows_read, 2);
        assert!(ingest.row_errors.is_empty());
        assert_eq!(ingest.candidates[0].id.as_deref(), Some("tau1"));
        assert_eq!(ingest.candidates[1].id, None);
        assert_eq!(ingest.candidates[1].pt, 40.0);
    }

    #[test]
    fn header_names_are_normalized() {
        let csv = "\u{feff}PT , Eta,WIDTH\n10,0,0.1\n";
        let ingest = read_candidates(csv.as_bytes()).unwrap();
        assert_eq!(ingest.candidates.len(), 1);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "id,pt,eta,width\na,10,0,0.1\nb,abc,0,0.1\nc,10,,0.1\nd,inf,0,0.1\n";
        let ingest = read_candidates(csv.as_bytes()).unwrap();
        assert_eq!(ingest.candidates.len(), 2);
        assert_eq!(ingest.row_errors.len(), 2);
        assert_eq!(ingest.row_errors[0].line, 3);
        assert_eq!(ingest.row_errors[0].id.as_deref(), Some("b"));
        assert!(ingest.candidates[1].pt.is_infinite());
    }

    #[test]
    fn missing_column_is_usage_error() {
        let err = read_candidates("pt,eta\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert!(err.to_string().contains("width"));
    }
}
