//! Export per-candidate lookup results to CSV.
//!
//! One row per (candidate, source) pair, easy to load in spreadsheets or
//! downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{LookupResult, TauCandidate};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::table::TableRegistry;

/// Write lookup results; `results[i]` holds one entry per source for `candidates[i]`.
pub fn write_lookup_csv(
    path: &Path,
    candidates: &[TauCandidate],
    registry: &TableRegistry,
    results: &[Vec<LookupResult>],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_RUNTIME,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;
    write_lookup_rows(file, candidates, registry, results)
}

/// Same as `write_lookup_csv`, to any writer. Fields holding commas, quotes
/// or newlines are quoted.
pub fn write_lookup_rows<W: Write>(
    out: W,
    candidates: &[TauCandidate],
    registry: &TableRegistry,
    results: &[Vec<LookupResult>],
) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["row", "id", "pt", "eta", "width", "source", "bin_index", "value", "uncertainty"])
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to write export CSV header: {e}")))?;

    for (row, (candidate, per_source)) in candidates.iter().zip(results).enumerate() {
        for (table, r) in registry.iter().zip(per_source) {
            wtr.write_record(&[
                row.to_string(),
                candidate.id.clone().unwrap_or_default(),
                candidate.pt.to_string(),
                candidate.eta.to_string(),
                candidate.width.to_string(),
                table.name().to_string(),
                r.bin_index.to_string(),
                format!("{:.10}", r.value),
                format!("{:.10}", r.uncertainty),
            ])
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    wtr.flush()
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceSpec;
    use crate::io::store::InMemoryStore;
    use crate::table::GridData;

    #[test]
    fn writes_one_row_per_candidate_and_source() {
        let mut store = InMemoryStore::new();
        store.insert("a", GridData::filled(vec![0.0, 10.0], vec![-1.0, 1.0], vec![0.0, 1.0], 0.5, 0.05));
        let specs = vec![
            SourceSpec::new("first", "a", ["pt", "eta", "width"]),
            SourceSpec::new("second", "a", ["pt", "eta", "width"]),
        ];
        let registry = TableRegistry::build(&specs, &store).unwrap();

        let mut tau = TauCandidate::new(5.0, 0.0, 0.5);
        tau.id = Some("t0".to_string());
        let candidates = vec![tau];
        let results: Vec<Vec<LookupResult>> = candidates.iter().map(|c| registry.lookup_all(c)).collect();

        let mut buf = Vec::new();
        write_lookup_rows(&mut buf, &candidates, &registry, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0,t0,5,0,0.5,first,"));
        assert!(lines[2].contains(",second,"));
        assert!(lines[2].ends_with("0.5000000000,0.0500000000"));
    }

    #[test]
    fn ids_and_names_with_delimiters_stay_one_field() {
        let mut store = InMemoryStore::new();
        store.insert("a", GridData::filled(vec![0.0, 10.0], vec![-1.0, 1.0], vec![0.0, 1.0], 0.5, 0.05));
        let specs = vec![SourceSpec::new("eff \"tight\", v2", "a", ["pt", "eta", "width"])];
        let registry = TableRegistry::build(&specs, &store).unwrap();

        let mut tau = TauCandidate::new(5.0, 0.0, 0.5);
        tau.id = Some("tau,1".to_string());
        let candidates = vec![tau, TauCandidate::new(15.0, 0.0, 0.5)];
        let results: Vec<Vec<LookupResult>> = candidates.iter().map(|c| registry.lookup_all(c)).collect();

        let mut buf = Vec::new();
        write_lookup_rows(&mut buf, &candidates, &registry, &results).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        assert_eq!(rdr.headers().unwrap().len(), 9);
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.len(), 9);
            assert_eq!(&record[5], "eff \"tight\", v2");
        }
        assert_eq!(&records[0][1], "tau,1");
        assert_eq!(&records[1][1], "");
        assert_eq!(&records[1][6], &results[1][0].bin_index.to_string());
    }
}
