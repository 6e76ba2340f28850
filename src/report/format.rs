//! Terminal formatting.
//!
//! Kept in one place so the table code stays free of presentation details.

use crate::binning::{Axis, AxisEdges};
use crate::domain::{LookupResult, TauCandidate};
use crate::report::SourceOccupancy;
use crate::table::TableRegistry;

/// Describe every source: location, axis bindings and binning.
pub fn format_registry_summary(registry: &TableRegistry) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== effmap - {} efficiency source(s) ===\n", registry.len()));

    for (index, table) in registry.iter().enumerate() {
        out.push_str(&format!(
            "\n[{index}] {}  (location: {})\n",
            table.name(),
            table.location()
        ));
        for axis in Axis::ALL {
            let edges = table.grid().axis(axis);
            out.push_str(&format!(
                "  {axis}: {:<6} {:>3} bins  {}\n",
                table.var(axis).name(),
                edges.n_bins(),
                fmt_edges(edges),
            ));
        }
        out.push_str(&format!("  cells (incl. flows): {}\n", table.grid().n_cells()));
    }

    out
}

/// One row per candidate, one value/uncertainty column pair per source.
pub fn format_lookup_table(
    candidates: &[TauCandidate],
    registry: &TableRegistry,
    results: &[Vec<LookupResult>],
    max_rows: usize,
) -> String {
    let mut out = String::new();

    let mut header = format!("{:<12} {:>9} {:>7} {:>7}", "id", "pt", "eta", "width");
    let mut rule = format!("{:-<12} {:-<9} {:-<7} {:-<7}", "", "", "", "");
    for name in registry.names() {
        header.push_str(&format!(" {:>22}", truncate(name, 22)));
        rule.push_str(&format!(" {:-<22}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (candidate, per_source) in candidates.iter().zip(results).take(max_rows) {
        let mut line = format!(
            "{:<12} {:>9.2} {:>7.3} {:>7.3}",
            truncate(candidate.id.as_deref().unwrap_or("-"), 12),
            candidate.pt,
            candidate.eta,
            candidate.width,
        );
        for r in per_source {
            line.push_str(&format!(" {:>22}", fmt_lookup(r)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if candidates.len() > max_rows {
        out.push_str(&format!("... {} more row(s)\n", candidates.len() - max_rows));
    }

    out
}

/// Scan summary: one block per source.
pub fn format_scan_summary(occupancies: &[SourceOccupancy]) -> String {
    let mut out = String::new();
    for occ in occupancies {
        out.push_str(&format!("{}\n", occ.source));
        out.push_str(&format!(
            "  lookups={} distinct_bins={} flow={:.1}% mean_eff={:.4}\n",
            occ.lookups,
            occ.distinct_bins,
            100.0 * occ.flow_fraction(),
            occ.mean_value,
        ));
        if !occ.top_bins.is_empty() {
            let parts: Vec<String> = occ
                .top_bins
                .iter()
                .map(|(bin, n)| format!("{bin}:{n}"))
                .collect();
            out.push_str(&format!("  top bins: {}\n", parts.join(" ")));
        }
    }
    out
}

fn fmt_lookup(r: &LookupResult) -> String {
    format!("{:.4}±{:.4} #{}", r.value, r.uncertainty, r.bin_index)
}

fn fmt_edges(edges: &AxisEdges) -> String {
    let e = edges.edges();
    if e.len() <= 8 {
        let parts: Vec<String> = e.iter().map(|x| format!("{x}")).collect();
        return format!("[{}]", parts.join(", "));
    }
    format!("[{}, {}, ..., {}, {}]", e[0], e[1], e[e.len() - 2], e[e.len() - 1])
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceSpec;
    use crate::io::store::InMemoryStore;
    use crate::table::GridData;

    fn registry() -> TableRegistry {
        let mut store = InMemoryStore::new();
        let many: Vec<f64> = (0..12).map(|i| i as f64 * 10.0).collect();
        store.insert("a", GridData::filled(many, vec![-2.5, 2.5], vec![0.0, 1.0], 0.7, 0.1));
        TableRegistry::build(&[SourceSpec::new("DecayModeEff", "a", ["pt", "eta", "width"])], &store).unwrap()
    }

    #[test]
    fn summary_lists_axes() {
        let text = format_registry_summary(&registry());
        assert!(text.contains("[0] DecayModeEff"));
        assert!(text.contains("x: pt"));
        assert!(text.contains("[0, 10, ..., 100, 110]"));
        assert!(text.contains("z: width"));
    }

    #[test]
    fn lookup_table_truncates_rows() {
        let registry = registry();
        let taus: Vec<TauCandidate> = (0..5).map(|i| TauCandidate::new(i as f64 * 7.0, 0.0, 0.5)).collect();
        let results: Vec<Vec<LookupResult>> = taus.iter().map(|t| registry.lookup_all(t)).collect();
        let text = format_lookup_table(&taus, &registry, &results, 3);
        assert_eq!(text.lines().count(), 2 + 3 + 1);
        assert!(text.contains("0.7000±0.1000"));
        assert!(text.ends_with("... 2 more row(s)\n"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd.");
    }
}
