//! Ordered collection of efficiency tables, one per declared source.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::info;

use crate::domain::{Kinematics, LookupResult, SourceSpec};
use crate::error::TableError;
use crate::io::store::GridStore;
use crate::table::efficiency::{EfficiencyTable, resolve_vars};

/// Tables indexed by declaration order.
///
/// Built once and read-only afterwards; shared across threads by reference.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: Vec<EfficiencyTable>,
}

impl TableRegistry {
    /// Build every table in declaration order.
    ///
    /// The first failure aborts the whole build; no partial registry is returned.
    /// Names and axis variables of every spec are checked before any grid is loaded.
    pub fn build<S: GridStore + ?Sized>(specs: &[SourceSpec], store: &S) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(specs.len());
        let mut resolved = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(TableError::DuplicateSource(spec.name.clone()));
            }
            resolved.push(resolve_vars(spec)?);
        }

        let mut tables = Vec::with_capacity(specs.len());
        for (spec, vars) in specs.iter().zip(resolved) {
            let table = EfficiencyTable::build_resolved(spec, vars, store)?;
            info!(
                source = %spec.name,
                location = %spec.location,
                cells = table.grid().n_cells(),
                "loaded efficiency source"
            );
            tables.push(table);
        }

        Ok(Self { tables })
    }

    /// Look up source `index` for a candidate.
    ///
    /// # Panics
    /// Panics if `index >= len()`; source indices come from declaration order.
    #[inline]
    pub fn query<C: Kinematics + ?Sized>(&self, index: usize, candidate: &C) -> LookupResult {
        debug_assert!(
            index < self.tables.len(),
            "efficiency source index {index} out of range ({} sources)",
            self.tables.len()
        );
        self.tables[index].lookup(candidate)
    }

    /// One lookup per source, in declaration order.
    pub fn lookup_all<C: Kinematics + ?Sized>(&self, candidate: &C) -> Vec<LookupResult> {
        self.tables.iter().map(|t| t.lookup(candidate)).collect()
    }

    /// Look up source `index` for many candidates in parallel; output order
    /// matches input order.
    ///
    /// # Panics
    /// Panics if `index >= len()`, like `query`.
    pub fn lookup_batch<C: Kinematics + Sync>(&self, index: usize, candidates: &[C]) -> Vec<LookupResult> {
        debug_assert!(
            index < self.tables.len(),
            "efficiency source index {index} out of range ({} sources)",
            self.tables.len()
        );
        let table = &self.tables[index];
        candidates.par_iter().map(|c| table.lookup(c)).collect()
    }

    /// Index of the source called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name() == name)
    }

    pub fn get(&self, index: usize) -> Option<&EfficiencyTable> {
        self.tables.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EfficiencyTable> {
        self.tables.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
