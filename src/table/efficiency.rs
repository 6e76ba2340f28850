//! A single efficiency lookup table.
//!
//! Construction resolves the axis variable names, loads the grid from the
//! store and validates it. Any failure aborts construction. Once built, a
//! table is immutable and every lookup succeeds: coordinates outside the
//! binned range land in the under/overflow bins.

use tracing::debug;

use crate::binning::Axis;
use crate::domain::{BinCoord, Kinematics, KineVar, LookupResult, SourceSpec};
use crate::error::TableError;
use crate::io::store::{GridStore, StoreError};
use crate::table::grid::{Grid, GridBuildError, GridData};

/// Efficiency table for one source, with its axes bound to kinematic variables.
#[derive(Debug, Clone)]
pub struct EfficiencyTable {
    name: String,
    location: String,
    vars: [KineVar; 3],
    grid: Grid,
}

impl EfficiencyTable {
    /// Build a table from a declarative spec, loading its grid from `store`.
    ///
    /// Variable names are resolved before the store is touched, so a bad name
    /// is reported even when the location is also wrong.
    pub fn build<S: GridStore + ?Sized>(spec: &SourceSpec, store: &S) -> Result<Self, TableError> {
        let vars = resolve_vars(spec)?;
        Self::build_resolved(spec, vars, store)
    }

    /// Load and build with variables already resolved from `spec`.
    pub(crate) fn build_resolved<S: GridStore + ?Sized>(
        spec: &SourceSpec,
        vars: [KineVar; 3],
        store: &S,
    ) -> Result<Self, TableError> {
        let data = store.load(&spec.location).map_err(|err| match err {
            StoreError::NotFound { location } => TableError::SourceNotFound {
                source_name: spec.name.clone(),
                location,
            },
            other => TableError::Storage {
                source_name: spec.name.clone(),
                reason: other,
            },
        })?;

        Self::from_parts(&spec.name, &spec.location, vars, &data)
    }

    /// Build a table from already-loaded grid data.
    pub fn from_parts(
        name: &str,
        location: &str,
        vars: [KineVar; 3],
        data: &GridData,
    ) -> Result<Self, TableError> {
        let grid = Grid::from_data(data).map_err(|err| match err {
            GridBuildError::Edges(axis, reason) => TableError::InvalidEdges {
                source_name: name.to_string(),
                axis,
                reason,
            },
            GridBuildError::Dimension(detail) => TableError::DimensionMismatch {
                source_name: name.to_string(),
                detail,
            },
        })?;

        debug!(
            source = name,
            x = vars[0].name(),
            y = vars[1].name(),
            z = vars[2].name(),
            bins = ?(grid.x_axis().n_bins(), grid.y_axis().n_bins(), grid.z_axis().n_bins()),
            "built efficiency table"
        );

        Ok(Self {
            name: name.to_string(),
            location: location.to_string(),
            vars,
            grid,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Variable bound to `axis`.
    pub fn var(&self, axis: Axis) -> KineVar {
        match axis {
            Axis::X => self.vars[0],
            Axis::Y => self.vars[1],
            Axis::Z => self.vars[2],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Look up the efficiency for a candidate.
    #[inline]
    pub fn lookup<C: Kinematics + ?Sized>(&self, candidate: &C) -> LookupResult {
        self.lookup_coords(
            self.vars[0].value(candidate),
            self.vars[1].value(candidate),
            self.vars[2].value(candidate),
        )
    }

    /// Look up raw axis coordinates, bypassing the variable bindings.
    #[inline]
    pub fn lookup_coords(&self, x: f64, y: f64, z: f64) -> LookupResult {
        let bin_index = self.grid.global_bin(self.grid.locate(x, y, z));
        let cell = self.grid.cell(bin_index);
        LookupResult {
            value: cell.value,
            uncertainty: cell.uncertainty,
            bin_index,
        }
    }

    /// Per-axis bins for a candidate.
    pub fn locate<C: Kinematics + ?Sized>(&self, candidate: &C) -> BinCoord {
        self.grid.locate(
            self.vars[0].value(candidate),
            self.vars[1].value(candidate),
            self.vars[2].value(candidate),
        )
    }
}

pub(crate) fn resolve_vars(spec: &SourceSpec) -> Result<[KineVar; 3], TableError> {
    let resolve = |axis: Axis, var_name: &str| {
        KineVar::from_name(var_name).ok_or_else(|| TableError::NameResolution {
            source_name: spec.name.clone(),
            axis,
            var_name: var_name.to_string(),
        })
    };
    Ok([
        resolve(Axis::X, &spec.x_axis.var_name)?,
        resolve(Axis::Y, &spec.y_axis.var_name)?,
        resolve(Axis::Z, &spec.z_axis.var_name)?,
    ])
}
