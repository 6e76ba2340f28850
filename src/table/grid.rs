//! 3-D grid of `(value, uncertainty)` cells and the raw grid payload.
//!
//! Cells are stored for every bin including under/overflow, flattened with
//! x varying fastest:
//!
//! ```text
//! global = bx + (nx + 2) * (by + (ny + 2) * bz)
//! ```
//!
//! which is the global-bin numbering archived 3-D histograms use, so bin
//! indices stay comparable with tables produced by other tools.

use serde::{Deserialize, Serialize};

use crate::binning::{Axis, AxisEdges};
use crate::domain::BinCoord;
use crate::error::EdgeError;

/// Axis binning as supplied by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisData {
    /// Variable-width bins.
    Edges { edges: Vec<f64> },
    /// `bins` equal-width bins over `[min, max)`.
    Uniform { bins: usize, min: f64, max: f64 },
}

impl AxisData {
    pub fn to_edges(&self) -> Result<AxisEdges, EdgeError> {
        match self {
            AxisData::Edges { edges } => AxisEdges::new(edges.clone()),
            AxisData::Uniform { bins, min, max } => AxisEdges::uniform(*bins, *min, *max),
        }
    }
}

/// Raw grid payload returned by a `GridStore`.
///
/// `contents` (and `errors`/`sumw2` when present) hold one entry per cell
/// including flow bins, in global-bin order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridData {
    pub x: AxisData,
    pub y: AxisData,
    pub z: AxisData,
    pub contents: Vec<f64>,
    /// Explicit per-cell uncertainties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<f64>>,
    /// Per-cell sum of squared weights; uncertainty is `sqrt(sumw2)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sumw2: Option<Vec<f64>>,
}

impl GridData {
    /// A grid with every cell (flows included) set to `value ± error`.
    pub fn filled(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, value: f64, error: f64) -> Self {
        let n_cells = (x.len() + 1) * (y.len() + 1) * (z.len() + 1);
        Self {
            x: AxisData::Edges { edges: x },
            y: AxisData::Edges { edges: y },
            z: AxisData::Edges { edges: z },
            contents: vec![value; n_cells],
            errors: Some(vec![error; n_cells]),
            sumw2: None,
        }
    }
}

/// One stored cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub value: f64,
    pub uncertainty: f64,
}

/// Why a payload could not be turned into a `Grid`.
#[derive(Debug, Clone, PartialEq)]
pub enum GridBuildError {
    Edges(Axis, EdgeError),
    Dimension(String),
}

/// Immutable 3-D grid with its axes.
#[derive(Debug, Clone)]
pub struct Grid {
    x: AxisEdges,
    y: AxisEdges,
    z: AxisEdges,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from a store payload, deep-copying everything.
    pub fn from_data(data: &GridData) -> Result<Self, GridBuildError> {
        let x = data.x.to_edges().map_err(|e| GridBuildError::Edges(Axis::X, e))?;
        let y = data.y.to_edges().map_err(|e| GridBuildError::Edges(Axis::Y, e))?;
        let z = data.z.to_edges().map_err(|e| GridBuildError::Edges(Axis::Z, e))?;

        let expected = x.n_bins_with_flows() * y.n_bins_with_flows() * z.n_bins_with_flows();
        check_len("contents", data.contents.len(), expected, &x, &y, &z)?;
        if let Some(errors) = &data.errors {
            check_len("errors", errors.len(), expected, &x, &y, &z)?;
        }
        if let Some(sumw2) = &data.sumw2 {
            check_len("sumw2", sumw2.len(), expected, &x, &y, &z)?;
        }

        let cells = data
            .contents
            .iter()
            .enumerate()
            .map(|(i, &value)| Cell {
                value,
                uncertainty: cell_uncertainty(data, i, value),
            })
            .collect();

        Ok(Self { x, y, z, cells })
    }

    pub fn x_axis(&self) -> &AxisEdges {
        &self.x
    }

    pub fn y_axis(&self) -> &AxisEdges {
        &self.y
    }

    pub fn z_axis(&self) -> &AxisEdges {
        &self.z
    }

    pub fn axis(&self, axis: Axis) -> &AxisEdges {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Total number of stored cells, flows included.
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Locate raw coordinates on all three axes.
    #[inline]
    pub fn locate(&self, x: f64, y: f64, z: f64) -> BinCoord {
        BinCoord {
            x: self.x.find_bin(x),
            y: self.y.find_bin(y),
            z: self.z.find_bin(z),
        }
    }

    /// Flatten per-axis bins to the global bin number.
    #[inline]
    pub fn global_bin(&self, coord: BinCoord) -> usize {
        let nx = self.x.n_bins_with_flows();
        let ny = self.y.n_bins_with_flows();
        coord.x + nx * (coord.y + ny * coord.z)
    }

    /// Inverse of `global_bin`.
    pub fn coord_of(&self, global: usize) -> BinCoord {
        let nx = self.x.n_bins_with_flows();
        let ny = self.y.n_bins_with_flows();
        BinCoord {
            x: global % nx,
            y: (global / nx) % ny,
            z: global / (nx * ny),
        }
    }

    /// True if any axis of the global bin is an under/overflow bin.
    pub fn is_flow(&self, global: usize) -> bool {
        let c = self.coord_of(global);
        self.x.is_flow_bin(c.x) || self.y.is_flow_bin(c.y) || self.z.is_flow_bin(c.z)
    }

    /// Stored cell for a global bin number.
    ///
    /// # Panics
    /// Panics if `global >= n_cells()`; bins produced by `global_bin` are always valid.
    #[inline]
    pub fn cell(&self, global: usize) -> Cell {
        self.cells[global]
    }
}

fn check_len(
    what: &str,
    got: usize,
    expected: usize,
    x: &AxisEdges,
    y: &AxisEdges,
    z: &AxisEdges,
) -> Result<(), GridBuildError> {
    if got == expected {
        return Ok(());
    }
    Err(GridBuildError::Dimension(format!(
        "{what} has {got} cells but axes with {}x{}x{} bins need {expected} ({}x{}x{} including under/overflow)",
        x.n_bins(),
        y.n_bins(),
        z.n_bins(),
        x.n_bins_with_flows(),
        y.n_bins_with_flows(),
        z.n_bins_with_flows(),
    )))
}

/// Explicit errors win; then `sqrt(sumw2)`; otherwise Poisson `sqrt(|content|)`.
fn cell_uncertainty(data: &GridData, i: usize, value: f64) -> f64 {
    if let Some(errors) = &data.errors {
        return errors[i];
    }
    if let Some(sumw2) = &data.sumw2 {
        return sumw2[i].abs().sqrt();
    }
    value.abs().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_data() -> GridData {
        GridData::filled(
            vec![0.0, 10.0, 20.0, 30.0],
            vec![-2.5, 0.0, 2.5],
            vec![0.0, 0.1],
            1.0,
            0.1,
        )
    }

    #[test]
    fn cell_count_includes_flows() {
        let grid = Grid::from_data(&small_data()).unwrap();
        assert_eq!(grid.n_cells(), 5 * 4 * 3);
    }

    #[test]
    fn global_bin_is_x_fastest() {
        let grid = Grid::from_data(&small_data()).unwrap();
        let origin = grid.global_bin(BinCoord { x: 0, y: 0, z: 0 });
        assert_eq!(origin, 0);
        assert_eq!(grid.global_bin(BinCoord { x: 1, y: 0, z: 0 }), 1);
        assert_eq!(grid.global_bin(BinCoord { x: 0, y: 1, z: 0 }), 5);
        assert_eq!(grid.global_bin(BinCoord { x: 0, y: 0, z: 1 }), 20);
        assert_eq!(grid.global_bin(BinCoord { x: 2, y: 3, z: 1 }), 2 + 5 * (3 + 4));
    }

    #[test]
    fn coord_of_inverts_global_bin() {
        let grid = Grid::from_data(&small_data()).unwrap();
        for global in 0..grid.n_cells() {
            assert_eq!(grid.global_bin(grid.coord_of(global)), global);
        }
    }

    #[test]
    fn flow_detection() {
        let grid = Grid::from_data(&small_data()).unwrap();
        assert!(grid.is_flow(grid.global_bin(BinCoord { x: 0, y: 1, z: 1 })));
        assert!(grid.is_flow(grid.global_bin(BinCoord { x: 2, y: 1, z: 2 })));
        assert!(!grid.is_flow(grid.global_bin(BinCoord { x: 2, y: 1, z: 1 })));
    }

    #[test]
    fn contents_size_mismatch_is_rejected() {
        let mut data = small_data();
        data.contents.pop();
        assert!(matches!(
            Grid::from_data(&data),
            Err(GridBuildError::Dimension(_))
        ));

        let mut data = small_data();
        data.errors = Some(vec![0.1; 3]);
        assert!(matches!(
            Grid::from_data(&data),
            Err(GridBuildError::Dimension(_))
        ));
    }

    #[test]
    fn uncertainty_falls_back_to_sumw2_then_poisson() {
        let mut data = small_data();
        data.errors = None;
        data.contents = vec![4.0; 60];
        data.sumw2 = Some(vec![0.25; 60]);
        let grid = Grid::from_data(&data).unwrap();
        assert_eq!(grid.cell(7).uncertainty, 0.5);

        data.sumw2 = None;
        let grid = Grid::from_data(&data).unwrap();
        assert_eq!(grid.cell(7).uncertainty, 2.0);
    }

    #[test]
    fn uniform_axis_payload() {
        let data = GridData {
            x: AxisData::Uniform {
                bins: 2,
                min: 0.0,
                max: 1.0,
            },
            y: AxisData::Edges {
                edges: vec![0.0, 1.0],
            },
            z: AxisData::Edges {
                edges: vec![0.0, 1.0],
            },
            contents: vec![0.5; 4 * 3 * 3],
            errors: None,
            sumw2: None,
        };
        let grid = Grid::from_data(&data).unwrap();
        assert_eq!(grid.x_axis().edges(), &[0.0, 0.5, 1.0]);
    }
}
