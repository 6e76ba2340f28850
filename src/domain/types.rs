//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - declared in JSON configuration (`SourceSpec`)
//! - read from candidate CSV files (`TauCandidate`)
//! - exported alongside lookup results (`LookupResult`)

use serde::{Deserialize, Serialize};

/// Per-candidate kinematic quantities a table axis can be bound to.
///
/// A candidate is opaque to the tables beyond these three accessors.
pub trait Kinematics {
    /// Transverse momentum.
    fn pt(&self) -> f64;
    /// Pseudorapidity.
    fn eta(&self) -> f64;
    /// Jet width.
    fn width(&self) -> f64;
}

/// The closed set of kinematic variables a table axis can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KineVar {
    Pt,
    Eta,
    Width,
}

impl KineVar {
    pub const ALL: [KineVar; 3] = [KineVar::Pt, KineVar::Eta, KineVar::Width];

    /// Resolve a configured variable name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pt" => Some(KineVar::Pt),
            "eta" => Some(KineVar::Eta),
            "width" => Some(KineVar::Width),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KineVar::Pt => "pt",
            KineVar::Eta => "eta",
            KineVar::Width => "width",
        }
    }

    /// Read this variable from a candidate.
    #[inline]
    pub fn value<C: Kinematics + ?Sized>(self, candidate: &C) -> f64 {
        match self {
            KineVar::Pt => candidate.pt(),
            KineVar::Eta => candidate.eta(),
            KineVar::Width => candidate.width(),
        }
    }
}

/// A reconstructed tau candidate as read from input files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TauCandidate {
    /// Optional label carried through to reports/exports.
    pub id: Option<String>,
    pub pt: f64,
    pub eta: f64,
    pub width: f64,
}

impl TauCandidate {
    pub fn new(pt: f64, eta: f64, width: f64) -> Self {
        Self {
            id: None,
            pt,
            eta,
            width,
        }
    }
}

impl Kinematics for TauCandidate {
    fn pt(&self) -> f64 {
        self.pt
    }

    fn eta(&self) -> f64 {
        self.eta
    }

    fn width(&self) -> f64 {
        self.width
    }
}

/// Axis declaration in a source spec: which kinematic variable feeds the axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisVarSpec {
    pub var_name: String,
}

impl AxisVarSpec {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

/// Declarative description of one efficiency source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    /// Location of the grid inside the store (e.g. `"effs/pt_eta_width"`).
    pub location: String,
    pub x_axis: AxisVarSpec,
    pub y_axis: AxisVarSpec,
    pub z_axis: AxisVarSpec,
}

impl SourceSpec {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        vars: [&str; 3],
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            x_axis: AxisVarSpec::new(vars[0]),
            y_axis: AxisVarSpec::new(vars[1]),
            z_axis: AxisVarSpec::new(vars[2]),
        }
    }
}

/// Per-axis bin numbers (0 = underflow, N + 1 = overflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinCoord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

/// Result of one table lookup.
///
/// Two lookups with the same `bin_index` on the same table carry identical
/// values, so consumers can compare bins without recomputing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub value: f64,
    pub uncertainty: f64,
    /// Global bin number: `bx + (nx+2) * (by + (ny+2) * bz)`.
    pub bin_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kine_var_names_round_trip() {
        for var in KineVar::ALL {
            assert_eq!(KineVar::from_name(var.name()), Some(var));
        }
        assert_eq!(KineVar::from_name("Pt"), None);
        assert_eq!(KineVar::from_name("phi"), None);
        assert_eq!(KineVar::from_name(""), None);
    }

    #[test]
    fn kine_var_dispatches_to_candidate() {
        let tau = TauCandidate::new(35.0, -1.2, 0.07);
        assert_eq!(KineVar::Pt.value(&tau), 35.0);
        assert_eq!(KineVar::Eta.value(&tau), -1.2);
        assert_eq!(KineVar::Width.value(&tau), 0.07);
    }
}
