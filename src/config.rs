//! Configuration owned by a waypoint transformer
//!
//! Everything that used to be a class-level default (bin size, axis labels, solver
//! settings) lives here and is handed to the transformer at construction.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaypointError};
use crate::ops::unit_edges;

/// Tolerance when checking that `1 / bin_size` is a whole number of bins
const BIN_COUNT_TOLERANCE: f64 = 1e-9;

/// Initialization of the non-negative factorization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Init {
    /// Nonnegative double SVD; zeros stay zero.
    #[default]
    Nndsvd,
    /// NNDSVD with zeros filled by the mean of the data.
    NndsvdA,
    /// NNDSVD with zeros filled by small seeded random values.
    NndsvdAr { seed: u64 },
}

/// Solver settings for the non-negative factorization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NmfConfig {
    pub init: Init,
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for NmfConfig {
    fn default() -> Self {
        Self {
            init: Init::default(),
            max_iter: 200,
            tol: 1e-4,
        }
    }
}

/// Configuration for [`crate::WaypointTransformer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    /// Width of each histogram bin over [0, 1]
    pub bin_size: f64,
    /// Label of the x-axis, whose extreme is "all values near 0"
    pub near0_label: String,
    /// Label of the y-axis, whose extreme is "all values near 1"
    pub near1_label: String,
    pub nmf: NmfConfig,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            bin_size: 0.1,
            near0_label: "~0".to_string(),
            near1_label: "~1".to_string(),
            nmf: NmfConfig::default(),
        }
    }
}

impl WaypointConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.bin_size > 0.0 && self.bin_size <= 1.0) {
            return Err(WaypointError::InvalidConfig(format!(
                "bin_size must be in (0, 1], got {}",
                self.bin_size
            )));
        }
        let exact = 1.0 / self.bin_size;
        if (exact - exact.round()).abs() > BIN_COUNT_TOLERANCE {
            return Err(WaypointError::InvalidConfig(format!(
                "bin_size {} does not divide [0, 1] evenly",
                self.bin_size
            )));
        }
        if self.nmf.max_iter == 0 {
            return Err(WaypointError::InvalidConfig(
                "nmf.max_iter must be at least 1".to_string(),
            ));
        }
        if !(self.nmf.tol >= 0.0) {
            return Err(WaypointError::InvalidConfig(format!(
                "nmf.tol must be non-negative, got {}",
                self.nmf.tol
            )));
        }
        Ok(())
    }

    pub fn n_bins(&self) -> usize {
        (1.0 / self.bin_size).round() as usize
    }

    /// Bin edges `[0, bin_size, ..., 1]`
    pub fn bin_edges(&self) -> Vec<f64> {
        unit_edges(self.n_bins())
    }
}
