//! # bonvoyage
//!
//! Waypoint and voyage spaces for fraction-valued features (values in [0, 1],
//! such as per-event splicing inclusion ratios).
//!
//! Each feature's samples are binned into a 10-bin histogram and projected by a
//! two-component non-negative factorization anchored on a fixed seed basis. The
//! x-axis means "values near 0" and the y-axis "values near 1". Voyages are the
//! signed moves of each feature between two groups of samples.
//!
//! ```no_run
//! use bonvoyage::{voyages, FeatureMatrix, WaypointConfig, WaypointTransformer};
//! use ndarray::array;
//!
//! # fn main() -> bonvoyage::Result<()> {
//! let transformer = WaypointTransformer::new(WaypointConfig::default())?;
//! let matrix = FeatureMatrix::new(array![[0.0, 0.9], [1.0, 0.1]], vec!["a", "b"])?;
//! let grouped = transformer.project_grouped(&matrix, &["early", "late"])?;
//! let table = voyages::compute(&grouped, &[("early", "late")])?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod nmf;
pub mod ops;
pub mod voyages;
pub mod waypoints;

#[cfg(feature = "python")]
mod bindings;

pub use config::{Init, NmfConfig, WaypointConfig};
pub use data::{BinnedMatrix, FeatureMatrix, FeatureVector};
pub use error::{Result, WaypointError};
pub use nmf::{Factorization, NmfModel};
pub use voyages::{Direction, Voyage, VoyageTable};
pub use waypoints::{
    GroupedWaypoints, NamedWaypoint, SeedBasis, WaypointPosition, WaypointTransformer, Waypoints,
};
