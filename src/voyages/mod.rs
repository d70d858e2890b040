//! # Voyages between groups
//!
//! A voyage is how far, and which way, a feature's waypoint moves from one group
//! to another (e.g. from stem cells to neurons).

pub mod direction;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, WaypointError};
use crate::ops::norm_batched;
use crate::waypoints::GroupedWaypoints;

pub use self::direction::Direction;

/// One feature's move for one transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voyage {
    pub feature_id: String,
    pub group1: String,
    pub group2: String,
    pub delta_x: f64,
    pub delta_y: f64,
    pub magnitude: f64,
    pub direction: Direction,
    /// `"group1-group2"`
    pub transition: String,
}

/// Tidy table of voyages, one row per (transition, feature).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoyageTable {
    rows: Vec<Voyage>,
}

impl VoyageTable {
    pub fn rows(&self) -> &[Voyage] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Voyage> {
        self.rows.iter()
    }

    /// Rows of a single transition label, e.g. `"iPSC-NPC"`.
    pub fn for_transition<'a>(&'a self, transition: &'a str) -> impl Iterator<Item = &'a Voyage> + 'a {
        self.rows.iter().filter(move |v| v.transition == transition)
    }

    pub fn into_rows(self) -> Vec<Voyage> {
        self.rows
    }
}

impl IntoIterator for VoyageTable {
    type Item = Voyage;
    type IntoIter = std::vec::IntoIter<Voyage>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Magnitude and direction of every shared feature for each transition.
///
/// Transitions are `(group1, group2)` pairs and deltas are `group2 - group1`.
/// Features missing from either group, or with a NaN position in either, are
/// skipped. A transition naming an unknown group fails the whole call.
pub fn compute<S: AsRef<str>>(grouped: &GroupedWaypoints, transitions: &[(S, S)]) -> Result<VoyageTable> {
    let mut rows = Vec::new();

    for (group1, group2) in transitions {
        let (group1, group2) = (group1.as_ref(), group2.as_ref());
        let start = grouped
            .get(group1)
            .ok_or_else(|| WaypointError::MissingGroup(group1.to_string()))?;
        let end = grouped
            .get(group2)
            .ok_or_else(|| WaypointError::MissingGroup(group2.to_string()))?;

        let shared: Vec<(&str, f64, f64)> = start
            .iter()
            .filter_map(|(feature_id, p1)| {
                let p2 = end.get(feature_id)?;
                if p1.is_nan() || p2.is_nan() {
                    return None;
                }
                Some((feature_id, p2.x - p1.x, p2.y - p1.y))
            })
            .collect();

        if shared.is_empty() {
            warn!(group1, group2, "no shared features between groups");
            continue;
        }

        let deltas = Array2::from_shape_fn((shared.len(), 2), |(i, j)| {
            if j == 0 {
                shared[i].1
            } else {
                shared[i].2
            }
        });
        let magnitudes = norm_batched(&deltas.view());
        let transition = format!("{}-{}", group1, group2);
        debug!(transition = %transition, n_features = shared.len(), "computed voyages");

        let with_magnitude = shared.into_iter().zip(magnitudes.iter().copied());
        for ((feature_id, delta_x, delta_y), magnitude) in with_magnitude {
            rows.push(Voyage {
                feature_id: feature_id.to_string(),
                group1: group1.to_string(),
                group2: group2.to_string(),
                delta_x,
                delta_y,
                magnitude,
                direction: Direction::classify(delta_x, delta_y),
                transition: transition.clone(),
            });
        }
    }

    Ok(VoyageTable { rows })
}
