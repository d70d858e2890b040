//! # Waypoint space
//!
//! A waypoint is where a feature's distribution of [0, 1] values lands in a 2-D
//! non-negative space: x grows as the values pile up near 0, y as they pile up
//! near 1. Features with values spread over the middle sit near the origin and
//! bimodal features sit along the diagonal.

pub mod grouped;
pub mod seed;
pub mod transformer;

use std::collections::HashMap;

use ndarray::{Array2, ArrayView2};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, WaypointError};

pub use self::grouped::GroupedWaypoints;
pub use self::seed::SeedBasis;
pub use self::transformer::{WaypointTransformer, N_COMPONENTS};

/// Position of one feature in waypoint space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaypointPosition {
    pub x: f64,
    pub y: f64,
}

impl WaypointPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Degenerate features (nothing to bin) have NaN coordinates.
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

/// Waypoint of a single named vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedWaypoint {
    pub name: String,
    pub position: WaypointPosition,
}

/// Feature id → position table, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waypoints {
    feature_ids: Vec<String>,
    positions: Vec<WaypointPosition>,
    index: HashMap<String, usize>,
}

impl Waypoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from a `(features, 2)` array.
    pub fn from_array(feature_ids: Vec<String>, positions: &ArrayView2<f64>) -> Result<Self> {
        if positions.ncols() != N_COMPONENTS {
            return Err(WaypointError::ShapeMismatch {
                what: "waypoint columns",
                expected: N_COMPONENTS,
                actual: positions.ncols(),
            });
        }
        if feature_ids.len() != positions.nrows() {
            return Err(WaypointError::ShapeMismatch {
                what: "feature ids",
                expected: positions.nrows(),
                actual: feature_ids.len(),
            });
        }

        let mut waypoints = Self::new();
        for (id, row) in feature_ids.into_iter().zip(positions.rows()) {
            waypoints.insert(id, WaypointPosition::new(row[0], row[1]));
        }
        Ok(waypoints)
    }

    /// Adds a feature, replacing its position if it is already present.
    pub fn insert<S: Into<String>>(&mut self, feature_id: S, position: WaypointPosition) {
        let feature_id = feature_id.into();
        match self.index.get(&feature_id) {
            Some(&i) => self.positions[i] = position,
            None => {
                self.index.insert(feature_id.clone(), self.feature_ids.len());
                self.feature_ids.push(feature_id);
                self.positions.push(position);
            }
        }
    }

    pub fn get(&self, feature_id: &str) -> Option<WaypointPosition> {
        self.index.get(feature_id).map(|&i| self.positions[i])
    }

    pub fn contains(&self, feature_id: &str) -> bool {
        self.index.contains_key(feature_id)
    }

    pub fn len(&self) -> usize {
        self.feature_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_ids.is_empty()
    }

    pub fn feature_ids(&self) -> &[String] {
        &self.feature_ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, WaypointPosition)> + '_ {
        self.feature_ids
            .iter()
            .map(String::as_str)
            .zip(self.positions.iter().copied())
    }

    /// `(features, 2)` array of x and y
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), N_COMPONENTS), |(i, j)| {
            let p = self.positions[i];
            if j == 0 {
                p.x
            } else {
                p.y
            }
        })
    }
}

#[derive(Serialize)]
struct WaypointRecord<'a> {
    feature_id: &'a str,
    x: f64,
    y: f64,
}

/// Serialized as a list of `{feature_id, x, y}` rows.
impl Serialize for Waypoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (feature_id, p) in self.iter() {
            seq.serialize_element(&WaypointRecord {
                feature_id,
                x: p.x,
                y: p.y,
            })?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod __test__;
