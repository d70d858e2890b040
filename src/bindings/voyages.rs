use numpy::PyReadonlyArray2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::voyages;
use crate::waypoints::{GroupedWaypoints, WaypointPosition};

type VoyageRow = (String, String, String, f64, f64, f64, String, String);

/// Voyages from long-format waypoints.
///
/// `groups[i]` and `feature_ids[i]` label row `i` of the (rows, 2) `positions`.
/// Returns `(feature_id, group1, group2, delta_x, delta_y, magnitude, direction,
/// transition)` tuples.
#[pyfunction(name = "voyages")]
pub fn py_voyages(
    py: Python<'_>,
    groups: Vec<String>,
    feature_ids: Vec<String>,
    positions: PyReadonlyArray2<f64>,
    transitions: Vec<(String, String)>,
) -> PyResult<Vec<VoyageRow>> {
    let positions = positions.as_array();
    if positions.ncols() != 2 || positions.nrows() != groups.len() || groups.len() != feature_ids.len() {
        return Err(PyValueError::new_err(
            "positions must be (rows, 2) with one group and feature id per row",
        ));
    }

    let mut grouped = GroupedWaypoints::new();
    for (i, row) in positions.rows().into_iter().enumerate() {
        grouped.insert_position(&groups[i], feature_ids[i].clone(), WaypointPosition::new(row[0], row[1]));
    }

    let table = py.allow_threads(|| voyages::compute(&grouped, &transitions))?;
    Ok(table
        .into_iter()
        .map(|v| {
            (
                v.feature_id,
                v.group1,
                v.group2,
                v.delta_x,
                v.delta_y,
                v.magnitude,
                v.direction.label().to_string(),
                v.transition,
            )
        })
        .collect())
}
