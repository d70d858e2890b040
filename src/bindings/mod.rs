mod voyages;
mod waypoints;

pub use voyages::*;
pub use waypoints::*;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::error::WaypointError;

impl From<WaypointError> for PyErr {
    fn from(err: WaypointError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// bonvoyage - waypoint and voyage spaces in Rust
#[pymodule]
pub fn bonvoyage(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyWaypoints>()?;
    m.add_function(wrap_pyfunction!(py_voyages, m)?)?;
    Ok(())
}
