use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2, ToPyArray};
use pyo3::prelude::*;

use crate::config::WaypointConfig;
use crate::data::FeatureMatrix;
use crate::waypoints::WaypointTransformer;

fn feature_matrix(data: PyReadonlyArray2<f64>, feature_ids: Option<Vec<String>>) -> PyResult<FeatureMatrix> {
    let values = data.as_array().to_owned();
    let matrix = match feature_ids {
        Some(ids) => FeatureMatrix::new(values, ids)?,
        None => FeatureMatrix::from_array(values),
    };
    Ok(matrix)
}

/// Python handle on a fitted waypoint space.
#[pyclass(name = "Waypoints")]
pub struct PyWaypoints {
    inner: WaypointTransformer,
}

#[pymethods]
impl PyWaypoints {
    #[new]
    #[pyo3(signature = (bin_size = 0.1))]
    pub fn new(bin_size: f64) -> PyResult<Self> {
        let config = WaypointConfig {
            bin_size,
            ..WaypointConfig::default()
        };
        Ok(Self {
            inner: WaypointTransformer::new(config)?,
        })
    }

    /// (features, n_bins) histograms of every column, NaN for empty columns
    #[pyo3(signature = (data, feature_ids = None))]
    pub fn binify<'py>(
        &self,
        py: Python<'py>,
        data: PyReadonlyArray2<f64>,
        feature_ids: Option<Vec<String>>,
    ) -> PyResult<&'py PyArray2<f64>> {
        let matrix = feature_matrix(data, feature_ids)?;
        let binned = py.allow_threads(|| self.inner.binify(&matrix))?;
        Ok(binned.feature_rows().to_pyarray(py))
    }

    /// Returns the kept feature ids and their (features, 2) waypoints.
    #[pyo3(signature = (data, feature_ids = None))]
    pub fn project<'py>(
        &self,
        py: Python<'py>,
        data: PyReadonlyArray2<f64>,
        feature_ids: Option<Vec<String>>,
    ) -> PyResult<(Vec<String>, &'py PyArray2<f64>)> {
        let matrix = feature_matrix(data, feature_ids)?;
        let waypoints = py.allow_threads(|| self.inner.project(&matrix))?;
        Ok((waypoints.feature_ids().to_vec(), waypoints.to_array().into_pyarray(py)))
    }

    #[getter]
    pub fn reference_max<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        self.inner.reference_max().to_pyarray(py)
    }

    #[getter]
    pub fn seed_data_transformed<'py>(&self, py: Python<'py>) -> &'py PyArray2<f64> {
        self.inner.seed_transformed().to_pyarray(py)
    }

    #[getter]
    pub fn xlabel(&self) -> String {
        self.inner.xlabel().to_string()
    }

    #[getter]
    pub fn ylabel(&self) -> String {
        self.inner.ylabel().to_string()
    }
}
