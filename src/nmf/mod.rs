//! # Non-negative matrix factorization
//!
//! The waypoint space only needs two things from a factorization: fit components
//! to a basis matrix once, then project new rows onto those components. That
//! contract is the [`Factorization`] trait. [`NmfModel`] is the bundled solver:
//! NNDSVD initialization, HALS coordinate descent for the fit and non-negative
//! least squares for the projection.

pub mod init;
pub mod solver;
pub mod svd;

use ndarray::{Array2, ArrayView2};

use crate::config::NmfConfig;
use crate::error::{Result, WaypointError};

pub use self::solver::FitReport;

/// Projection of a single row stops once its coordinates move less than this
/// (relative to their magnitude).
const TRANSFORM_TOL: f64 = 1e-12;
const TRANSFORM_MAX_ITER: usize = 1000;

/// A fit-once, project-many non-negative factorization `X ≈ W H`.
pub trait Factorization {
    /// Number of components (rows of `H`)
    fn n_components(&self) -> usize;

    /// Learns the components `H` from `basis` (rows are observations).
    fn fit(&mut self, basis: &ArrayView2<f64>) -> Result<()>;

    /// Projects the rows of `x` onto the learned components. The result is
    /// `(rows, n_components)` and non-negative.
    fn transform(&self, x: &ArrayView2<f64>) -> Result<Array2<f64>>;

    fn fit_transform(&mut self, basis: &ArrayView2<f64>) -> Result<Array2<f64>> {
        self.fit(basis)?;
        self.transform(basis)
    }
}

/// Bundled NMF solver.
#[derive(Debug, Clone)]
pub struct NmfModel {
    n_components: usize,
    config: NmfConfig,
    components: Option<Array2<f64>>,
    report: Option<FitReport>,
}

impl NmfModel {
    pub fn new(n_components: usize, config: NmfConfig) -> Self {
        Self {
            n_components,
            config,
            components: None,
            report: None,
        }
    }

    /// `(n_components, n_columns)` components, once fitted.
    pub fn components(&self) -> Option<&Array2<f64>> {
        self.components.as_ref()
    }

    pub fn report(&self) -> Option<FitReport> {
        self.report
    }

    pub fn reconstruction_error(&self) -> Option<f64> {
        self.report.map(|r| r.reconstruction_error)
    }
}

impl Factorization for NmfModel {
    fn n_components(&self) -> usize {
        self.n_components
    }

    fn fit(&mut self, basis: &ArrayView2<f64>) -> Result<()> {
        if basis.iter().any(|v| v.is_nan() || *v < 0.0) {
            return Err(WaypointError::NegativeInput("fit basis"));
        }

        let (mut w, mut h) = init::initialize(basis, self.n_components, self.config.init);
        let report = solver::fit_hals(basis, &mut w, &mut h, self.config.max_iter, self.config.tol);
        if !report.converged {
            tracing::warn!(
                max_iter = self.config.max_iter,
                error = report.reconstruction_error,
                "nmf fit did not converge"
            );
        }

        self.components = Some(h);
        self.report = Some(report);
        Ok(())
    }

    fn transform(&self, x: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let h = self.components.as_ref().ok_or(WaypointError::NotFitted)?;
        if x.ncols() != h.ncols() {
            return Err(WaypointError::ComponentMismatch {
                expected: h.ncols(),
                actual: x.ncols(),
            });
        }
        if x.iter().any(|v| *v < 0.0) {
            return Err(WaypointError::NegativeInput("transform input"));
        }
        Ok(solver::transform_rows(x, &h.view(), TRANSFORM_MAX_ITER, TRANSFORM_TOL))
    }
}
