// src/waypoints/transformer.rs

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::{debug, info};

use super::grouped::GroupedWaypoints;
use super::{NamedWaypoint, SeedBasis, WaypointPosition, Waypoints};
use crate::config::WaypointConfig;
use crate::data::{BinnedMatrix, FeatureMatrix, FeatureVector};
use crate::error::{Result, WaypointError};
use crate::nmf::{Factorization, NmfModel};
use crate::ops::{bin_range_strings, binify, column_max, rescale_to_reference, EPS};

/// The waypoint space always has exactly two axes: near-0 and near-1.
pub const N_COMPONENTS: usize = 2;

/// Projects fraction-valued features into waypoint space.
///
/// The factorization is fitted once on the [`SeedBasis`] during construction and
/// never touched again, so a constructed transformer can be shared between threads
/// and every projection is a pure function of the input.
#[derive(Debug, Clone)]
pub struct WaypointTransformer<F = NmfModel> {
    config: WaypointConfig,
    bin_edges: Vec<f64>,
    bin_labels: Vec<String>,
    seed: SeedBasis,
    model: F,
    seed_transformed: Array2<f64>,
    reference_max: Array1<f64>,
}

impl WaypointTransformer<NmfModel> {
    /// Fits the bundled NMF solver on the seed basis.
    pub fn new(config: WaypointConfig) -> Result<Self> {
        let model = NmfModel::new(N_COMPONENTS, config.nmf);
        Self::with_model(config, model)
    }
}

impl<F: Factorization> WaypointTransformer<F> {
    /// Fits `model` on the seed basis and records the reference maxima.
    pub fn with_model(config: WaypointConfig, mut model: F) -> Result<Self> {
        config.validate()?;
        if model.n_components() != N_COMPONENTS {
            return Err(WaypointError::ComponentMismatch {
                expected: N_COMPONENTS,
                actual: model.n_components(),
            });
        }

        let bin_edges = config.bin_edges();
        let bin_labels = bin_range_strings(&bin_edges);
        let seed = SeedBasis::new(config.n_bins());

        model.fit(&seed.values())?;
        let seed_transformed = model.transform(&seed.values())?;
        let reference_max = column_max(&seed_transformed.view());
        if reference_max.iter().any(|&m| !(m > EPS)) {
            return Err(WaypointError::InvalidConfig(format!(
                "seed projection collapses an axis (reference maxima {:?})",
                reference_max.to_vec()
            )));
        }

        info!(
            n_bins = bin_labels.len(),
            reference_x = reference_max[0],
            reference_y = reference_max[1],
            "fitted waypoint space"
        );

        Ok(Self {
            config,
            bin_edges,
            bin_labels,
            seed,
            model,
            seed_transformed,
            reference_max,
        })
    }

    pub fn config(&self) -> &WaypointConfig {
        &self.config
    }

    pub fn bin_edges(&self) -> &[f64] {
        &self.bin_edges
    }

    pub fn bin_labels(&self) -> &[String] {
        &self.bin_labels
    }

    pub fn seed(&self) -> &SeedBasis {
        &self.seed
    }

    pub fn model(&self) -> &F {
        &self.model
    }

    /// Raw projection of the seed basis, `(3, 2)`.
    pub fn seed_transformed(&self) -> ArrayView2<'_, f64> {
        self.seed_transformed.view()
    }

    /// Per-axis denominator applied to every projection.
    pub fn reference_max(&self) -> ArrayView1<'_, f64> {
        self.reference_max.view()
    }

    pub fn xlabel(&self) -> &str {
        &self.config.near0_label
    }

    pub fn ylabel(&self) -> &str {
        &self.config.near1_label
    }

    /// Histograms of every column as-is: no range check, no column dropping.
    pub fn binify(&self, matrix: &FeatureMatrix) -> Result<BinnedMatrix> {
        let binned = binify(&matrix.values(), &self.bin_edges)?;
        BinnedMatrix::new(binned, self.bin_labels.clone(), matrix.feature_ids().to_vec())
    }

    /// Validates the range, drops all-missing columns and bins the rest.
    pub fn discretize(&self, matrix: &FeatureMatrix) -> Result<BinnedMatrix> {
        check_domain(&matrix.values(), matrix.feature_ids())?;

        let kept = matrix.drop_empty_columns();
        let dropped = matrix.n_features() - kept.n_features();
        debug!(
            n_samples = matrix.n_samples(),
            n_features = kept.n_features(),
            dropped,
            "discretizing features"
        );
        self.binify(&kept)
    }

    /// Projects binned features and rescales them against the seed reference.
    pub fn transform_binned(&self, binned: &BinnedMatrix) -> Result<Waypoints> {
        if binned.n_bins() != self.bin_labels.len() {
            return Err(WaypointError::ShapeMismatch {
                what: "bins",
                expected: self.bin_labels.len(),
                actual: binned.n_bins(),
            });
        }

        let raw = self.model.transform(&binned.feature_rows())?;
        let scaled = rescale_to_reference(&raw.view(), &self.reference_max.view());
        Waypoints::from_array(binned.feature_ids().to_vec(), &scaled.view())
    }

    /// Waypoints of every feature (column) of a `(samples, features)` matrix.
    ///
    /// Columns that are entirely missing are left out of the result.
    pub fn project(&self, matrix: &FeatureMatrix) -> Result<Waypoints> {
        let binned = self.discretize(matrix)?;
        self.transform_binned(&binned)
    }

    /// Waypoint of a single named vector of samples.
    ///
    /// An entirely missing vector is not dropped; its position is NaN.
    pub fn project_vector(&self, vector: &FeatureVector) -> Result<NamedWaypoint> {
        let column = vector.values.view().insert_axis(Axis(1));
        check_domain(&column, std::slice::from_ref(&vector.name))?;

        let binned = binify(&column, &self.bin_edges)?;
        let raw = self.model.transform(&binned.t())?;
        let scaled = rescale_to_reference(&raw.view(), &self.reference_max.view());

        Ok(NamedWaypoint {
            name: vector.name.clone(),
            position: WaypointPosition::new(scaled[[0, 0]], scaled[[0, 1]]),
        })
    }

    /// Splits the samples by group label and projects each group separately.
    ///
    /// `sample_groups[i]` is the group of row `i`. Groups keep the order in which
    /// they first appear.
    pub fn project_grouped<S: AsRef<str>>(
        &self,
        matrix: &FeatureMatrix,
        sample_groups: &[S],
    ) -> Result<GroupedWaypoints> {
        if sample_groups.len() != matrix.n_samples() {
            return Err(WaypointError::ShapeMismatch {
                what: "sample groups",
                expected: matrix.n_samples(),
                actual: sample_groups.len(),
            });
        }
        check_domain(&matrix.values(), matrix.feature_ids())?;

        let mut order: Vec<(&str, Vec<usize>)> = Vec::new();
        for (row, group) in sample_groups.iter().enumerate() {
            let group = group.as_ref();
            match order.iter_mut().find(|(label, _)| *label == group) {
                Some((_, rows)) => rows.push(row),
                None => order.push((group, vec![row])),
            }
        }

        let mut grouped = GroupedWaypoints::new();
        for (group, rows) in order {
            let waypoints = self.project(&matrix.select_samples(&rows))?;
            debug!(group, n_samples = rows.len(), n_features = waypoints.len(), "projected group");
            grouped.insert(group, waypoints);
        }
        Ok(grouped)
    }
}

/// First value of any column matching `pred`, with its column index.
fn find_in_columns(values: &ArrayView2<f64>, pred: impl Fn(f64) -> bool) -> Option<(usize, f64)> {
    values
        .axis_iter(Axis(1))
        .enumerate()
        .find_map(|(j, col)| col.iter().copied().find(|&v| pred(v)).map(|v| (j, v)))
}

/// Every value must lie in [0, 1]; NaN counts as missing and passes.
fn check_domain(values: &ArrayView2<f64>, feature_ids: &[String]) -> Result<()> {
    if let Some((j, value)) = find_in_columns(values, |v| v > 1.0) {
        return Err(WaypointError::AboveOne {
            feature: feature_ids[j].clone(),
            value,
        });
    }
    if let Some((j, value)) = find_in_columns(values, |v| v < 0.0) {
        return Err(WaypointError::BelowZero {
            feature: feature_ids[j].clone(),
            value,
        });
    }
    Ok(())
}
