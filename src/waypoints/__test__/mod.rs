use crate::config::WaypointConfig;
use crate::data::{FeatureMatrix, FeatureVector};
use crate::error::WaypointError;
use crate::nmf::NmfModel;
use crate::waypoints::{GroupedWaypoints, SeedBasis, WaypointPosition, WaypointTransformer, Waypoints};
use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};
use rstest::rstest;

fn transformer() -> WaypointTransformer {
    WaypointTransformer::new(WaypointConfig::default()).unwrap()
}

/// 20 x 20 lower-triangular fixtures: "bimodal" (0/1), "excluded middle" (0/0.5)
/// and "included middle" (1/0.5), stacked into 60 samples.
fn maybe_everything() -> FeatureMatrix {
    let n = 20;
    let mut values = Array2::<f64>::zeros((3 * n, n));
    for i in 0..n {
        for j in 0..n {
            let lower = j <= i;
            values[[i, j]] = if lower { 1.0 } else { 0.0 };
            values[[n + i, j]] = if lower { 0.5 } else { 0.0 };
            values[[2 * n + i, j]] = if lower { 0.5 } else { 1.0 };
        }
    }
    FeatureMatrix::from_array(values)
}

fn constant_column(value: f64, n: usize) -> Array2<f64> {
    Array2::from_elem((n, 1), value)
}

#[test]
fn test_seed_basis() {
    let seed = SeedBasis::default();
    assert_eq!(seed.values().shape(), &[3, 10]);
    assert_eq!(seed.values().row(0).to_vec(), SeedBasis::near0(10).to_vec());
    assert_eq!(seed.values().row(1), seed.values().row(0));
    assert_eq!(
        seed.values().row(2).to_vec(),
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn test_reference_max_normalizes_seed() {
    let wp = transformer();
    let reference = wp.reference_max();
    assert!(reference.iter().all(|&m| m > 0.0));

    let seed = wp.seed_transformed();
    assert_eq!(seed.shape(), &[3, 2]);
    // near-0 rows on x, the near-1 row on y
    assert_abs_diff_eq!(seed[[0, 0]] / reference[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(seed[[2, 1]] / reference[1], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(seed[[2, 0]], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(seed[[0, 1]], 0.0, epsilon = 1e-9);
}

#[test]
fn test_near0_histogram_projects_to_x_axis() {
    let wp = transformer();
    let matrix = FeatureMatrix::new(constant_column(0.05, 8), vec!["low"]).unwrap();
    let p = wp.project(&matrix).unwrap().get("low").unwrap();

    assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-6);
}

#[test]
fn test_near1_histogram_projects_to_y_axis() {
    let wp = transformer();
    let matrix = FeatureMatrix::new(constant_column(1.0, 8), vec!["high"]).unwrap();
    let p = wp.project(&matrix).unwrap().get("high").unwrap();

    assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-6);
}

#[test]
fn test_bimodal_and_middle_positions() {
    let wp = transformer();
    let values = array![[0.0, 0.5], [1.0, 0.5], [0.0, 0.55], [1.0, 0.45]];
    let matrix = FeatureMatrix::new(values, vec!["bimodal", "middle"]).unwrap();
    let waypoints = wp.project(&matrix).unwrap();

    let bimodal = waypoints.get("bimodal").unwrap();
    assert_abs_diff_eq!(bimodal.x, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(bimodal.y, 0.5, epsilon = 1e-6);

    let middle = waypoints.get("middle").unwrap();
    assert_abs_diff_eq!(middle.x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(middle.y, 0.0, epsilon = 1e-6);
}

#[rstest]
#[case(1.0000001, true)]
#[case(-0.0000001, false)]
fn test_project_rejects_out_of_range(#[case] value: f64, #[case] above: bool) {
    let wp = transformer();
    let values = array![[0.2, 0.3], [0.4, value]];
    let matrix = FeatureMatrix::new(values, vec!["ok", "bad"]).unwrap();

    match wp.project(&matrix) {
        Err(WaypointError::AboveOne { feature, value: v }) => {
            assert!(above);
            assert_eq!(feature, "bad");
            assert_eq!(v, value);
        }
        Err(WaypointError::BelowZero { feature, value: v }) => {
            assert!(!above);
            assert_eq!(feature, "bad");
            assert_eq!(v, value);
        }
        other => panic!("expected a domain error, got {:?}", other),
    }
}

#[test]
fn test_greater_than_one_is_reported_first() {
    let wp = transformer();
    let values = array![[-0.5, 2.0]];
    let matrix = FeatureMatrix::new(values, vec!["negative", "large"]).unwrap();

    assert!(matches!(
        wp.project(&matrix),
        Err(WaypointError::AboveOne { .. })
    ));
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
fn test_boundary_values_are_accepted(#[case] value: f64) {
    let wp = transformer();
    let matrix = FeatureMatrix::new(constant_column(value, 3), vec!["edge"]).unwrap();
    assert!(wp.project(&matrix).is_ok());
}

#[test]
fn test_projection_is_non_negative_and_drops_empty_columns() {
    let wp = transformer();
    let everything = maybe_everything();
    let waypoints = wp.project(&everything).unwrap();

    assert_eq!(waypoints.len(), 20);
    assert!(waypoints.iter().all(|(_, p)| p.x >= 0.0 && p.y >= 0.0));

    let nan = f64::NAN;
    let values = array![[0.1, nan, 0.9], [0.2, nan, nan]];
    let matrix = FeatureMatrix::new(values, vec!["a", "empty", "c"]).unwrap();
    let waypoints = wp.project(&matrix).unwrap();
    assert_eq!(waypoints.feature_ids(), &["a", "c"]);
    assert!(!waypoints.contains("empty"));
}

#[test]
fn test_projection_preserves_column_order() {
    let wp = transformer();
    let waypoints = wp.project(&maybe_everything()).unwrap();
    let expected: Vec<String> = (0..20).map(|j| j.to_string()).collect();
    assert_eq!(waypoints.feature_ids(), expected.as_slice());
}

#[test]
fn test_project_is_idempotent() {
    let wp = transformer();
    let everything = maybe_everything();
    let first = wp.project(&everything).unwrap().to_array();
    let second = wp.project(&everything).unwrap().to_array();
    assert_eq!(first, second);
}

#[test]
fn test_independent_transformers_agree() {
    let everything = maybe_everything();
    let first = transformer().project(&everything).unwrap().to_array();
    let second = transformer().project(&everything).unwrap().to_array();
    assert_eq!(first, second);
}

#[test]
fn test_projection_is_not_batch_normalized() -> anyhow::Result<()> {
    let wp = transformer();
    // every sample in the middle bins, so the batch maximum is far below 1
    let values = array![[0.5, 0.0], [0.5, 0.5], [0.5, 0.5], [0.5, 0.5]];
    let matrix = FeatureMatrix::new(values, vec!["middle", "mostly_middle"])?;
    let waypoints = wp.project(&matrix)?;

    let p = waypoints.get("mostly_middle").expect("feature kept");
    assert_abs_diff_eq!(p.x, 0.25, epsilon = 1e-6);
    assert!(p.x < 1.0);
    Ok(())
}

#[test]
fn test_shared_transformer_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WaypointTransformer>();

    let wp = transformer();
    let everything = maybe_everything();
    let expected = wp.project(&everything).unwrap().to_array();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| wp.project(&everything).unwrap().to_array()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_project_vector_keeps_name() {
    let wp = transformer();
    let vector = FeatureVector::new("exon_7", Array1::from_elem(5, 0.02));
    let named = wp.project_vector(&vector).unwrap();

    assert_eq!(named.name, "exon_7");
    assert_abs_diff_eq!(named.position.x, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(named.position.y, 0.0, epsilon = 1e-6);

    let all_missing = FeatureVector::new("gone", Array1::from_elem(3, f64::NAN));
    assert!(wp.project_vector(&all_missing).unwrap().position.is_nan());

    let invalid = FeatureVector::new("bad", array![0.5, 1.5]);
    assert!(matches!(
        wp.project_vector(&invalid),
        Err(WaypointError::AboveOne { .. })
    ));
}

#[test]
fn test_discretize_then_transform_matches_project() {
    let wp = transformer();
    let everything = maybe_everything();
    let binned = wp.discretize(&everything).unwrap();

    assert_eq!(binned.n_bins(), 10);
    assert_eq!(binned.bin_labels()[0], "0-0.1");
    assert_eq!(
        wp.transform_binned(&binned).unwrap(),
        wp.project(&everything).unwrap()
    );
}

#[test]
fn test_transform_binned_rejects_wrong_bin_count() {
    let wp = transformer();
    let coarse = WaypointTransformer::new(WaypointConfig {
        bin_size: 0.5,
        ..WaypointConfig::default()
    })
    .unwrap();
    let binned = coarse.discretize(&maybe_everything()).unwrap();

    assert_eq!(
        wp.transform_binned(&binned),
        Err(WaypointError::ShapeMismatch {
            what: "bins",
            expected: 10,
            actual: 2
        })
    );
}

#[test]
fn test_coarser_bins_keep_axis_orientation() {
    let wp = WaypointTransformer::new(WaypointConfig {
        bin_size: 0.25,
        ..WaypointConfig::default()
    })
    .unwrap();
    assert_eq!(wp.bin_labels(), &["0-0.25", "0.25-0.5", "0.5-0.75", "0.75-1"]);

    let matrix = FeatureMatrix::new(constant_column(0.1, 4), vec!["low"]).unwrap();
    let p = wp.project(&matrix).unwrap().get("low").unwrap();
    assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-6);
}

#[test]
fn test_invalid_configuration() {
    let uneven = WaypointConfig {
        bin_size: 0.3,
        ..WaypointConfig::default()
    };
    assert!(matches!(
        WaypointTransformer::new(uneven),
        Err(WaypointError::InvalidConfig(_))
    ));

    let zero = WaypointConfig {
        bin_size: 0.0,
        ..WaypointConfig::default()
    };
    assert!(WaypointTransformer::new(zero).is_err());
}

#[test]
fn test_model_must_have_two_components() {
    let config = WaypointConfig::default();
    let model = NmfModel::new(3, config.nmf);
    assert_eq!(
        WaypointTransformer::with_model(config, model).unwrap_err(),
        WaypointError::ComponentMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_axis_labels() {
    let wp = transformer();
    assert_eq!(wp.xlabel(), "~0");
    assert_eq!(wp.ylabel(), "~1");
}

#[test]
fn test_project_grouped() {
    let wp = transformer();
    let values = array![[0.0, 0.9], [0.05, 1.0], [1.0, 0.0], [0.95, 0.05]];
    let matrix = FeatureMatrix::new(values, vec!["e1", "e2"]).unwrap();
    let grouped = wp.project_grouped(&matrix, &["iPSC", "iPSC", "NPC", "NPC"]).unwrap();

    assert_eq!(grouped.groups().collect::<Vec<_>>(), vec!["iPSC", "NPC"]);
    let start = grouped.position("iPSC", "e1").unwrap();
    let end = grouped.position("NPC", "e1").unwrap();
    assert_abs_diff_eq!(start.x, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(end.y, 1.0, epsilon = 1e-6);

    assert_eq!(
        wp.project_grouped(&matrix, &["only-one"]).unwrap_err(),
        WaypointError::ShapeMismatch {
            what: "sample groups",
            expected: 4,
            actual: 1
        }
    );
}

#[test]
fn test_grouped_waypoints_insert_position() {
    let mut grouped = GroupedWaypoints::new();
    grouped.insert_position("A", "f1", WaypointPosition::new(0.2, 0.8));
    grouped.insert_position("A", "f2", WaypointPosition::new(0.1, 0.1));
    grouped.insert_position("B", "f1", WaypointPosition::new(0.9, 0.1));
    grouped.insert_position("A", "f1", WaypointPosition::new(0.3, 0.7));

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped.get("A").map(Waypoints::len), Some(2));
    assert_eq!(grouped.position("A", "f1"), Some(WaypointPosition::new(0.3, 0.7)));
    assert!(grouped.position("B", "f2").is_none());
    assert!(grouped.get("C").is_none());
}

#[test]
fn test_waypoints_serialize_as_rows() {
    let mut waypoints = Waypoints::new();
    waypoints.insert("f1", WaypointPosition::new(1.0, 0.0));
    waypoints.insert("f2", WaypointPosition::new(0.5, 0.25));

    let json = serde_json::to_value(&waypoints).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"feature_id": "f1", "x": 1.0, "y": 0.0},
            {"feature_id": "f2", "x": 0.5, "y": 0.25}
        ])
    );
}
