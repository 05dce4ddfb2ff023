//! Integration tests for the DEMATEL analysis pipeline.
//!
//! These tests drive the public API end to end:
//! 1. Construct or parse an influence matrix
//! 2. Normalize, derive the total-relation matrix, summarize, partition
//! 3. Check the bundled report, its serialization, and its chart data

use std::collections::HashSet;

use dematel::domain::analysis::{DematelEngine, InfluenceMatrix, Measure};
use dematel::domain::foundation::DematelError;
use dematel::io::{parse_csv, ParseError};

// =============================================================================
// Fixtures
// =============================================================================

fn engine() -> DematelEngine {
    DematelEngine::default()
}

fn three_factor_matrix() -> InfluenceMatrix {
    InfluenceMatrix::from_rows(
        vec!["A", "B", "C"],
        vec![
            vec![0.0, 2.0, 1.0],
            vec![0.0, 0.0, 3.0],
            vec![1.0, 0.0, 0.0],
        ],
    )
    .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Worked scenarios
// =============================================================================

#[test]
fn mutual_influence_pair_is_reported_singular() {
    // Scale is 1, so I - D_norm = [[1, -1], [-1, 1]], which has no inverse.
    let matrix =
        InfluenceMatrix::from_rows(vec!["A", "B"], vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();

    let err = engine().analyze(&matrix).unwrap_err();
    match err {
        DematelError::SingularMatrix { determinant } => {
            assert!(determinant.abs() < 1e-9);
            assert_eq!(err.code(), "SINGULAR_MATRIX");
        }
        other => panic!("expected SingularMatrix, got {other:?}"),
    }
}

#[test]
fn three_factor_scenario_flows_through_every_stage() {
    let report = engine().analyze(&three_factor_matrix()).unwrap();

    // Row sums 3, 3, 1 and column sums 1, 2, 4 give scale 4.
    assert_eq!(report.normalized.scale(), 4.0);
    assert_eq!(report.normalized.get(0, 1), Some(0.5));

    // Labels survive every stage untouched.
    assert_eq!(report.direct.labels(), ["A", "B", "C"]);
    assert_eq!(report.normalized.labels(), ["A", "B", "C"]);
    assert_eq!(report.total.labels(), ["A", "B", "C"]);

    // T = D_norm + D_norm * T.
    let d = report.normalized.rows();
    let t = report.total.rows();
    for i in 0..3 {
        for j in 0..3 {
            let propagated: f64 = (0..3).map(|k| d[i][k] * t[k][j]).sum();
            assert_close(t[i][j], d[i][j] + propagated);
        }
    }

    // Summaries line up with the total-relation marginals.
    let r = report.total.row_sums();
    let c = report.total.column_sums();
    for (i, summary) in report.summaries.iter().enumerate() {
        assert_close(summary.influence_given, r[i]);
        assert_close(summary.influence_received, c[i]);
    }
}

#[test]
fn all_zero_matrices_are_degenerate_at_any_size() {
    for n in 1..=4 {
        let labels: Vec<String> = (0..n).map(|i| format!("F{i}")).collect();
        let matrix = InfluenceMatrix::from_rows(labels, vec![vec![0.0; n]; n]).unwrap();

        let err = engine().analyze(&matrix).unwrap_err();
        match err {
            DematelError::DegenerateMatrix { scale } => {
                assert_eq!(scale, 0.0);
                assert_eq!(err.code(), "DEGENERATE_MATRIX");
            }
            other => panic!("expected DegenerateMatrix for n = {n}, got {other:?}"),
        }
    }
}

#[test]
fn single_factor_edge_cases() {
    // [[0]] has no positive marginal.
    let zero = InfluenceMatrix::from_rows(vec!["A"], vec![vec![0.0]]).unwrap();
    assert!(matches!(
        engine().analyze(&zero),
        Err(DematelError::DegenerateMatrix { .. })
    ));

    // [[x]] with x > 0 normalizes to [[1]], making I - D_norm = [[0]].
    let positive = InfluenceMatrix::from_rows(vec!["A"], vec![vec![7.0]]).unwrap();
    assert!(matches!(
        engine().analyze(&positive),
        Err(DematelError::SingularMatrix { .. })
    ));
}

#[test]
fn empty_matrix_is_rejected_at_normalization() {
    let empty = InfluenceMatrix::from_rows(Vec::<String>::new(), vec![]).unwrap();
    assert!(matches!(
        engine().analyze(&empty),
        Err(DematelError::DegenerateMatrix { .. })
    ));
}

#[test]
fn normalization_rescales_until_scale_is_one() {
    // Marginals below 1 still rescale; only a recomputed scale of exactly 1
    // leaves the matrix unchanged.
    let matrix =
        InfluenceMatrix::from_rows(vec!["A", "B"], vec![vec![0.0, 0.5], vec![0.25, 0.0]]).unwrap();

    let first = engine().normalize(&matrix).unwrap();
    assert_eq!(first.scale(), 0.5);
    assert_eq!(first.get(0, 1), Some(1.0));
    assert_eq!(first.get(1, 0), Some(0.5));

    let rebuilt = InfluenceMatrix::from_rows(first.labels().to_vec(), first.rows()).unwrap();
    let second = engine().normalize(&rebuilt).unwrap();
    assert_eq!(second.scale(), 1.0);
    assert_eq!(second.rows(), first.rows());
}

// =============================================================================
// Tabular input
// =============================================================================

#[test]
fn csv_documents_flow_through_the_pipeline() {
    let csv = "\
factors,Price,Quality,Delivery
Price,0,2,1
Quality,0,0,3
Delivery,1,0,0
";

    let matrix = parse_csv(csv).unwrap();
    let report = engine().analyze(&matrix).unwrap();

    assert_eq!(report.direct.labels(), ["Price", "Quality", "Delivery"]);
    assert_eq!(report.normalized.scale(), 4.0);
    assert_eq!(report.summaries.len(), 3);
}

#[test]
fn csv_label_disagreements_stay_parse_errors() {
    let csv = "factors,Quality,Price\nPrice,0,1\nQuality,1,0\n";

    assert!(matches!(
        parse_csv(csv),
        Err(ParseError::LabelOrderMismatch { .. })
    ));
}

// =============================================================================
// Report contracts
// =============================================================================

#[test]
fn report_round_trips_through_json() {
    let report = engine().analyze(&three_factor_matrix()).unwrap();
    let json = report.to_json().unwrap();
    let back = serde_json::from_str::<serde_json::Value>(&json).unwrap();

    assert!(back.get("analysis_id").is_some());
    assert!(back.get("computed_at").is_some());
    assert_eq!(back["normalized"]["scale"], 4.0);
    assert_eq!(back["direct"]["labels"][0], "A");
}

#[test]
fn partition_accounts_for_every_factor_exactly_once() {
    let report = engine().analyze(&three_factor_matrix()).unwrap();
    let partition = &report.partition;

    assert_eq!(partition.len(), report.summaries.len());

    let mut seen = HashSet::new();
    for summary in partition
        .causes
        .iter()
        .chain(&partition.effects)
        .chain(&partition.neutral)
    {
        assert!(seen.insert(summary.factor.clone()), "{} appears twice", summary.factor);
    }
    for summary in &report.summaries {
        assert!(seen.contains(&summary.factor), "{} missing", summary.factor);
    }

    for cause in &partition.causes {
        assert!(cause.net_effect > 0.0);
    }
    for effect in &partition.effects {
        assert!(effect.net_effect < 0.0);
    }
}

#[test]
fn chart_records_follow_the_long_format_contract() {
    // One-directional chain: T = [[0, 1], [0, 0]] exactly, so A ends up
    // with prominence 1 and net 1, B with prominence 1 and net -1.
    let matrix =
        InfluenceMatrix::from_rows(vec!["A", "B"], vec![vec![0.0, 2.0], vec![0.0, 0.0]]).unwrap();
    let report = engine().analyze(&matrix).unwrap();

    let records = report.chart_records();
    assert_eq!(records.len(), 4);

    assert_eq!(records[0].measure, Measure::Prominence);
    assert_eq!(records[0].factor, "A");
    assert_eq!(records[0].value, 1.0);
    assert_eq!(records[1].factor, "B");
    assert_eq!(records[1].value, 1.0);

    assert_eq!(records[2].measure, Measure::NetEffect);
    assert_eq!(records[2].factor, "A");
    assert_eq!(records[2].value, 1.0);
    assert_eq!(records[3].factor, "B");
    assert_eq!(records[3].value, -1.0);
}

#[test]
fn display_renders_the_full_results_page() {
    let report = engine().analyze(&three_factor_matrix()).unwrap();
    let rendered = report.to_string();

    for section in [
        "Direct Relation Matrix (D)",
        "Normalized Direct Relation Matrix (D_norm)",
        "Total Relation Matrix (T)",
        "DEMATEL Results",
        "Cause Group (Net > 0)",
        "Effect Group (Net < 0)",
    ] {
        assert!(rendered.contains(section), "missing section: {section}");
    }

    // Cells render at three decimals.
    assert!(rendered.contains("0.500"));
}
