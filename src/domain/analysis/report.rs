//! Analysis Report - Every table derived from one DEMATEL run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisId, Timestamp};

use super::engine::{NormalizedMatrix, TotalRelationMatrix};
use super::summary::{summary_table, CauseEffectPartition, FactorSummary, Measure};
use super::InfluenceMatrix;

/// One long-format chart row: a factor paired with one measure value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub factor: String,
    pub measure: Measure,
    pub value: f64,
}

/// Flattens summaries into long-format chart rows: one row per factor per
/// measure, prominence block first, each block sorted descending by value.
/// Ties keep the factor order.
pub fn chart_records(summaries: &[FactorSummary]) -> Vec<ChartRecord> {
    let mut records = Vec::with_capacity(summaries.len() * 2);

    for measure in [Measure::Prominence, Measure::NetEffect] {
        let mut block: Vec<ChartRecord> = summaries
            .iter()
            .map(|summary| ChartRecord {
                factor: summary.factor.clone(),
                measure,
                value: summary.measure_value(measure),
            })
            .collect();
        block.sort_by(|a, b| b.value.total_cmp(&a.value));
        records.extend(block);
    }

    records
}

/// The bundle of tables a DEMATEL run produces, stamped with a fresh run
/// identity. Built once per run; nothing is carried across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    pub direct: InfluenceMatrix,
    pub normalized: NormalizedMatrix,
    pub total: TotalRelationMatrix,
    pub summaries: Vec<FactorSummary>,
    pub partition: CauseEffectPartition,
}

impl AnalysisReport {
    /// Bundles the pipeline outputs under a fresh identity and timestamp.
    pub fn new(
        direct: InfluenceMatrix,
        normalized: NormalizedMatrix,
        total: TotalRelationMatrix,
        summaries: Vec<FactorSummary>,
        partition: CauseEffectPartition,
    ) -> Self {
        Self {
            analysis_id: AnalysisId::new(),
            computed_at: Timestamp::now(),
            direct,
            normalized,
            total,
            summaries,
            partition,
        }
    }

    /// Long-format rows for charting prominence and net effect.
    pub fn chart_records(&self) -> Vec<ChartRecord> {
        chart_records(&self.summaries)
    }

    /// Serializes the full report for the presentation layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Direct Relation Matrix (D)")?;
        writeln!(f, "{}", self.direct)?;
        writeln!(f, "Normalized Direct Relation Matrix (D_norm)")?;
        writeln!(f, "{}", self.normalized)?;
        writeln!(f, "Total Relation Matrix (T)")?;
        writeln!(f, "{}", self.total)?;
        writeln!(f, "DEMATEL Results")?;
        writeln!(f, "{}", summary_table(&self.summaries))?;
        write!(f, "{}", self.partition)
    }
}
