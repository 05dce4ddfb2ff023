//! Factor summaries and the cause/effect partition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tables;

/// Which side of the cause/effect boundary a factor falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorRole {
    /// Net effect > 0: the factor drives the system.
    Cause,
    /// Net effect < 0: the factor is driven by the others.
    Effect,
    /// Net effect exactly 0: in neither group.
    Neutral,
}

impl FactorRole {
    /// Human-readable group name.
    pub fn label(&self) -> &'static str {
        match self {
            FactorRole::Cause => "Cause",
            FactorRole::Effect => "Effect",
            FactorRole::Neutral => "Neutral",
        }
    }
}

/// The two per-factor measures derived for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    Prominence,
    NetEffect,
}

impl Measure {
    /// Column header and chart axis label for this measure.
    pub fn label(&self) -> &'static str {
        match self {
            Measure::Prominence => "Prominence (r+c)",
            Measure::NetEffect => "Net effect (r-c)",
        }
    }
}

/// Per-factor influence measures derived from the total-relation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSummary {
    pub factor: String,
    /// r: row sum of the total-relation matrix.
    pub influence_given: f64,
    /// c: column sum of the total-relation matrix.
    pub influence_received: f64,
    /// r + c: how involved the factor is overall.
    pub prominence: f64,
    /// r - c: positive drives the system, negative is driven by it.
    pub net_effect: f64,
}

impl FactorSummary {
    /// Builds a summary from r and c; prominence and net effect are derived.
    pub fn new(factor: impl Into<String>, influence_given: f64, influence_received: f64) -> Self {
        Self {
            factor: factor.into(),
            influence_given,
            influence_received,
            prominence: influence_given + influence_received,
            net_effect: influence_given - influence_received,
        }
    }

    /// The group this factor falls in, on the exact sign of the net effect.
    pub fn role(&self) -> FactorRole {
        if self.net_effect > 0.0 {
            FactorRole::Cause
        } else if self.net_effect < 0.0 {
            FactorRole::Effect
        } else {
            FactorRole::Neutral
        }
    }

    /// The value of one chart measure for this factor.
    pub fn measure_value(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Prominence => self.prominence,
            Measure::NetEffect => self.net_effect,
        }
    }
}

/// The cause/effect split of a summarized factor set.
///
/// `causes` (net > 0) and `effects` (net < 0) are the two disjoint groups;
/// factors whose net effect is exactly zero land in `neutral` and belong to
/// neither group. All three lists preserve the input factor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseEffectPartition {
    pub causes: Vec<FactorSummary>,
    pub effects: Vec<FactorSummary>,
    pub neutral: Vec<FactorSummary>,
}

impl CauseEffectPartition {
    /// Splits summaries by the sign of their net effect, keeping order.
    pub fn from_summaries(summaries: &[FactorSummary]) -> Self {
        let mut causes = Vec::new();
        let mut effects = Vec::new();
        let mut neutral = Vec::new();

        for summary in summaries {
            match summary.role() {
                FactorRole::Cause => causes.push(summary.clone()),
                FactorRole::Effect => effects.push(summary.clone()),
                FactorRole::Neutral => neutral.push(summary.clone()),
            }
        }

        Self {
            causes,
            effects,
            neutral,
        }
    }

    /// Total number of factors across all groups.
    pub fn len(&self) -> usize {
        self.causes.len() + self.effects.len() + self.neutral.len()
    }

    /// True when no factors were partitioned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for CauseEffectPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cause Group (Net > 0)")?;
        write!(f, "{}", summary_table(&self.causes))?;
        writeln!(f)?;
        writeln!(f, "Effect Group (Net < 0)")?;
        write!(f, "{}", summary_table(&self.effects))?;
        if !self.neutral.is_empty() {
            writeln!(f)?;
            writeln!(f, "Neutral (Net = 0)")?;
            write!(f, "{}", summary_table(&self.neutral))?;
        }
        Ok(())
    }
}

/// Renders summaries as the five-column results table.
pub(crate) fn summary_table(summaries: &[FactorSummary]) -> String {
    let header = vec![
        "Factor".to_string(),
        "r (influence given)".to_string(),
        "c (influence received)".to_string(),
        Measure::Prominence.label().to_string(),
        Measure::NetEffect.label().to_string(),
    ];

    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|summary| {
            vec![
                summary.factor.clone(),
                tables::format_value(summary.influence_given),
                tables::format_value(summary.influence_received),
                tables::format_value(summary.prominence),
                tables::format_value(summary.net_effect),
            ]
        })
        .collect();

    tables::render_table(&header, &rows)
}
