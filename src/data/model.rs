use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase – canonical race phase with a fixed total order
// ---------------------------------------------------------------------------

/// Canonical race phase. The derived `Ord` follows competition order:
/// Preliminary < Semifinal < Final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Preliminary,
    Semifinal,
    Final,
}

impl Phase {
    /// Numeric sort key used as the chart x-axis (1, 2, 3).
    pub fn ordinal(self) -> u8 {
        match self {
            Phase::Preliminary => 1,
            Phase::Semifinal => 2,
            Phase::Final => 3,
        }
    }

    /// Canonical label as it appears in the dataset.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Preliminary => "Preliminar",
            Phase::Semifinal => "Semifinal",
            Phase::Final => "Final",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PhaseLabel – canonical phase, or verbatim passthrough of an unmapped label
// ---------------------------------------------------------------------------

/// Phase cell after normalization. Labels the variant table does not know are
/// kept verbatim rather than dropped; they carry no ordinal and therefore
/// never appear on the phase axis of a chart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhaseLabel {
    Known(Phase),
    Other(String),
}

impl PhaseLabel {
    /// Sort key for the phase axis; `None` for unmapped labels.
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            PhaseLabel::Known(p) => Some(p.ordinal()),
            PhaseLabel::Other(_) => None,
        }
    }
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseLabel::Known(p) => f.write_str(p.label()),
            PhaseLabel::Other(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single measurement (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub swimmer: String,
    /// Stroke style, categorical text (e.g. "Libre", "Mariposa").
    pub style: String,
    /// Event distance in meters.
    pub distance: u32,
    pub phase: PhaseLabel,
    /// Metric code (e.g. "T TOTAL", "V1"); see [`crate::data::metrics`].
    pub metric: String,
    /// Coerced metric value; `None` when the source cell was not numeric.
    pub value: Option<f64>,
    /// Any additional source columns, preserved verbatim for export.
    pub extra: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Domains – categorical domains discovered from the data
// ---------------------------------------------------------------------------

/// The unique values of each filter dimension, discovered at load time and
/// exposed for UI population. Nothing here is hardcoded.
#[derive(Debug, Clone, Default)]
pub struct Domains {
    pub swimmers: BTreeSet<String>,
    pub styles: BTreeSet<String>,
    pub distances: BTreeSet<u32>,
    pub phases: BTreeSet<PhaseLabel>,
    pub metrics: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// SwimDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset. Immutable after construction; every
/// downstream view (filtered subset, chart groups, ranking) is a derived
/// projection recomputed on demand.
#[derive(Debug, Clone)]
pub struct SwimDataset {
    /// All measurements (rows), in source order.
    pub records: Vec<Record>,
    /// Normalized column names in source order, used to reproduce the
    /// original column structure on export.
    pub columns: Vec<String>,
    /// Per-dimension unique values.
    pub domains: Domains,
}

impl SwimDataset {
    /// Build the categorical domains from the loaded records.
    pub fn from_records(records: Vec<Record>, columns: Vec<String>) -> Self {
        let mut domains = Domains::default();
        for rec in &records {
            domains.swimmers.insert(rec.swimmer.clone());
            domains.styles.insert(rec.style.clone());
            domains.distances.insert(rec.distance);
            domains.phases.insert(rec.phase.clone());
            domains.metrics.insert(rec.metric.clone());
        }
        SwimDataset {
            records,
            columns,
            domains,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_ordinals_follow_competition_order() {
        assert_eq!(Phase::Preliminary.ordinal(), 1);
        assert_eq!(Phase::Semifinal.ordinal(), 2);
        assert_eq!(Phase::Final.ordinal(), 3);
        assert!(Phase::Preliminary < Phase::Semifinal);
        assert!(Phase::Semifinal < Phase::Final);
    }

    #[test]
    fn unmapped_phase_has_no_ordinal() {
        let label = PhaseLabel::Other("EXHIBICION".to_string());
        assert_eq!(label.ordinal(), None);
        assert_eq!(label.to_string(), "EXHIBICION");
    }

    #[test]
    fn domains_are_discovered_from_records() {
        let rec = |swimmer: &str, style: &str, distance: u32| Record {
            swimmer: swimmer.to_string(),
            style: style.to_string(),
            distance,
            phase: PhaseLabel::Known(Phase::Final),
            metric: "T TOTAL".to_string(),
            value: Some(30.0),
            extra: BTreeMap::new(),
        };
        let ds = SwimDataset::from_records(
            vec![
                rec("Ana", "Libre", 50),
                rec("Ana", "Espalda", 100),
                rec("Luis", "Libre", 50),
            ],
            vec!["Nadador".into(), "Estilo".into()],
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.domains.swimmers.len(), 2);
        assert_eq!(ds.domains.styles.len(), 2);
        assert_eq!(
            ds.domains.distances.iter().copied().collect::<Vec<_>>(),
            vec![50, 100]
        );
        assert_eq!(ds.domains.metrics.len(), 1);
    }
}
