use std::collections::BTreeMap;

use super::metrics;
use super::model::{Phase, PhaseLabel, SwimDataset};

// ---------------------------------------------------------------------------
// Chart groups – per-(metric, style) sub-tables of the filtered rows
// ---------------------------------------------------------------------------

/// One line in a comparative chart: a swimmer's values across phases.
#[derive(Debug, Clone, PartialEq)]
pub struct SwimmerSeries {
    pub swimmer: String,
    /// (phase, value) points ordered by phase ordinal. Rows with a missing
    /// value or an unmapped phase never make it into a series.
    pub points: Vec<(Phase, f64)>,
}

/// One comparative chart: the filtered rows for a single (metric, style)
/// pair, one series per swimmer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGroup {
    pub metric: String,
    pub style: String,
    pub series: Vec<SwimmerSeries>,
}

/// Partition the filtered rows into chart groups.
///
/// Groups are ordered by the metric's position in the category layout
/// (unknown metrics last, alphabetically), then by style; series within a
/// group are ordered by swimmer name. Pure: depends only on
/// `(dataset, indices)`.
pub fn chart_groups(dataset: &SwimDataset, indices: &[usize]) -> Vec<ChartGroup> {
    // (metric, style) → swimmer → points
    let mut groups: BTreeMap<(String, String), BTreeMap<String, Vec<(Phase, f64)>>> =
        BTreeMap::new();

    for &idx in indices {
        let rec = &dataset.records[idx];
        let (PhaseLabel::Known(phase), Some(value)) = (&rec.phase, rec.value) else {
            continue;
        };
        groups
            .entry((rec.metric.clone(), rec.style.clone()))
            .or_default()
            .entry(rec.swimmer.clone())
            .or_default()
            .push((*phase, value));
    }

    let mut out: Vec<ChartGroup> = groups
        .into_iter()
        .map(|((metric, style), swimmers)| ChartGroup {
            metric,
            style,
            series: swimmers
                .into_iter()
                .map(|(swimmer, mut points)| {
                    points.sort_by_key(|(phase, _)| phase.ordinal());
                    SwimmerSeries { swimmer, points }
                })
                .collect(),
        })
        .collect();

    out.sort_by(|a, b| {
        metrics::chart_rank(&a.metric)
            .cmp(&metrics::chart_rank(&b.metric))
            .then_with(|| a.metric.cmp(&b.metric))
            .then_with(|| a.style.cmp(&b.style))
    });
    out
}

// ---------------------------------------------------------------------------
// Detail rows – per-swimmer slices of the filtered rows
// ---------------------------------------------------------------------------

/// The filtered row indices belonging to one swimmer, input order preserved.
pub fn detail_rows(dataset: &SwimDataset, indices: &[usize], swimmer: &str) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| dataset.records[i].swimmer == swimmer)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterState};
    use crate::data::loader::{load_from_reader, LoadOptions};

    const SAMPLE: &str = "\
Nadador,Estilo,Distancia,Fase,Parametro,Valor
Ana Garcia,Libre,50,FINAL,T TOTAL,29.80
Ana Garcia,Libre,50,PRELIMINAR,T TOTAL,30.12
Luis Perez,Libre,50,FINAL,T TOTAL,28.90
Luis Perez,Libre,50,FINAL,V1,1.82
Luis Perez,Libre,50,Exhibicion,V1,1.70
Ana Garcia,Libre,50,SEMIFINAL,T TOTAL,sin dato
";

    fn dataset() -> SwimDataset {
        load_from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn groups_partition_by_metric_then_style_in_category_order() {
        let ds = dataset();
        let indices = filtered_indices(&ds, &FilterState::select_all());
        let groups = chart_groups(&ds, &indices);

        assert_eq!(groups.len(), 2);
        // "T TOTAL" (Times) comes before "V1" (Velocity).
        assert_eq!(groups[0].metric, "T TOTAL");
        assert_eq!(groups[1].metric, "V1");
        assert_eq!(groups[0].style, "Libre");
    }

    #[test]
    fn series_are_ordered_by_phase_ordinal() {
        let ds = dataset();
        let indices = filtered_indices(&ds, &FilterState::select_all());
        let groups = chart_groups(&ds, &indices);

        let ana = &groups[0].series[0];
        assert_eq!(ana.swimmer, "Ana Garcia");
        assert_eq!(
            ana.points,
            vec![(Phase::Preliminary, 30.12), (Phase::Final, 29.80)]
        );
    }

    #[test]
    fn missing_values_and_unmapped_phases_are_left_out() {
        let ds = dataset();
        let indices = filtered_indices(&ds, &FilterState::select_all());
        let groups = chart_groups(&ds, &indices);

        // The "sin dato" row is missing; the Exhibicion row has no ordinal.
        let v1 = &groups[1];
        assert_eq!(v1.series.len(), 1);
        assert_eq!(v1.series[0].points, vec![(Phase::Final, 1.82)]);
    }

    #[test]
    fn detail_rows_keep_input_order() {
        let ds = dataset();
        let indices = filtered_indices(&ds, &FilterState::select_all());
        let rows = detail_rows(&ds, &indices, "Ana Garcia");
        assert_eq!(rows, vec![0, 1, 5]);
    }
}
