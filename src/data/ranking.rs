use std::collections::BTreeMap;

use super::metrics::TOTAL_TIME;
use super::model::SwimDataset;

// ---------------------------------------------------------------------------
// Ranking – best total time per (style, distance, swimmer)
// ---------------------------------------------------------------------------

/// One leaderboard row: a swimmer's best observed total time for an event.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub style: String,
    pub distance: u32,
    pub swimmer: String,
    /// Minimum `T TOTAL` value across all of the swimmer's rows for this
    /// (style, distance).
    pub best: f64,
}

/// Compute the leaderboard over the **unfiltered** dataset.
///
/// Only `T TOTAL` rows participate; missing values are excluded from the
/// minimum, and a group with no non-missing value is omitted entirely. Rows
/// come back sorted by style, distance, then ascending best time, so each
/// (style, distance) partition reads as a ranking top-to-bottom.
pub fn ranking(dataset: &SwimDataset) -> Vec<RankingRow> {
    let mut best: BTreeMap<(String, u32, String), f64> = BTreeMap::new();

    for rec in &dataset.records {
        if rec.metric != TOTAL_TIME {
            continue;
        }
        let Some(value) = rec.value else {
            continue;
        };
        best.entry((rec.style.clone(), rec.distance, rec.swimmer.clone()))
            .and_modify(|b| *b = b.min(value))
            .or_insert(value);
    }

    let mut rows: Vec<RankingRow> = best
        .into_iter()
        .map(|((style, distance, swimmer), best)| RankingRow {
            style,
            distance,
            swimmer,
            best,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.style
            .cmp(&b.style)
            .then_with(|| a.distance.cmp(&b.distance))
            .then_with(|| a.best.total_cmp(&b.best))
    });
    rows
}

// ---------------------------------------------------------------------------
// Display-name abbreviation
// ---------------------------------------------------------------------------

/// Compact a swimmer name for narrow layouts: `"Jane Doe"` → `"J. Doe"`
/// (first initial, last word).
///
/// Single-application contract: this is not guaranteed idempotent for every
/// input (a one-token name such as `"Doe"` is returned unchanged, but a name
/// whose first token is already an initial keeps that initial), so callers
/// must apply it at most once per render, always starting from the stored
/// full name.
pub fn abbreviate_name(full: &str) -> String {
    let mut words = full.split_whitespace();
    let Some(first) = words.next() else {
        return full.to_string();
    };
    let Some(last) = words.last() else {
        // Single token, nothing to abbreviate.
        return full.to_string();
    };
    match first.chars().next() {
        Some(initial) => format!("{initial}. {last}"),
        None => full.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_from_reader, LoadOptions};

    const SAMPLE: &str = "\
Nadador,Estilo,Distancia,Fase,Parametro,Valor
Ana Garcia,Libre,50,PRELIMINAR,T TOTAL,30.1
Luis Perez,Libre,50,PRELIMINAR,T TOTAL,28.4
Luis Perez,Libre,50,FINAL,T TOTAL,28.9
Ana Garcia,Libre,50,FINAL,V1,1.75
Eva Ruiz,Libre,100,FINAL,T TOTAL,no marca
Eva Ruiz,Espalda,50,FINAL,T TOTAL,33.2
";

    fn dataset() -> SwimDataset {
        load_from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn best_time_per_group_sorted_ascending_within_event() {
        let rows = ranking(&dataset());

        // Espalda sorts before Libre; within (Libre, 50) Luis beats Ana.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].style, "Espalda");
        assert_eq!(rows[0].swimmer, "Eva Ruiz");

        assert_eq!(rows[1].swimmer, "Luis Perez");
        assert_eq!(rows[1].best, 28.4);
        assert_eq!(rows[2].swimmer, "Ana Garcia");
        assert_eq!(rows[2].best, 30.1);
    }

    #[test]
    fn the_minimum_wins_across_phases() {
        let rows = ranking(&dataset());
        let luis = rows.iter().find(|r| r.swimmer == "Luis Perez").unwrap();
        assert_eq!(luis.best, 28.4);
    }

    #[test]
    fn groups_with_only_missing_values_are_omitted() {
        let rows = ranking(&dataset());
        // Eva's (Libre, 100) time never parsed; only her Espalda row ranks.
        assert!(!rows.iter().any(|r| r.distance == 100));
    }

    #[test]
    fn other_metrics_do_not_participate() {
        let rows = ranking(&dataset());
        assert!(!rows.iter().any(|r| r.best == 1.75));
    }

    #[test]
    fn names_abbreviate_to_initial_and_last_word() {
        assert_eq!(abbreviate_name("Jane Doe"), "J. Doe");
        assert_eq!(abbreviate_name("Ana Maria Garcia Lopez"), "A. Lopez");
        assert_eq!(abbreviate_name("Doe"), "Doe");
        assert_eq!(abbreviate_name(""), "");
    }
}
