use std::collections::BTreeSet;

use super::model::{PhaseLabel, SwimDataset};

// ---------------------------------------------------------------------------
// Selection – one dimension's allowed values
// ---------------------------------------------------------------------------

/// The values a user has chosen to include for one filter dimension.
///
/// An empty `values` set means "exclude all" (nothing chosen yet), unless
/// `select_all` is set, in which case the selection resolves to the
/// dimension's full domain from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T: Ord> {
    pub values: BTreeSet<T>,
    pub select_all: bool,
}

// Manual impl: the derive would demand `T: Default` for no reason.
impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Selection {
            values: BTreeSet::new(),
            select_all: false,
        }
    }
}

impl<T: Ord + Clone> Selection<T> {
    /// A selection that resolves to the full domain.
    pub fn all() -> Self {
        Selection {
            values: BTreeSet::new(),
            select_all: true,
        }
    }

    /// Whether `value` passes this dimension. Records carry only values that
    /// exist in the domain, so `select_all` passes unconditionally.
    fn allows(&self, value: &T) -> bool {
        self.select_all || self.values.contains(value)
    }

    /// The resolved selection set, for display ("3/7 selected").
    pub fn resolve(&self, domain: &BTreeSet<T>) -> BTreeSet<T> {
        if self.select_all {
            domain.clone()
        } else {
            self.values.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState – the five selection sets
// ---------------------------------------------------------------------------

/// Current selections across the five filter dimensions. `Default` is all
/// dimensions empty, i.e. no record passes until the user picks values or
/// opts into "select all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub swimmers: Selection<String>,
    pub styles: Selection<String>,
    pub distances: Selection<u32>,
    pub phases: Selection<PhaseLabel>,
    pub metrics: Selection<String>,
}

impl FilterState {
    /// Every dimension set to "select all" – the whole dataset passes.
    pub fn select_all() -> Self {
        FilterState {
            swimmers: Selection::all(),
            styles: Selection::all(),
            distances: Selection::all(),
            phases: Selection::all(),
            metrics: Selection::all(),
        }
    }
}

// ---------------------------------------------------------------------------
// The filter itself
// ---------------------------------------------------------------------------

/// Return indices of records that pass all five dimensions.
///
/// A record is included iff every dimension value is a member of the
/// corresponding selection set (AND across dimensions, membership within a
/// dimension). Pure and stable: input order is preserved, nothing is
/// mutated, and the result depends only on `(dataset, filters)`.
pub fn filtered_indices(dataset: &SwimDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            filters.swimmers.allows(&rec.swimmer)
                && filters.styles.allows(&rec.style)
                && filters.distances.allows(&rec.distance)
                && filters.phases.allows(&rec.phase)
                && filters.metrics.allows(&rec.metric)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_from_reader, LoadOptions};

    const SAMPLE: &str = "\
Nadador,Estilo,Distancia,Fase,Parametro,Valor
Ana Garcia,Libre,50,PRELIMINAR,T TOTAL,30.12
Ana Garcia,Libre,50,FINAL,T TOTAL,29.80
Luis Perez,Libre,100,FINAL,T TOTAL,58.40
Luis Perez,Espalda,50,FINAL,V1,1.82
";

    fn dataset() -> SwimDataset {
        load_from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap()
    }

    fn one(value: &str) -> Selection<String> {
        Selection {
            values: [value.to_string()].into(),
            select_all: false,
        }
    }

    #[test]
    fn select_all_on_every_dimension_passes_everything() {
        let ds = dataset();
        assert_eq!(
            filtered_indices(&ds, &FilterState::select_all()),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn default_state_passes_nothing() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &FilterState::default()).is_empty());
    }

    #[test]
    fn one_empty_dimension_yields_zero_rows() {
        let ds = dataset();
        let mut filters = FilterState::select_all();
        filters.metrics = Selection::default();
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn dimensions_combine_with_and() {
        let ds = dataset();
        let mut filters = FilterState::select_all();
        filters.swimmers = one("Luis Perez");
        filters.styles = one("Libre");
        assert_eq!(filtered_indices(&ds, &filters), vec![2]);
    }

    #[test]
    fn membership_within_a_dimension_is_or() {
        let ds = dataset();
        let mut filters = FilterState::select_all();
        filters.styles = Selection {
            values: ["Libre".to_string(), "Espalda".to_string()].into(),
            select_all: false,
        };
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3]);
    }

    #[test]
    fn filtering_is_stable_and_idempotent() {
        let ds = dataset();
        let mut filters = FilterState::select_all();
        filters.distances = Selection {
            values: [50].into(),
            select_all: false,
        };

        let first = filtered_indices(&ds, &filters);
        assert_eq!(first, vec![0, 1, 3]);

        // Re-filter the already-filtered rows with the same sets.
        let sub: Vec<_> = first.iter().map(|&i| ds.records[i].clone()).collect();
        let sub_ds = SwimDataset::from_records(sub, ds.columns.clone());
        let second = filtered_indices(&sub_ds, &filters);
        assert_eq!(second, vec![0, 1, 2]);
        assert_eq!(second.len(), first.len());
        for (a, b) in second.iter().zip(&first) {
            assert_eq!(sub_ds.records[*a], ds.records[*b]);
        }
    }

    #[test]
    fn resolve_expands_select_all_to_the_domain() {
        let ds = dataset();
        let sel: Selection<String> = Selection::all();
        assert_eq!(sel.resolve(&ds.domains.styles), ds.domains.styles);
    }
}
