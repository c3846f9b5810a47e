use std::sync::Arc;

use crate::color::SwimmerColors;
use crate::data::filter::{filtered_indices, FilterState, Selection};
use crate::data::loader::{DatasetCache, LoadOptions};
use crate::data::model::SwimDataset;
use crate::data::ranking::{ranking, RankingRow};
use crate::data::views::{chart_groups, ChartGroup};

/// The comparison charts stay readable up to four swimmers.
pub const MAX_SWIMMERS: usize = 4;

/// Central-panel tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Charts,
    Details,
    Ranking,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Every interaction is a pure
/// recomputation from (dataset, filters); the dataset itself is immutable
/// and cached per source.
pub struct AppState {
    /// One load per source per process; cleared only by explicit reload.
    pub cache: DatasetCache,
    pub load_options: LoadOptions,

    /// Source of the current dataset (path or URL).
    pub source: Option<String>,
    /// URL entry field in the top bar.
    pub url_input: String,

    /// Loaded dataset (None until the user opens a source).
    pub dataset: Option<Arc<SwimDataset>>,

    /// The five selection sets.
    pub filters: FilterState,
    /// Selected swimmers in the order the user picked them; the Details tab
    /// follows this order, not the alphabetical domain order.
    pub swimmer_order: Vec<String>,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,
    /// Per-(metric, style) chart groups for the current filters (cached).
    pub charts: Vec<ChartGroup>,
    /// Leaderboard over the unfiltered dataset (computed once per load).
    pub ranking: Vec<RankingRow>,

    /// Swimmer → colour, shared by every chart.
    pub colors: SwimmerColors,

    /// Compact "J. Doe" names in the ranking table.
    pub abbreviate_ranking: bool,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: DatasetCache::default(),
            load_options: LoadOptions::default(),
            source: None,
            url_input: String::new(),
            dataset: None,
            filters: FilterState::default(),
            swimmer_order: Vec::new(),
            visible_indices: Vec::new(),
            charts: Vec::new(),
            ranking: Vec::new(),
            colors: SwimmerColors::default(),
            abbreviate_ranking: false,
            active_tab: Tab::Charts,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load (or reuse) the dataset at `source` and make it current.
    pub fn load_source(&mut self, source: &str) {
        match self.cache.get_or_load(source, &self.load_options) {
            Ok(dataset) => {
                self.source = Some(source.to_string());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load {source}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Drop the cache and fetch the current source again.
    pub fn reload(&mut self) {
        self.cache.clear();
        if let Some(source) = self.source.clone() {
            self.load_source(&source);
        }
    }

    /// Ingest a newly loaded dataset and reset the filters: swimmers start
    /// unselected (which routes attention to the ranking view), every other
    /// dimension starts at "select all".
    pub fn set_dataset(&mut self, dataset: Arc<SwimDataset>) {
        self.filters = FilterState {
            swimmers: Selection::default(),
            styles: Selection::all(),
            distances: Selection::all(),
            phases: Selection::all(),
            metrics: Selection::all(),
        };
        self.swimmer_order.clear();
        self.colors = SwimmerColors::new(&dataset.domains.swimmers);
        self.ranking = ranking(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.active_tab = Tab::Ranking;
        self.refilter();
    }

    /// Recompute the derived views after any filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
            self.charts = chart_groups(ds, &self.visible_indices);
        } else {
            self.visible_indices.clear();
            self.charts.clear();
        }
    }

    /// Toggle a swimmer, honouring the four-swimmer cap.
    pub fn toggle_swimmer(&mut self, swimmer: &str) {
        if self.filters.swimmers.values.remove(swimmer) {
            self.swimmer_order.retain(|name| name != swimmer);
        } else {
            if self.filters.swimmers.values.len() >= MAX_SWIMMERS {
                self.status_message =
                    Some(format!("Select at most {MAX_SWIMMERS} swimmers"));
                return;
            }
            self.filters.swimmers.values.insert(swimmer.to_string());
            self.swimmer_order.push(swimmer.to_string());
        }
        self.refilter();
    }

    /// The swimmers currently selected, in the order they were picked.
    pub fn selected_swimmers(&self) -> Vec<String> {
        self.swimmer_order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    const SAMPLE: &str = "\
Nadador,Estilo,Distancia,Fase,Parametro,Valor
Ana Garcia,Libre,50,PRELIMINAR,T TOTAL,30.1
Luis Perez,Libre,50,FINAL,T TOTAL,28.4
Eva Ruiz,Libre,100,FINAL,T TOTAL,61.0
Mia Cole,Libre,100,FINAL,T TOTAL,62.0
Zoe Lane,Libre,100,FINAL,T TOTAL,63.0
";

    fn state_with_sample() -> AppState {
        let ds = load_from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap();
        let mut state = AppState::default();
        state.set_dataset(Arc::new(ds));
        state
    }

    #[test]
    fn new_dataset_starts_with_no_swimmers_and_everything_else_selected() {
        let state = state_with_sample();
        assert!(state.filters.swimmers.values.is_empty());
        assert!(!state.filters.swimmers.select_all);
        assert!(state.filters.styles.select_all);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.ranking.len(), 5);
    }

    #[test]
    fn toggling_a_swimmer_refilters() {
        let mut state = state_with_sample();
        state.toggle_swimmer("Ana Garcia");
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.charts.len(), 1);

        state.toggle_swimmer("Ana Garcia");
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn the_swimmer_cap_is_enforced() {
        let mut state = state_with_sample();
        for name in ["Ana Garcia", "Luis Perez", "Eva Ruiz", "Mia Cole"] {
            state.toggle_swimmer(name);
        }
        state.toggle_swimmer("Zoe Lane");
        assert_eq!(state.filters.swimmers.values.len(), MAX_SWIMMERS);
        assert_eq!(state.swimmer_order.len(), MAX_SWIMMERS);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn loading_lands_on_the_ranking_tab() {
        let mut state = state_with_sample();
        assert_eq!(state.active_tab, Tab::Ranking);

        // A reload resets the tab too.
        state.active_tab = Tab::Charts;
        let ds = load_from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap();
        state.set_dataset(Arc::new(ds));
        assert_eq!(state.active_tab, Tab::Ranking);
    }

    #[test]
    fn selected_swimmers_keep_pick_order() {
        let mut state = state_with_sample();
        state.toggle_swimmer("Luis Perez");
        state.toggle_swimmer("Ana Garcia");
        assert_eq!(
            state.selected_swimmers(),
            vec!["Luis Perez".to_string(), "Ana Garcia".to_string()]
        );

        state.toggle_swimmer("Luis Perez");
        assert_eq!(state.selected_swimmers(), vec!["Ana Garcia".to_string()]);
        assert_eq!(state.filters.swimmers.values.len(), 1);
    }
}
