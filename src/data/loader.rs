use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::sync::Arc;

use thiserror::Error;

use super::model::{Phase, PhaseLabel, Record, SwimDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Data-source failures. These propagate to the caller uncaught; there is no
/// retry. Cell-level problems (a non-numeric value) are not errors, see
/// [`load_from_reader`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to open {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tabular data")]
    Csv(#[from] csv::Error),
    #[error("duplicate column name after normalization: {0}")]
    DuplicateColumn(String),
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("row {row}: unmapped phase label {label:?}")]
    UnmappedPhase { row: usize, label: String },
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Loader behavior toggles.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Treat an unmapped phase label as a data-quality error instead of
    /// passing it through verbatim. Off by default.
    pub strict_phases: bool,
}

/// Columns every source must provide (after header normalization).
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["Nadador", "Estilo", "Distancia", "Fase", "Parametro", "Valor"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a local path or an HTTP(S) URL.
pub fn load(source: &str, options: &LoadOptions) -> Result<SwimDataset, LoadError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::blocking::get(source)
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| LoadError::Fetch {
                url: source.to_string(),
                source: e,
            })?;
        load_from_reader(response, options)
    } else {
        let file = std::fs::File::open(source).map_err(|e| LoadError::Open {
            path: source.to_string(),
            source: e,
        })?;
        load_from_reader(file, options)
    }
}

/// Parse a delimited dataset with a header row and normalize it.
///
/// Normalization steps, in order:
/// 1. Header cleanup: trim, drop slashes, internal spaces become
///    underscores; the legacy `Cat_Prueba` column becomes `Fase`.
/// 2. Phase canonicalization through the spelling-variant table; unmapped
///    labels pass through verbatim (or fail the load under
///    [`LoadOptions::strict_phases`]).
/// 3. `Valor` coerced to `f64`; non-numeric cells become missing. The row is
///    always kept.
/// 4. `Distancia` parsed as meters; a row whose distance does not parse is
///    skipped with a warning rather than failing the load.
pub fn load_from_reader<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<SwimDataset, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| {
            let name = normalize_column(h);
            if name == "Cat_Prueba" {
                "Fase".to_string()
            } else {
                name
            }
        })
        .collect();

    for (i, name) in columns.iter().enumerate() {
        if columns[..i].contains(name) {
            return Err(LoadError::DuplicateColumn(name.clone()));
        }
    }

    let mut core_idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in core_idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    }
    let [swimmer_idx, style_idx, distance_idx, phase_idx, metric_idx, value_idx] = core_idx;

    let mut records = Vec::new();
    let mut warned_phases: BTreeSet<String> = BTreeSet::new();
    let mut warned_distances: BTreeSet<String> = BTreeSet::new();

    for (row_no, result) in rdr.records().enumerate() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        // A junk distance cell is a row-level problem, not a load-level one:
        // the row is skipped, the rest of the dataset still loads.
        let distance_text = cell(distance_idx).trim();
        let Some(distance) = parse_distance(distance_text) else {
            if warned_distances.insert(distance_text.to_string()) {
                log::warn!("row {row_no}: invalid distance {distance_text:?}, row skipped");
            }
            continue;
        };

        let raw_phase = cell(phase_idx);
        let phase = canonicalize_phase(raw_phase);
        if let PhaseLabel::Other(label) = &phase {
            if options.strict_phases {
                return Err(LoadError::UnmappedPhase {
                    row: row_no,
                    label: label.clone(),
                });
            }
            if warned_phases.insert(label.clone()) {
                log::warn!("row {row_no}: unmapped phase label {label:?}, kept verbatim");
            }
        }

        // Non-numeric values become missing, never an error, never a
        // dropped row.
        let value = cell(value_idx).trim().parse::<f64>().ok();

        let mut extra = BTreeMap::new();
        for (idx, text) in row.iter().enumerate() {
            if !core_idx.contains(&idx) {
                extra.insert(columns[idx].clone(), text.to_string());
            }
        }

        records.push(Record {
            swimmer: cell(swimmer_idx).trim().to_string(),
            style: cell(style_idx).trim().to_string(),
            distance,
            phase,
            metric: cell(metric_idx).trim().to_string(),
            value,
            extra,
        });
    }

    Ok(SwimDataset::from_records(records, columns))
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Clean one header cell: trim, drop slashes, internal spaces → underscores.
fn normalize_column(raw: &str) -> String {
    raw.trim().replace('/', "").replace(' ', "_")
}

/// Map a raw phase cell to its canonical label. Matching is case-insensitive
/// and normalizes the one accented character seen in the wild (`Ó` → `O`);
/// anything the variant table does not know is returned verbatim.
pub fn canonicalize_phase(raw: &str) -> PhaseLabel {
    let key = raw.trim().to_uppercase().replace('Ó', "O");
    let phase = match key.as_str() {
        "PRE-ELIMINAR" | "PRELIMINAR" | "PRE ELIMINAR" => Phase::Preliminary,
        "SEMIFINAL" | "SEMI-FINAL" => Phase::Semifinal,
        "FINAL" => Phase::Final,
        _ => return PhaseLabel::Other(raw.to_string()),
    };
    PhaseLabel::Known(phase)
}

fn parse_distance(text: &str) -> Option<u32> {
    if let Ok(d) = text.parse::<u32>() {
        return Some(d);
    }
    // Some exports write distances as floats ("50.0").
    text.parse::<f64>()
        .ok()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0)
        .map(|f| f as u32)
}

// ---------------------------------------------------------------------------
// DatasetCache – one load per source per process
// ---------------------------------------------------------------------------

/// Memoizes loads by source location so repeated interactions never refetch.
/// The cached dataset is immutable and shared via `Arc`; `clear` is the only
/// invalidation hook short of a process restart.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: BTreeMap<String, Arc<SwimDataset>>,
}

impl DatasetCache {
    /// Return the cached dataset for `source`, loading it on first use.
    pub fn get_or_load(
        &mut self,
        source: &str,
        options: &LoadOptions,
    ) -> Result<Arc<SwimDataset>, LoadError> {
        if let Some(ds) = self.entries.get(source) {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load(source, options)?);
        log::info!(
            "loaded {} rows from {source} ({} swimmers, {} metrics)",
            ds.len(),
            ds.domains.swimmers.len(),
            ds.domains.metrics.len()
        );
        self.entries.insert(source.to_string(), Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop every cached dataset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
