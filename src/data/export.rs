use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use super::model::SwimDataset;

// ---------------------------------------------------------------------------
// Filtered CSV export
// ---------------------------------------------------------------------------

/// Encode the given rows to CSV with the dataset's normalized column
/// structure. Missing values become empty cells; phases are written with
/// their canonical labels, so the output parses back through the loader into
/// the same table (modulo the value coercion the loader performs anyway).
pub fn write_filtered<W: Write>(
    dataset: &SwimDataset,
    indices: &[usize],
    writer: W,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&dataset.columns)
        .context("writing CSV header")?;

    for &idx in indices {
        let rec = &dataset.records[idx];
        let row: Vec<String> = dataset
            .columns
            .iter()
            .map(|col| match col.as_str() {
                "Nadador" => rec.swimmer.clone(),
                "Estilo" => rec.style.clone(),
                "Distancia" => rec.distance.to_string(),
                "Fase" => rec.phase.to_string(),
                "Parametro" => rec.metric.clone(),
                "Valor" => rec.value.map(|v| v.to_string()).unwrap_or_default(),
                other => rec.extra.get(other).cloned().unwrap_or_default(),
            })
            .collect();
        wtr.write_record(&row)
            .with_context(|| format!("writing row {idx}"))?;
    }

    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the filtered rows to a file.
pub fn export_to_path(dataset: &SwimDataset, indices: &[usize], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_filtered(dataset, indices, file)?;
    log::info!("exported {} rows to {}", indices.len(), path.display());
    Ok(())
}

/// Default export filename, embedding the current date.
pub fn suggested_filename() -> String {
    format!("splitdash_filtered_{}.csv", Local::now().format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterState, Selection};
    use crate::data::loader::{load_from_reader, LoadOptions};

    const SAMPLE: &str = "\
Nadador,Estilo,Distancia,Cat_Prueba,Parametro,Valor,Competencia
Ana Garcia,Libre,50,PRELIMINAR,T TOTAL,30.12,Nacional
Luis Perez,Libre,50,FINAL,T TOTAL,no marca,Nacional
Luis Perez,Libre,50,Exhibicion,V1,1.82,Estatal
";

    #[test]
    fn export_round_trips_through_the_loader() {
        let ds = load_from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap();
        let indices = filtered_indices(&ds, &FilterState::select_all());

        let mut buf = Vec::new();
        write_filtered(&ds, &indices, &mut buf).unwrap();

        let reloaded = load_from_reader(buf.as_slice(), &LoadOptions::default()).unwrap();
        assert_eq!(reloaded.columns, ds.columns);
        assert_eq!(reloaded.records, ds.records);
    }

    #[test]
    fn only_the_filtered_subset_is_written() {
        let ds = load_from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap();
        let mut filters = FilterState::select_all();
        filters.metrics = Selection {
            values: ["V1".to_string()].into(),
            select_all: false,
        };
        let indices = filtered_indices(&ds, &filters);

        let mut buf = Vec::new();
        write_filtered(&ds, &indices, &mut buf).unwrap();

        let reloaded = load_from_reader(buf.as_slice(), &LoadOptions::default()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records[0], ds.records[2]);
    }

    #[test]
    fn suggested_filename_embeds_the_date() {
        let name = suggested_filename();
        assert!(name.starts_with("splitdash_filtered_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "splitdash_filtered_YYYYMMDD.csv".len());
    }
}
