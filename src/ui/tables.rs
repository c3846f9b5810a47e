use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::metrics;
use crate::data::ranking::abbreviate_name;
use crate::data::views::detail_rows;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Per-swimmer detail tables (Details tab)
// ---------------------------------------------------------------------------

/// One table of filtered rows per selected swimmer.
pub fn details_view(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset first  (File → Open…)");
        });
        return;
    };

    let swimmers = state.selected_swimmers();
    if swimmers.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select at least one swimmer to see their rows");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for swimmer in &swimmers {
                ui.heading(swimmer);
                let rows = detail_rows(dataset, &state.visible_indices, swimmer);

                ui.push_id(swimmer, |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .column(Column::auto())
                        .column(Column::auto())
                        .column(Column::auto())
                        .column(Column::auto())
                        .column(Column::remainder())
                        .header(20.0, |mut header| {
                            for title in ["Style", "Distance", "Phase", "Metric", "Value"] {
                                header.col(|ui: &mut Ui| {
                                    ui.strong(title);
                                });
                            }
                        })
                        .body(|mut body| {
                            for &idx in &rows {
                                let rec = &dataset.records[idx];
                                body.row(18.0, |mut row| {
                                    row.col(|ui: &mut Ui| {
                                        ui.label(&rec.style);
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format!("{}m", rec.distance));
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(rec.phase.to_string());
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(metrics::display_name(&rec.metric));
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(
                                            rec.value
                                                .map(|v| format!("{v:.2}"))
                                                .unwrap_or_else(|| "–".to_string()),
                                        );
                                    });
                                });
                            }
                        });
                });

                ui.add_space(16.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Ranking view (Ranking tab)
// ---------------------------------------------------------------------------

/// Leaderboard per (style, distance): best total time, fastest first.
pub fn ranking_view(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset first  (File → Open…)");
        });
        return;
    }
    if state.ranking.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No total-time rows in this dataset");
        });
        return;
    }

    ui.checkbox(&mut state.abbreviate_ranking, "Compact names");
    ui.separator();

    // Partition the pre-sorted rows by (style, distance).
    let mut partitions: Vec<((String, u32), Vec<usize>)> = Vec::new();
    for (i, row) in state.ranking.iter().enumerate() {
        let key = (row.style.clone(), row.distance);
        match partitions.last_mut() {
            Some((last_key, rows)) if *last_key == key => rows.push(i),
            _ => partitions.push((key, vec![i])),
        }
    }

    let abbreviate = state.abbreviate_ranking;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for ((style, distance), rows) in &partitions {
                ui.heading(format!("{style} – {distance}m"));

                ui.push_id((style, distance), |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .column(Column::auto())
                        .column(Column::remainder())
                        .column(Column::auto())
                        .header(20.0, |mut header| {
                            for title in ["#", "Swimmer", "Best Total Time"] {
                                header.col(|ui: &mut Ui| {
                                    ui.strong(title);
                                });
                            }
                        })
                        .body(|mut body| {
                            for (rank, &idx) in rows.iter().enumerate() {
                                let entry = &state.ranking[idx];
                                // Abbreviation is applied once per render,
                                // always from the stored full name.
                                let name = if abbreviate {
                                    abbreviate_name(&entry.swimmer)
                                } else {
                                    entry.swimmer.clone()
                                };
                                body.row(18.0, |mut row| {
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format!("{}", rank + 1));
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(name.clone());
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format!("{:.2}", entry.best));
                                    });
                                });
                            }
                        });
                });

                ui.add_space(16.0);
            }
        });
}
