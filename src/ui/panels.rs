use std::collections::BTreeSet;
use std::fmt::Display;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::data::filter::Selection;
use crate::data::metrics;
use crate::state::{AppState, MAX_SWIMMERS};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export filtered…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            ui.separator();
            // Applies on the next load.
            ui.checkbox(&mut state.load_options.strict_phases, "Strict phase labels");
        });

        ui.separator();

        ui.label("URL:");
        ui.add(
            egui::TextEdit::singleline(&mut state.url_input)
                .desired_width(260.0)
                .hint_text("https://…/dataset.csv"),
        );
        if ui.button("Load").clicked() {
            let url = state.url_input.trim().to_string();
            if !url.is_empty() {
                state.load_source(&url);
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };
    let domains = &dataset.domains;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Swimmers (capped, coloured like their chart lines) ----
            let n_selected = state.filters.swimmers.values.len();
            let header = format!("Swimmers  ({n_selected}/{})", domains.swimmers.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("swimmers")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.small(format!("Select up to {MAX_SWIMMERS}"));
                    for name in &domains.swimmers {
                        let mut checked = state.filters.swimmers.values.contains(name);
                        let text = RichText::new(name).color(state.colors.color_for(name));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_swimmer(name);
                        }
                    }
                });

            let mut changed = false;

            selection_section(ui, "Styles", &domains.styles, &mut state.filters.styles, &mut changed);
            selection_section(
                ui,
                "Distances",
                &domains.distances,
                &mut state.filters.distances,
                &mut changed,
            );
            selection_section(ui, "Phases", &domains.phases, &mut state.filters.phases, &mut changed);

            // ---- Metrics (shown with their readable names) ----
            let resolved = state.filters.metrics.resolve(&domains.metrics).len();
            let header = format!("Metrics  ({resolved}/{})", domains.metrics.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("metrics")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    if ui
                        .checkbox(&mut state.filters.metrics.select_all, "All metrics")
                        .changed()
                    {
                        changed = true;
                    }
                    if !state.filters.metrics.select_all {
                        for code in &domains.metrics {
                            let mut checked = state.filters.metrics.values.contains(code);
                            if ui.checkbox(&mut checked, metrics::display_name(code)).changed() {
                                if checked {
                                    state.filters.metrics.values.insert(code.clone());
                                } else {
                                    state.filters.metrics.values.remove(code);
                                }
                                changed = true;
                            }
                        }
                    }
                });

            if changed {
                state.refilter();
            }
        });
}

/// One collapsible filter section: a "select all" checkbox plus per-value
/// checkboxes against the dimension's domain.
fn selection_section<T: Ord + Clone + Display>(
    ui: &mut Ui,
    title: &str,
    domain: &BTreeSet<T>,
    selection: &mut Selection<T>,
    changed: &mut bool,
) {
    let resolved = selection.resolve(domain).len();
    let header = format!("{title}  ({resolved}/{})", domain.len());

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui
                .checkbox(&mut selection.select_all, format!("All {}", title.to_lowercase()))
                .changed()
            {
                *changed = true;
            }
            if selection.select_all {
                return;
            }
            if ui.small_button("None").clicked() && !selection.values.is_empty() {
                selection.values.clear();
                *changed = true;
            }
            for val in domain {
                let mut checked = selection.values.contains(val);
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    if checked {
                        selection.values.insert(val.clone());
                    } else {
                        selection.values.remove(val);
                    }
                    *changed = true;
                }
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open swim dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(&path.to_string_lossy());
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        state.status_message = Some("Nothing to export: no dataset loaded".to_string());
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .set_file_name(export::suggested_filename())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::export_to_path(&dataset, &state.visible_indices, &path) {
            Ok(()) => {
                state.status_message = Some(format!(
                    "Exported {} rows to {}",
                    state.visible_indices.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
