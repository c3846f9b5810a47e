use eframe::egui::{RichText, ScrollArea, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::data::metrics;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Comparative charts (central panel, Charts tab)
// ---------------------------------------------------------------------------

/// Render one line chart per (metric, style) group of the filtered rows,
/// sectioned by metric category.
pub fn charts_view(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to compare swimmers  (File → Open…)");
        });
        return;
    }

    if state.charts.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data for the current selection – pick swimmers and filters on the left");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut current_category: Option<&str> = None;

            for group in &state.charts {
                let category = metrics::category_of(&group.metric).unwrap_or("Other");
                if current_category != Some(category) {
                    ui.heading(category);
                    ui.separator();
                    current_category = Some(category);
                }

                ui.label(
                    RichText::new(format!(
                        "{} – {}",
                        metrics::display_name(&group.metric),
                        group.style
                    ))
                    .strong(),
                );

                Plot::new(format!("chart_{}_{}", group.metric, group.style))
                    .legend(Legend::default())
                    .height(260.0)
                    .x_axis_label("Phase (1 Preliminary · 2 Semifinal · 3 Final)")
                    .y_axis_label(metrics::display_name(&group.metric))
                    .allow_scroll(false)
                    .allow_boxed_zoom(true)
                    .allow_drag(true)
                    .allow_zoom(true)
                    .show(ui, |plot_ui| {
                        for series in &group.series {
                            let points: PlotPoints = series
                                .points
                                .iter()
                                .map(|&(phase, value)| [f64::from(phase.ordinal()), value])
                                .collect();

                            let line = Line::new(points)
                                .name(&series.swimmer)
                                .color(state.colors.color_for(&series.swimmer))
                                .width(1.5);

                            plot_ui.line(line);
                        }
                    });

                ui.add_space(12.0);
            }
        });
}
