use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SplitdashApp {
    pub state: AppState,
}

impl eframe::App for SplitdashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (tab, title) in [
                    (Tab::Charts, "Charts"),
                    (Tab::Details, "Details"),
                    (Tab::Ranking, "Ranking"),
                ] {
                    if ui
                        .selectable_label(self.state.active_tab == tab, title)
                        .clicked()
                    {
                        self.state.active_tab = tab;
                    }
                }
            });
            ui.separator();

            match self.state.active_tab {
                Tab::Charts => plot::charts_view(ui, &self.state),
                Tab::Details => tables::details_view(ui, &self.state),
                Tab::Ranking => tables::ranking_view(ui, &mut self.state),
            }
        });
    }
}
