use egui_extras::{Column, TableBuilder};
use sc_app::ChartData;

#[derive(Default)]
pub struct TableView;

impl TableView {
    pub fn show(&mut self, ui: &mut egui::Ui, data: &ChartData) {
        egui::CollapsingHeader::new("Prediction data")
            .default_open(false)
            .show(ui, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
                    .column(Column::initial(110.0).at_least(80.0)) // Temperature
                    .column(Column::initial(150.0).at_least(100.0)) // Yield
                    .column(Column::initial(150.0).at_least(100.0)) // Tensile
                    .header(22.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("T [°C]");
                        });
                        header.col(|ui| {
                            ui.strong("Yield [MPa]");
                        });
                        header.col(|ui| {
                            ui.strong("Tensile [MPa]");
                        });
                    })
                    .body(|mut body| {
                        for row in &data.table {
                            body.row(18.0, |mut table_row| {
                                table_row.col(|ui| {
                                    ui.label(format!("{:.0}", row.temperature_c));
                                });
                                table_row.col(|ui| {
                                    ui.label(format!("{:.1}", row.yield_mpa));
                                });
                                table_row.col(|ui| {
                                    ui.label(format!("{:.1}", row.tensile_mpa));
                                });
                            });
                        }
                    });
            });
    }
}
