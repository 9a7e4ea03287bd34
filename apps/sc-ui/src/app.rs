use crate::views::{ChartView, InputsView, TableView};
use sc_app::{Calculator, Session};

pub struct SteelCalcApp {
    calculator: Calculator,
    session: Session,
    inputs_view: InputsView,
    chart_view: ChartView,
    table_view: TableView,
}

impl SteelCalcApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, calculator: Calculator) -> Self {
        Self {
            calculator,
            session: Session::default(),
            inputs_view: InputsView::default(),
            chart_view: ChartView::default(),
            table_view: TableView::default(),
        }
    }
}

impl eframe::App for SteelCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Self {
            calculator,
            session,
            inputs_view,
            chart_view,
            table_view,
        } = self;

        egui::SidePanel::left("composition_inputs")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                inputs_view.show(ui, session);
            });

        let error = session.refresh(calculator).err();
        let data = session.chart();

        egui::CentralPanel::default().show(ctx, |ui| {
            let spec = calculator.spec();
            ui.heading(&spec.title);
            ui.label(
                "Estimates the yield strength and tensile strength of a steel from its \
                 chemical composition, between 20 °C and 660 °C, with a gradient boosted \
                 tree model.",
            );
            ui.label(
                "The model covers low carbon steels only, which is why the carbon \
                 content is limited to low levels.",
            );
            ui.separator();

            if let Some(e) = &error {
                ui.colored_label(egui::Color32::RED, format!("Prediction failed: {}", e));
            }
            // after a failure this is the last successful chart
            if let Some(data) = data {
                chart_view.show(ui, spec, data);
                ui.add_space(8.0);
                table_view.show(ui, data);
            }
        });
    }
}
