use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoint, PlotPoints};
use sc_app::{ChartData, ChartSpec};
use sc_core::Property;
use sc_core::units::{degc, format_point, mpa};

#[derive(Default)]
pub struct ChartView;

fn line_color(property: Property) -> egui::Color32 {
    match property {
        Property::YieldStrength => egui::Color32::from_rgb(99, 110, 250),
        Property::TensileStrength => egui::Color32::from_rgb(239, 85, 59),
    }
}

fn hover_label(name: &str, value: &PlotPoint) -> String {
    let point = format_point(degc(value.x), mpa(value.y));
    if name.is_empty() {
        point
    } else {
        format!("{name}\n{point}")
    }
}

impl ChartView {
    pub fn show(&mut self, ui: &mut egui::Ui, spec: &ChartSpec, data: &ChartData) {
        ui.strong(&spec.legend_title);

        let lines: Vec<Line> = data
            .series()
            .into_iter()
            .map(|series| {
                let plot_points: PlotPoints = series.points.into();
                Line::new(plot_points)
                    .name(series.property.label())
                    .color(line_color(series.property))
                    .width(2.0)
            })
            .collect();

        let (min, max) = spec.bounds(data);
        Plot::new("strength_plot")
            .legend(Legend::default())
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .auto_bounds([false, false].into())
            .label_formatter(hover_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .height(420.0)
            .show(ui, |plot_ui| {
                // fixed strength axis; predictions outside it are clipped
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                for line in lines {
                    plot_ui.line(line);
                }
            });
    }
}
