use sc_app::Session;
use sc_core::Element;

/// Sidebar with one discrete slider per composition field.
#[derive(Default)]
pub struct InputsView;

impl InputsView {
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut Session) {
        ui.heading("User Input Features");
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("composition_inputs_scroll")
            .show(ui, |ui| {
                for element in Element::ALL {
                    let range = element.range();
                    let decimals = range.decimals as usize;
                    let mut index = session.sample().index(element);

                    ui.label(element.label());
                    // The slider moves over indices; the label shows the legal value.
                    let slider = egui::Slider::new(&mut index, 0..=range.count - 1)
                        .show_value(true)
                        .custom_formatter(move |i, _| {
                            format!("{:.decimals$}", range.value(i as usize))
                        })
                        .custom_parser(move |text| {
                            text.trim()
                                .parse::<f64>()
                                .ok()
                                .map(|v| range.snap_index(v) as f64)
                        });
                    if ui.add(slider).changed() {
                        session.set_index(element, index);
                    }
                    ui.add_space(4.0);
                }

                ui.separator();
                if ui.button("Reset to defaults").clicked() {
                    session.reset();
                }
            });
    }
}
