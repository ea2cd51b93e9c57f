use filmgrain_core::consts::{GRAIN_POWER_RANGE, SCALE_RANGE, SLIDER_STEP, UNIT_RANGE};
use filmgrain_core::params::{BooleanField, GrainType, NumericField};
use filmgrain_core::session::RequestState;

use crate::app::FilmGrainApp;

/// Sliders shown in the panel, in display order.
const SLIDERS: [(NumericField, &str, (f64, f64)); 5] = [
    (NumericField::GrainPower, "Grain Power", GRAIN_POWER_RANGE),
    (NumericField::Scale, "Scale", SCALE_RANGE),
    (NumericField::Shadows, "Shadows", UNIT_RANGE),
    (NumericField::Highs, "Highs", UNIT_RANGE),
    (NumericField::GrainSat, "Saturation", UNIT_RANGE),
];

pub fn show(ctx: &egui::Context, app: &mut FilmGrainApp) {
    egui::SidePanel::left("controls")
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            let blocked = app.session.notice().is_some();
            ui.add_enabled_ui(!blocked, |ui| {
                ui.add_space(4.0);
                file_section(ui, app);
                ui.separator();
                grain_section(ui, app);
                ui.separator();
                process_button(ui, app);
            });
        });
}

fn file_section(ui: &mut egui::Ui, app: &mut FilmGrainApp) {
    let dims = app
        .ui_state
        .source_dimensions
        .map(|(w, h)| format!("{w}x{h}"));
    super::section_header(ui, "Image", dims.as_deref());
    ui.add_space(4.0);

    if ui.button("Choose Image...").clicked() {
        super::pick_source(app);
    }

    if let Some(source) = app.session.source() {
        let blob = source.blob();
        ui.label(blob.file_name());
        ui.small(format!("{}, {} KiB", blob.mime_type(), blob.len() / 1024));
    }
}

fn grain_section(ui: &mut egui::Ui, app: &mut FilmGrainApp) {
    let state = app.session.state().to_string();
    super::section_header(ui, "Grain", Some(&state));
    ui.add_space(4.0);

    for (field, label, (min, max)) in SLIDERS {
        let mut value = app.session.params().numeric(field);
        let response = ui.add(
            egui::Slider::new(&mut value, min..=max)
                .step_by(SLIDER_STEP)
                .text(label),
        );
        if response.changed() {
            app.session.store_mut().set_value(field, value);
        }
    }

    let mut grain_type = app.session.params().grain_type;
    if super::enum_combo(ui, "Grain Type", &mut grain_type, &GrainType::ALL) {
        app.session
            .store_mut()
            .set_value(NumericField::GrainType, f64::from(u8::from(grain_type)));
    }

    ui.add_space(4.0);
    let mut gray = app.session.params().gray;
    if ui.checkbox(&mut gray, "Force Grayscale").changed() {
        app.session.set_boolean(BooleanField::Gray, gray);
    }

    if ui.small_button("Reset").clicked() {
        app.session.store_mut().reset();
    }
}

fn process_button(ui: &mut egui::Ui, app: &mut FilmGrainApp) {
    let pending = app.session.state() == RequestState::Pending;
    let label = if pending { "Processing..." } else { "Apply Grain" };

    ui.add_space(4.0);
    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 32.0));
    if ui.add_enabled(app.session.can_process(), button).clicked() {
        app.start_processing();
    }
}
