use std::path::Path;

use anyhow::{Context, Result};
use filmgrain_core::config::ClientConfig;

use crate::app::FilmGrainApp;

pub fn show(ctx: &egui::Context, app: &mut FilmGrainApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut =
                    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui
                    .add(
                        egui::Button::new("Open...")
                            .shortcut_text(ctx.format_shortcut(&open_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    super::pick_source(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut =
                    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui
                    .add(
                        egui::Button::new("Quit")
                            .shortcut_text(ctx.format_shortcut(&quit_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.session.store_mut().reset();
                    app.ui_state.add_log("Parameters reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| {
            i.consume_shortcut(&egui::KeyboardShortcut::new(
                egui::Modifiers::COMMAND,
                egui::Key::O,
            ))
        }) {
            super::pick_source(app);
        }
        if ctx.input_mut(|i| {
            i.consume_shortcut(&egui::KeyboardShortcut::new(
                egui::Modifiers::COMMAND,
                egui::Key::Q,
            ))
        }) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn import_config(app: &mut FilmGrainApp) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("TOML", &["toml"])
        .pick_file()
    else {
        return;
    };
    match read_config(&path) {
        Ok(config) => {
            app.apply_config(config);
            app.ui_state
                .add_log(format!("Config imported: {}", path.display()));
        }
        Err(e) => app.ui_state.add_log(format!("ERROR: {e:#}")),
    }
}

fn export_config(app: &mut FilmGrainApp) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("TOML", &["toml"])
        .set_file_name("filmgrain.toml")
        .save_file()
    else {
        return;
    };
    match write_config(&app.current_config(), &path) {
        Ok(()) => app
            .ui_state
            .add_log(format!("Config exported: {}", path.display())),
        Err(e) => app.ui_state.add_log(format!("ERROR: {e:#}")),
    }
}

fn read_config(path: &Path) -> Result<ClientConfig> {
    ClientConfig::load(path)
        .with_context(|| format!("Failed to import config {}", path.display()))
}

fn write_config(config: &ClientConfig, path: &Path) -> Result<()> {
    config
        .save(path)
        .with_context(|| format!("Failed to export config {}", path.display()))
}
