use filmgrain_core::asset::ImageAsset;
use filmgrain_core::session::RequestState;

use crate::app::FilmGrainApp;
use crate::messages::WorkerCommand;
use crate::surface::TextureSurface;

pub fn show(ctx: &egui::Context, app: &mut FilmGrainApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let surface = app.session.assets().surface();
        let pending = app.session.state() == RequestState::Pending;
        let mut download = false;

        ui.columns(2, |cols| {
            cols[0].heading("Original");
            image_or_placeholder(&mut cols[0], surface, app.session.source(), "No image selected");

            cols[1].horizontal(|ui| {
                ui.heading("Processed");
                if app.session.download().is_some() {
                    download = ui.button("Download").clicked();
                }
            });
            let placeholder = if pending {
                "Processing..."
            } else {
                "Waiting for result"
            };
            image_or_placeholder(&mut cols[1], surface, app.session.result(), placeholder);
        });

        if download {
            save_result(app);
        }
    });
}

fn image_or_placeholder(
    ui: &mut egui::Ui,
    surface: &TextureSurface,
    asset: Option<&ImageAsset>,
    placeholder: &str,
) {
    match asset {
        Some(asset) => match surface.texture(asset.handle()) {
            Some(texture) => {
                ui.add(egui::Image::new(texture).shrink_to_fit());
            }
            None => {
                ui.label(format!("{} (preview unavailable)", asset.blob().file_name()));
            }
        },
        None => {
            ui.weak(placeholder);
        }
    }
}

fn save_result(app: &FilmGrainApp) {
    let Some(download) = app.session.download() else {
        return;
    };
    let file_name = download.file_name;
    let blob = download.asset.blob().clone();
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(file_name)
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveResult { path, blob });
        }
    });
}
