use std::sync::mpsc;

use filmgrain_core::config::ClientConfig;
use filmgrain_core::error::FilmGrainError;
use filmgrain_core::session::{Session, Settlement};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::UIState;
use crate::surface::TextureSurface;
use crate::worker;

pub struct FilmGrainApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub session: Session<TextureSurface>,
    pub ui_state: UIState,
}

impl FilmGrainApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let config = ClientConfig::default();
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx, ctx.clone(), config.endpoint.clone());

        Self {
            cmd_tx,
            result_rx,
            session: Session::new(TextureSurface::new(ctx.clone()), config.params),
            ui_state: UIState {
                endpoint: config.endpoint,
                ..Default::default()
            },
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::SourceLoaded { blob } => {
                    self.ui_state.source_loaded(&blob);
                    self.session.select_source(Some(blob));
                }
                WorkerResult::Settled { generation, outcome } => {
                    match self.session.settle(generation, outcome) {
                        Settlement::Succeeded => self.ui_state.add_log("Grain applied".into()),
                        Settlement::Failed => {
                            let notice = self.session.notice().unwrap_or_default().to_string();
                            self.ui_state.add_log(format!("ERROR: {notice}"));
                        }
                        Settlement::Discarded => self
                            .ui_state
                            .add_log("Discarded result for a previous image".into()),
                        Settlement::Ignored => {}
                    }
                }
                WorkerResult::ResultSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) -> bool {
        self.cmd_tx.send(cmd).is_ok()
    }

    /// Issue a process request if the session allows one.
    pub fn start_processing(&mut self) {
        let Some(request) = self.session.begin_process() else {
            return;
        };
        let generation = request.generation();
        if !self.send_command(WorkerCommand::Process { request }) {
            // Worker is gone; settle now so the session does not stay Pending.
            self.session.settle(
                generation,
                Err(FilmGrainError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "worker thread stopped",
                ))),
            );
        }
    }

    /// Apply an imported config: parameters go to the session, the endpoint to
    /// the worker.
    pub fn apply_config(&mut self, config: ClientConfig) {
        self.session.store_mut().replace(config.params);
        self.ui_state.endpoint = config.endpoint.clone();
        self.send_command(WorkerCommand::Configure {
            endpoint: config.endpoint,
        });
    }

    pub fn current_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.ui_state.endpoint.clone(),
            params: *self.session.params(),
        }
    }
}

impl eframe::App for FilmGrainApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::preview::show(ctx, self);

        if let Some(notice) = self.session.notice().map(str::to_string) {
            egui::Window::new("Processing failed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(notice);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.session.dismiss_notice();
                    }
                });
        }

        if self.ui_state.show_about {
            egui::Window::new("About FilmGrain")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("FilmGrain");
                        ui.label("Add realistic film grain to your photos.");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
