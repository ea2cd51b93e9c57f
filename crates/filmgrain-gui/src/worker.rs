use std::path::Path;
use std::sync::mpsc;

use filmgrain_core::asset::ImageBlob;
use filmgrain_core::config::EndpointConfig;
use filmgrain_core::error::FilmGrainError;
use filmgrain_core::session::ProcessRequest;
use filmgrain_core::transport::{HttpTransport, Transport};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    endpoint: EndpointConfig,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("filmgrain-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, endpoint);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    endpoint: EndpointConfig,
) {
    let mut transport = connect(&endpoint, &tx, &ctx);

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadSource { path } => {
                handle_load_source(&path, &tx, &ctx);
            }
            WorkerCommand::Process { request } => {
                spawn_process(request, transport.clone(), &tx, &ctx);
            }
            WorkerCommand::SaveResult { path, blob } => {
                handle_save_result(&path, &blob, &tx, &ctx);
            }
            WorkerCommand::Configure { endpoint } => {
                transport = connect(&endpoint, &tx, &ctx);
            }
        }
    }
}

fn connect(
    endpoint: &EndpointConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Result<HttpTransport, String> {
    match HttpTransport::new(endpoint) {
        Ok(transport) => {
            send_log(tx, ctx, format!("Service: {}", transport.base_url()));
            Ok(transport)
        }
        Err(e) => {
            let message = format!("Invalid service endpoint: {e}");
            send_error(tx, ctx, message.clone());
            Err(message)
        }
    }
}

fn handle_load_source(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match ImageBlob::from_path(path) {
        Ok(blob) => send(tx, ctx, WorkerResult::SourceLoaded { blob }),
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

/// Run the upload on its own thread so source loads are not queued behind it.
fn spawn_process(
    request: ProcessRequest,
    transport: Result<HttpTransport, String>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let generation = request.generation();
    let (upload_tx, upload_ctx) = (tx.clone(), ctx.clone());
    let spawned = std::thread::Builder::new()
        .name("filmgrain-upload".into())
        .spawn(move || handle_process(&request, transport.as_ref(), &upload_tx, &upload_ctx));
    if let Err(e) = spawned {
        send(
            tx,
            ctx,
            WorkerResult::Settled {
                generation,
                outcome: Err(FilmGrainError::Io(e)),
            },
        );
    }
}

fn handle_process(
    request: &ProcessRequest,
    transport: Result<&HttpTransport, &String>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(tx, ctx, format!("Uploading {}...", request.source.file_name()));

    let outcome = match transport {
        Ok(transport) => transport.send(request),
        Err(message) => Err(FilmGrainError::InvalidEndpoint(message.clone())),
    };
    send(
        tx,
        ctx,
        WorkerResult::Settled {
            generation: request.generation(),
            outcome,
        },
    );
}

fn handle_save_result(
    path: &Path,
    blob: &ImageBlob,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match std::fs::write(path, blob.bytes()) {
        Ok(()) => send(tx, ctx, WorkerResult::ResultSaved { path: path.to_path_buf() }),
        Err(e) => send_error(tx, ctx, format!("Failed to save {}: {e}", path.display())),
    }
}
