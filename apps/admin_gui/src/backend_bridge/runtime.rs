//! Runtime bridge between UI command queue and backend event intake.

use std::{path::PathBuf, sync::Arc, thread};

use client_core::{report::EventReport, AdminApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the worker thread. Each command runs as its own task on a tokio
/// multi-thread runtime, so a slow request never holds up the queue.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn AdminApi>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!(error = %err, "failed to build backend runtime");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("No se pudo iniciar el servicio de operaciones: {err}"),
                )));
                return;
            }
        };

        tracing::info!("backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info("Servicio listo".to_string()));
        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = handle_command(api.as_ref(), cmd).await;
                if let Some(event) = event {
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui event receiver dropped");
                    }
                }
            });
        }
        tracing::info!("ui command channel closed; backend worker stopping");
        runtime.shutdown_background();
    })
}

/// Runs one command against the API. `None` means there is nothing to report,
/// which only happens when the user cancels the report save dialog.
pub async fn handle_command(api: &dyn AdminApi, cmd: BackendCommand) -> Option<UiEvent> {
    let event = match cmd {
        BackendCommand::LoadEvents { activation } => UiEvent::EventsLoaded {
            activation,
            result: api.list_events().await,
        },
        BackendCommand::DeleteEvent { activation, id } => {
            let result = api.delete_event(&id).await;
            UiEvent::EventDeleted {
                activation,
                id,
                result,
            }
        }
        BackendCommand::LoadOrders { activation } => UiEvent::OrdersLoaded {
            activation,
            result: api.list_orders().await,
        },
        BackendCommand::MarkOrderDelivered { activation, id } => {
            let result = api.mark_order_delivered(&id).await;
            UiEvent::OrderDelivered {
                activation,
                id,
                result,
            }
        }
        BackendCommand::SendResetEmail { email } => {
            UiEvent::ResetEmailSent(api.send_reset_email(&email).await)
        }
        BackendCommand::ResetPassword { new_password } => {
            UiEvent::PasswordReset(api.reset_password(&new_password).await)
        }
        BackendCommand::SaveReport { report } => {
            let file_name = report.file_name.clone();
            let picked = tokio::task::spawn_blocking(move || {
                rfd::FileDialog::new()
                    .set_file_name(&file_name)
                    .add_filter("PDF", &["pdf"])
                    .save_file()
            })
            .await;
            match picked {
                Ok(Some(path)) => save_report(report, path).await,
                Ok(None) => {
                    tracing::debug!("report save cancelled");
                    return None;
                }
                Err(err) => UiEvent::Error(UiError::from_message(
                    UiErrorContext::Report,
                    format!("save dialog failed: {err}"),
                )),
            }
        }
    };
    Some(event)
}

/// Renders and writes the report off the async threads.
pub async fn save_report(report: EventReport, path: PathBuf) -> UiEvent {
    let rows = report.row_count();
    let target = path.clone();
    let written = tokio::task::spawn_blocking(move || report.save_to(&target)).await;
    match written {
        Ok(Ok(())) => {
            tracing::info!(path = %path.display(), rows, "event report saved");
            UiEvent::ReportSaved(path)
        }
        Ok(Err(err)) => {
            tracing::error!(path = %path.display(), error = %err, "failed to save event report");
            UiEvent::Error(UiError::from_message(UiErrorContext::Report, err.to_string()))
        }
        Err(err) => UiEvent::Error(UiError::from_message(
            UiErrorContext::Report,
            format!("report task failed: {err}"),
        )),
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
