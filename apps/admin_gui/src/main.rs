use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use client_core::AdminClient;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use config::{load_settings, Args};
use controller::events::UiEvent;
use ui::AdminApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings(&args).context("failed to load admin settings")?;
    tracing::info!(
        api_base_url = %settings.api_base_url,
        timeout_secs = settings.request_timeout_secs,
        "starting admin gui"
    );

    let api = AdminClient::with_timeout(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to build api client")?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(api));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title.as_str())
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        &settings.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(AdminApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("admin window failed: {err}"))
}
