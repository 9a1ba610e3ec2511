//! Shared live-watch driver: routes runtime events into the TUI on a TTY
//! or the console trace view otherwise, and services export requests.

use crate::presentation::renderers::{ConsoleView, TuiEvent, TuiSignal, TuiView};
use crate::presentation::view_models::build_dashboard;
use anyhow::Result;
use chrono::Utc;
use fixwatch_runtime::ops::export;
use fixwatch_runtime::{Runtime, RuntimeEvent, RuntimeHandle};
use fixwatch_types::CategoryFilter;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn drive(runtime: Runtime) -> Result<()> {
    if std::io::stdout().is_terminal() {
        drive_tui(runtime, std::env::current_dir()?).await
    } else {
        drive_console(runtime).await
    }
}

async fn drive_tui(mut runtime: Runtime, out_dir: PathBuf) -> Result<()> {
    let (tui_tx, tui_rx) = mpsc::unbounded_channel::<TuiEvent>();
    let (signal_tx, mut signal_rx) = mpsc::unbounded_channel::<TuiSignal>();

    let view = TuiView::new()?;
    let renderer = std::thread::Builder::new()
        .name("fixwatch-tui".to_string())
        .spawn(move || view.run(tui_rx, signal_tx))?;

    let handle = runtime.handle();
    let _ = tui_tx.send(TuiEvent::State(Box::new(handle.snapshot())));

    loop {
        tokio::select! {
            event = runtime.recv() => match event {
                Some(RuntimeEvent::StateUpdated { snapshot }) => {
                    let _ = tui_tx.send(TuiEvent::State(snapshot));
                }
                Some(RuntimeEvent::Started { .. }) => {}
                Some(RuntimeEvent::Stopped) => {
                    let _ = tui_tx.send(TuiEvent::Stopped);
                }
                None => break,
            },
            signal = signal_rx.recv() => match signal {
                Some(TuiSignal::Quit) | None => break,
                Some(TuiSignal::ExportCsv) => {
                    let _ = tui_tx.send(export_csv(&handle, &out_dir));
                }
                Some(TuiSignal::ExportReport { filter }) => {
                    let _ = tui_tx.send(export_report(&handle, filter, &out_dir).await);
                }
            },
        }
    }

    runtime.stop();
    drop(tui_tx);
    match renderer.join() {
        Ok(result) => result?,
        Err(_) => eprintln!("TUI thread panicked"),
    }
    Ok(())
}

/// Every export request resolves to exactly one completion event, so the
/// renderer's in-progress flag always resets.
fn export_csv(handle: &RuntimeHandle, out_dir: &PathBuf) -> TuiEvent {
    let snapshot = handle.snapshot();
    if snapshot.fixes.is_empty() {
        return TuiEvent::ExportFailed("No fixes to export yet".to_string());
    }
    let path = out_dir.join(export::csv_file_name(Utc::now()));
    match export::write_fixes_csv(&path, &snapshot.fixes) {
        Ok(()) => TuiEvent::ExportDone(path.display().to_string()),
        Err(err) => TuiEvent::ExportFailed(format!("CSV export failed: {}", err)),
    }
}

async fn export_report(
    handle: &RuntimeHandle,
    filter: CategoryFilter,
    out_dir: &PathBuf,
) -> TuiEvent {
    let snapshot = handle.snapshot();
    if snapshot.fixes.is_empty() {
        return TuiEvent::ExportFailed("No fixes to export yet".to_string());
    }
    let path = out_dir.join(export::report_file_name(Utc::now()));
    match export::write_report(&path, &snapshot.fixes, filter, Utc::now()).await {
        Ok(()) => TuiEvent::ExportDone(path.display().to_string()),
        Err(err) => TuiEvent::ExportFailed(format!("Report export failed: {}", err)),
    }
}

async fn drive_console(mut runtime: Runtime) -> Result<()> {
    let mut view = ConsoleView::new();
    let handle = runtime.handle();

    // Ctrl+C stops polling; the Stopped event below ends the loop.
    let stopper = handle.clone();
    ctrlc::set_handler(move || stopper.stop())?;

    while let Some(event) = runtime.recv().await {
        match event {
            RuntimeEvent::Started { session } => {
                view.render_started(&session.run_id, &session.repo_url, &session.branch_name);
            }
            RuntimeEvent::StateUpdated { snapshot } => {
                view.render_update(&build_dashboard(&snapshot, CategoryFilter::All));
            }
            RuntimeEvent::Stopped => {
                view.render_stopped(&build_dashboard(&handle.snapshot(), CategoryFilter::All));
                break;
            }
        }
    }

    Ok(())
}
