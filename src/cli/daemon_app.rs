//! Daemon app runner

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::ports::{
    DesktopControl, HistoryStore, Notifier, PasteFailureNotice, SystemClipboard,
};
use crate::application::{
    FocusTracker, HistoryManager, PasteBackAgent, PasteBackError, PasteBackHandle, PasteOutcome,
    RestoreError,
};
use crate::domain::config::DEFAULT_SELF_APP_ID;
use crate::infrastructure::keystroke::{create_keystroke, PasteToolChoice};
use crate::infrastructure::{
    create_clipboard, create_desktop, create_notifier, FocusPoller, JsonHistoryStore,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use super::args::DaemonOptions;
use super::ipc::{create_ipc_server, DaemonCommand, IpcRequest, IpcServer};
use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::{DaemonSignal, DaemonSignalHandler};

/// Notifier shared with paste-back watcher tasks
pub type SharedNotifier = Arc<dyn Notifier>;

/// Run daemon mode
pub async fn run_daemon(options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();

    let preference = match options.keystroke_tool.parse::<PasteToolChoice>() {
        Ok(p) => p,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    // Acquire PID file
    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    // Create adapters
    let clipboard = create_clipboard();
    let store = JsonHistoryStore::with_path(&options.history_file);
    let focus = FocusTracker::new(options.self_app_id.as_str());
    let paste_back = if options.paste_back {
        build_paste_back(preference, &options, &presenter).await
    } else {
        info!("paste-back disabled");
        None
    };
    let notifier: Option<SharedNotifier> = options.notify.then(|| Arc::from(create_notifier()));

    let manager = HistoryManager::new(
        clipboard,
        store,
        focus.clone(),
        paste_back,
        options.max_history,
    );
    manager.load().await;

    // Focus tracking: poller samples the desktop, tracker keeps the paste target
    let desktop: Arc<dyn DesktopControl> = Arc::from(create_desktop().await);
    let (focus_events, poller_task) = FocusPoller::new(desktop, options.focus_interval).spawn();
    let tracker = focus.clone();
    let tracker_task = tokio::spawn(async move { tracker.run(focus_events).await });

    // Setup signal handler (returns handler + sender for socket server)
    let (mut signals, signal_tx) = match DaemonSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut server = create_ipc_server();
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let server: Arc<dyn IpcServer> = Arc::from(server);
    let socket = server.path();
    let listener = Arc::clone(&server);
    let server_task = tokio::spawn(async move {
        if let Err(e) = listener.run(signal_tx).await {
            warn!(error = %e, "socket server stopped");
        }
    });

    manager.start_monitoring(options.poll_interval).await;

    presenter.daemon_status(&format!(
        "Monitoring clipboard every {} ({} entries loaded)",
        options.poll_interval,
        manager.len().await
    ));
    presenter.info(&format!(
        "PID: {} | Socket: {} | History: {}",
        std::process::id(),
        socket,
        options.history_file.display()
    ));
    if options.paste_back && options.self_app_id == DEFAULT_SELF_APP_ID {
        presenter.info(
            "Paste-back targets the last focused app. If you restore from a launcher or \
             terminal, set self_app_id to its process name (cliptrail config set self_app_id rofi)",
        );
    }

    let clean = daemon_loop(&manager, &mut signals, &presenter, notifier).await;

    // Cleanup
    manager.stop_monitoring().await;
    poller_task.abort();
    tracker_task.abort();
    server_task.abort();
    server.cleanup();
    let _ = pid_file.release();

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Build the paste-back agent, or `None` when no keystroke tool is usable
async fn build_paste_back(
    preference: PasteToolChoice,
    options: &DaemonOptions,
    presenter: &Presenter,
) -> Option<PasteBackAgent> {
    match create_keystroke(preference).await {
        Ok((keystroke, tool)) => {
            info!(%tool, attempts = options.retry.attempts, "paste-back enabled");
            Some(PasteBackAgent::new(
                create_desktop().await,
                keystroke,
                options.retry,
            ))
        }
        Err(e) => {
            presenter.warn(&format!("Paste-back disabled: {}", e));
            None
        }
    }
}

async fn daemon_loop<C, S>(
    manager: &HistoryManager<C, S>,
    signals: &mut DaemonSignalHandler,
    presenter: &Presenter,
    notifier: Option<SharedNotifier>,
) -> bool
where
    C: SystemClipboard + 'static,
    S: HistoryStore + 'static,
{
    loop {
        match signals.recv().await {
            Some(DaemonSignal::Request(IpcRequest { command, reply })) => {
                let response = handle_request(manager, command, notifier.clone()).await;
                let _ = reply.send(response);

                if command == DaemonCommand::Stop {
                    presenter.daemon_status("Stop requested, shutting down...");
                    return true;
                }
            }
            Some(DaemonSignal::Shutdown) => {
                presenter.daemon_status("Shutting down...");
                return true;
            }
            None => {
                // Channel closed
                return false;
            }
        }
    }
}

/// Execute one IPC command against the manager and build the reply line
pub async fn handle_request<C, S>(
    manager: &HistoryManager<C, S>,
    command: DaemonCommand,
    notifier: Option<SharedNotifier>,
) -> String
where
    C: SystemClipboard + 'static,
    S: HistoryStore + 'static,
{
    match command {
        DaemonCommand::List => match serde_json::to_string(&manager.get_history().await) {
            Ok(json) => json,
            Err(e) => format!("error: {}", e),
        },
        DaemonCommand::Restore(index) => match manager.restore(index).await {
            Ok(restored) => {
                watch_paste_back(restored.paste_back, notifier);
                "ok".to_string()
            }
            Err(e) => restore_error(e),
        },
        DaemonCommand::PasteSecond => match manager.paste_second_most_recent().await {
            Ok(Some(restored)) => {
                watch_paste_back(restored.paste_back, notifier);
                "ok".to_string()
            }
            Ok(None) => "ok: nothing to paste".to_string(),
            Err(e) => restore_error(e),
        },
        DaemonCommand::Status => {
            format!("{} {}", manager.state().await, manager.len().await)
        }
        DaemonCommand::Stop => "ok".to_string(),
    }
}

fn restore_error(e: RestoreError) -> String {
    warn!(error = %e, "restore failed");
    format!("error: {}", e)
}

/// Log the paste-back result once it is known, notifying on failure
fn watch_paste_back(handle: Option<PasteBackHandle>, notifier: Option<SharedNotifier>) {
    let Some(handle) = handle else {
        return;
    };

    tokio::spawn(async move {
        let error = match handle.await {
            Ok(Ok(PasteOutcome::Pasted { attempts })) => {
                debug!(attempts, "paste-back finished");
                return;
            }
            Ok(Ok(PasteOutcome::Skipped)) => return,
            Ok(Err(e)) => e,
            Err(e) => {
                warn!(error = %e, "paste-back task failed");
                return;
            }
        };

        let Some(notifier) = notifier else {
            return;
        };
        let PasteBackError::InjectionFailed {
            target, attempts, ..
        } = error
        else {
            return;
        };

        let notice = PasteFailureNotice { target, attempts };
        if let Err(e) = notifier.paste_failed(&notice).await {
            warn!(error = %e, "failed to show notification");
        }
    });
}
