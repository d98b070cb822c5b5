//! Client-side commands - talk to a running daemon via IPC

use super::args::{DaemonAction, HistoryAction};
use super::ipc::{DaemonCommand, IpcClient};
use super::presenter::Presenter;

const NOT_RUNNING: &str = "No daemon running. Start with: cliptrail --daemon";

/// Send `command` and return the reply, turning `error: ...` replies into errors
async fn request(client: &dyn IpcClient, command: DaemonCommand) -> Result<String, String> {
    if !client.is_daemon_running() {
        return Err(NOT_RUNNING.to_string());
    }

    let response = client
        .send_command(command)
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;

    match response.strip_prefix("error:") {
        Some(message) => Err(message.trim().to_string()),
        None => Ok(response),
    }
}

/// Handle `daemon` subcommand
pub async fn handle_daemon_command(
    action: DaemonAction,
    client: &dyn IpcClient,
    presenter: &Presenter,
) -> Result<(), String> {
    match action {
        DaemonAction::Status => {
            let response = request(client, DaemonCommand::Status).await?;
            let status = match response.split_once(' ') {
                Some((state, len)) => format!("{} ({} entries)", state, len),
                None => response,
            };
            presenter.daemon_status(&status);
        }
        DaemonAction::Stop => {
            request(client, DaemonCommand::Stop).await?;
            presenter.success("Daemon stopping");
        }
    }
    Ok(())
}

/// Handle `history` subcommand
pub async fn handle_history_command(
    action: HistoryAction,
    client: &dyn IpcClient,
    presenter: &Presenter,
) -> Result<(), String> {
    match action {
        HistoryAction::List { json } => {
            let response = request(client, DaemonCommand::List).await?;
            if json {
                presenter.output(&response);
            } else {
                let entries: Vec<String> = serde_json::from_str(&response)
                    .map_err(|e| format!("Unexpected reply from daemon: {}", e))?;
                presenter.history(&entries);
            }
        }
        HistoryAction::Restore { index } => {
            request(client, DaemonCommand::Restore(index)).await?;
            presenter.success(&format!("Restored entry {}", index));
        }
        HistoryAction::PasteSecond => {
            let response = request(client, DaemonCommand::PasteSecond).await?;
            match response.strip_prefix("ok:") {
                Some(note) => presenter.info(note.trim()),
                None => presenter.success("Restored previous entry"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;

    struct FakeClient {
        running: bool,
        reply: String,
        sent: Mutex<Vec<DaemonCommand>>,
    }

    impl FakeClient {
        fn replying(reply: &str) -> Self {
            Self {
                running: true,
                reply: reply.to_string(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IpcClient for FakeClient {
        fn is_daemon_running(&self) -> bool {
            self.running
        }

        async fn send_command(&self, command: DaemonCommand) -> io::Result<String> {
            self.sent.lock().unwrap().push(command);
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn not_running_is_reported() {
        let client = FakeClient {
            running: false,
            ..FakeClient::replying("ok")
        };
        let err = handle_daemon_command(DaemonAction::Status, &client, &Presenter::new())
            .await
            .unwrap_err();
        assert!(err.contains("No daemon running"));
        assert!(client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn restore_sends_index() {
        let client = FakeClient::replying("ok");
        handle_history_command(
            HistoryAction::Restore { index: 3 },
            &client,
            &Presenter::new(),
        )
        .await
        .unwrap();
        assert_eq!(*client.sent.lock().unwrap(), vec![DaemonCommand::Restore(3)]);
    }

    #[tokio::test]
    async fn error_reply_becomes_error() {
        let client = FakeClient::replying("error: History index 9 is out of range");
        let err = handle_history_command(
            HistoryAction::Restore { index: 9 },
            &client,
            &Presenter::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err, "History index 9 is out of range");
    }

    #[tokio::test]
    async fn list_rejects_non_json_reply() {
        let client = FakeClient::replying("garbage");
        let result = handle_history_command(
            HistoryAction::List { json: false },
            &client,
            &Presenter::new(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn list_accepts_json_array() {
        let client = FakeClient::replying(r#"["a","b\nc"]"#);
        handle_history_command(
            HistoryAction::List { json: false },
            &client,
            &Presenter::new(),
        )
        .await
        .unwrap();
    }
}
