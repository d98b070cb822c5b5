//! Cliptrail CLI entry point

use std::process::ExitCode;

use clap::Parser;

use cliptrail::cli::{
    app::{daemon_options, load_merged_config, run_offline_list, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    daemon_cmd::{handle_daemon_command, handle_history_command},
    ipc::create_ipc_client,
    logging::init_logging,
    presenter::Presenter,
};
use cliptrail::domain::config::{AppConfig, LinuxConfig};
use cliptrail::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Daemon { action }) => {
            let client = create_ipc_client();
            if let Err(e) = handle_daemon_command(action, client.as_ref(), &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::History { action }) => {
            let client = create_ipc_client();
            if let Err(e) = handle_history_command(action, client.as_ref(), &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        poll_interval: cli.interval.clone(),
        history_file: cli.history_file.clone(),
        self_app_id: cli.self_app_id.clone(),
        paste_back: if cli.no_paste_back { Some(false) } else { None },
        notify: if cli.notify { Some(true) } else { None },
        linux: cli.keystroke_tool.clone().map(|tool| LinuxConfig {
            keystroke_tool: Some(tool),
        }),
        ..AppConfig::empty()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Route to appropriate handler
    if cli.daemon {
        let options = match daemon_options(&config) {
            Ok(options) => options,
            Err(e) => {
                presenter.error(&e);
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        };

        run_daemon(options).await
    } else {
        run_offline_list(&config).await
    }
}
