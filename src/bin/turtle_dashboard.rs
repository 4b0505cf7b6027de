use turtle_dashboard::services::dashboard::{Command, Dashboard};
use turtle_dashboard::{Config, HttpDashboardApi, UpdateOutcome};

use anyhow::{bail, Context};
use clap::{App, Arg, ArgMatches, SubCommand};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    let matches = App::new("Turtle Dashboard")
        .version("1.0.0")
        .about("Polls the turtle screening backend and renders the signal tables to HTML")
        .arg(
            Arg::with_name("base-url")
                .short('b')
                .long("base-url")
                .value_name("URL")
                .help("Backend base URL")
                .takes_value(true)
                .global(true)
                .default_value("http://localhost:8000"),
        )
        .arg(
            Arg::with_name("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the rendered dashboard")
                .takes_value(true)
                .global(true)
                .default_value("dashboard.html"),
        )
        .subcommand(SubCommand::with_name("refresh").about("Refresh server data once and render the tables"))
        .subcommand(SubCommand::with_name("update").about("Start a background data update and wait for it to finish"))
        .subcommand(
            SubCommand::with_name("watch")
                .about("Keep the dashboard live; reads r(efresh) / u(pdate) / q(uit) from stdin")
                .arg(
                    Arg::with_name("refresh-interval")
                        .long("refresh-interval")
                        .value_name("SECONDS")
                        .help("Auto refresh period")
                        .takes_value(true)
                        .default_value("30"),
                )
                .arg(
                    Arg::with_name("no-auto-refresh")
                        .long("no-auto-refresh")
                        .help("Only refresh on request")
                        .takes_value(false),
                ),
        )
        .get_matches();

    let config = build_config(&matches)?;
    info!("Using backend {}", config.base_url);

    let api = Arc::new(HttpDashboardApi::new(&config)?);
    let mut dashboard = Dashboard::new(&config, api);

    match matches.subcommand() {
        Some(("refresh", _)) => {
            dashboard.refresh().await?;
        }
        Some(("update", _)) => match dashboard.update().await? {
            UpdateOutcome::Completed { polls } => info!("Update finished after {} status checks", polls),
            UpdateOutcome::Failed(e) => bail!("update failed: {}", e),
        },
        Some(("watch", _)) => {
            let (sender, receiver) = mpsc::channel(1);
            tokio::spawn(read_commands(sender));
            dashboard.run(receiver).await?;
        }
        _ => {
            info!("No command specified. Use --help for usage information.");
        }
    }

    Ok(())
}

fn build_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    // 全局参数会下传到子命令
    let scoped = matches.subcommand().map(|(_, m)| m).unwrap_or(matches);
    let base_url = scoped.value_of("base-url").unwrap_or("http://localhost:8000");
    let output = scoped.value_of("output").map(PathBuf::from);

    let mut config = Config::new().with_base_url(base_url).with_output_path(output);

    if let Some(watch) = matches.subcommand_matches("watch") {
        let auto_refresh = if watch.is_present("no-auto-refresh") {
            None
        } else {
            let seconds = watch
                .value_of("refresh-interval")
                .unwrap_or("30")
                .parse::<u64>()
                .context("refresh interval must be a whole number of seconds")?;
            if seconds == 0 {
                bail!("refresh interval must be positive");
            }
            Some(Duration::from_secs(seconds))
        };
        config = config.with_auto_refresh(auto_refresh);
    }

    Ok(config)
}

/// 从标准输入读取命令；队列已满时丢弃，避免操作堆积
async fn read_commands(sender: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                warn!("Unknown command {:?}; use r, u or q", line.trim());
            }
            continue;
        };
        match sender.try_send(command) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Busy, ignoring {:?}", command);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => break,
        }
        if command == Command::Quit {
            break;
        }
    }
}
