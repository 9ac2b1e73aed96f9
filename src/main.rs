use anyhow::Result;
use canvas_zoom::{
    app,
    cli::{
        handle_config_command, handle_instructor_command, handle_meeting_command,
        handle_recording_command, handle_vtt_command, Cli, CliCommand,
    },
    config::Config,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Commands that need no configuration.
    let command = match cli.command {
        Some(CliCommand::Version) => {
            println!("canvas-zoom {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::Vtt(args)) => return handle_vtt_command(args),
        other => other,
    };

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;

    match command {
        Some(CliCommand::Meeting(args)) => handle_meeting_command(&config, args).await,
        Some(CliCommand::Instructor(args)) => handle_instructor_command(&config, args).await,
        Some(CliCommand::Recording(args)) => handle_recording_command(&config, args).await,
        Some(CliCommand::Config(args)) => handle_config_command(&config, &config_path, args),
        Some(CliCommand::Serve) | None => app::run_service(config).await,
        Some(CliCommand::Version) | Some(CliCommand::Vtt(_)) => Ok(()),
    }
}
