//! CLI handlers for recording lookups.
//!
//! This module handles terminal presentation.
//! Core business logic is delegated to the `recordings` module.

use crate::config::Config;
use crate::recordings::RecordingService;
use crate::vtt;
use crate::zoom::ZoomClient;
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::args::{InstructorCliArgs, MeetingCliArgs, MeetingCommand, RecordingCliArgs, VttCliArgs};

pub fn build_service(config: &Config) -> Result<RecordingService> {
    let client = ZoomClient::from_config(&config.zoom).context("Failed to build Zoom client")?;
    Ok(RecordingService::new(Arc::new(client)))
}

pub async fn handle_meeting_command(config: &Config, args: MeetingCliArgs) -> Result<()> {
    let service = build_service(config)?;

    match args.command {
        MeetingCommand::Recordings { meeting_id } => {
            print_json(&service.get_meeting_recordings(&meeting_id).await?)
        }
        MeetingCommand::Transcript { meeting_id } => {
            print_json(&service.get_meeting_transcript(&meeting_id).await?)
        }
    }
}

pub async fn handle_instructor_command(config: &Config, args: InstructorCliArgs) -> Result<()> {
    let service = build_service(config)?;

    // Ctrl-C stops the window scan between requests.
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let result = service
        .get_instructor_recordings(&args.instructor_id, args.course_id.as_deref(), &cancel)
        .await?;

    if let Some(message) = &result.message {
        eprintln!("{}", message);
    }
    print_json(&result)
}

pub async fn handle_recording_command(config: &Config, args: RecordingCliArgs) -> Result<()> {
    let service = build_service(config)?;
    print_json(&service.get_recording_transcript(&args.recording_id).await?)
}

pub fn handle_vtt_command(args: VttCliArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {:?}", args.path))?;
    print_json(&vtt::parse(&content))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}
