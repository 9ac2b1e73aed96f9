pub mod args;
pub mod config;
pub mod recordings;

pub use args::{Cli, CliCommand};
pub use config::handle_config_command;
pub use recordings::{
    build_service, handle_instructor_command, handle_meeting_command, handle_recording_command,
    handle_vtt_command,
};
