use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "canvas-zoom")]
#[command(about = "Zoom cloud recordings and transcripts for Canvas", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP API server (default)
    Serve,
    /// Look up a meeting's recordings or transcript
    Meeting(MeetingCliArgs),
    /// List an instructor's recordings, optionally for one course
    Instructor(InstructorCliArgs),
    /// Fetch the transcript of a single recording
    Recording(RecordingCliArgs),
    /// Convert a local WebVTT file to JSON captions
    Vtt(VttCliArgs),
    /// Inspect the configuration
    Config(ConfigCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct MeetingCliArgs {
    #[command(subcommand)]
    pub command: MeetingCommand,
}

#[derive(Subcommand, Debug)]
pub enum MeetingCommand {
    /// Print Zoom's recording payload for a meeting
    Recordings {
        /// Zoom meeting ID or UUID
        meeting_id: String,
    },
    /// Print the parsed transcript for a meeting
    Transcript {
        /// Zoom meeting ID or UUID
        meeting_id: String,
    },
}

#[derive(ClapArgs, Debug)]
pub struct InstructorCliArgs {
    /// Instructor email, login ID or Zoom user ID
    pub instructor_id: String,
    /// Only include recordings tagged with this Canvas course ID
    #[arg(short, long)]
    pub course_id: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct RecordingCliArgs {
    /// Zoom recording ID
    pub recording_id: String,
}

#[derive(ClapArgs, Debug)]
pub struct VttCliArgs {
    /// Path to a .vtt file
    pub path: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Print the effective configuration with secrets redacted
    Show,
}
