//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use grantflow_domain::{DocumentKind, Organization};
use std::path::PathBuf;

/// GrantFlow CLI - Upload grant applications and track their evaluation.
#[derive(Debug, Parser)]
#[command(name = "grantflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(
        short,
        long,
        global = true,
        env = "GRANTFLOW_SERVER_URL",
        default_value = "http://localhost:8000"
    )]
    pub server: String,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Session file path (defaults to ~/.grantflow/session.toml)
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe the server's health endpoint
    Health,

    /// Render an instruction from a questionnaire file
    Prompt(PromptArgs),

    /// Upload one or more PDF files for evaluation
    Upload(UploadArgs),

    /// Refresh the status of tracked tasks once
    Status,

    /// Poll tracked tasks until done, bounded by rounds
    Watch(WatchArgs),

    /// Show the full result or error of one task
    Show(ShowArgs),

    /// Record an expert decision for a task
    Decide(DecideArgs),

    /// Export tasks and decisions as CSV
    Export(ExportArgs),
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Questionnaire TOML file
    #[arg(short, long)]
    pub file: PathBuf,
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// PDF files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Instruction text sent with each file
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Questionnaire TOML file rendered into the instruction
    #[arg(long, conflicts_with = "prompt")]
    pub prompt_form: Option<PathBuf>,

    /// Model identifier (server default when omitted)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature (server default when omitted)
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// Organization whose guidelines apply
    #[arg(short, long, value_enum, default_value = "fpi")]
    pub organization: OrgArg,

    /// Document kind hint for extraction
    #[arg(short = 'k', long, value_enum, default_value = "application")]
    pub kind: KindArg,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Maximum number of polling rounds
    #[arg(short, long, default_value = "10")]
    pub rounds: u32,

    /// Seconds to sleep between rounds
    #[arg(short, long, default_value = "3")]
    pub interval: u64,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Task identifier
    pub task_id: String,
}

/// Arguments for the decide command.
#[derive(Debug, Parser)]
pub struct DecideArgs {
    /// Task identifier
    pub task_id: String,

    /// Decision outcome
    #[arg(value_enum)]
    pub decision: DecisionArg,

    /// Free-text expert comment
    #[arg(short, long)]
    pub comment: Option<String>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Output CSV file
    #[arg(short, long, default_value = "expert_decisions.csv")]
    pub output: PathBuf,
}

/// Organization argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OrgArg {
    /// Advanced research foundation
    Fpi,
    /// University grant office
    Cu,
}

/// Document kind argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    /// Generic application document
    Application,
    /// Slide-deck presentation (layout-preserving extraction)
    Presentation,
}

/// Decision argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DecisionArg {
    /// Support the application
    Support,
    /// Reject the application
    Reject,
    /// Send back for revision
    Revise,
}

impl From<OrgArg> for Organization {
    fn from(org: OrgArg) -> Self {
        match org {
            OrgArg::Fpi => Organization::Fpi,
            OrgArg::Cu => Organization::Cu,
        }
    }
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Application => DocumentKind::Application,
            KindArg::Presentation => DocumentKind::Presentation,
        }
    }
}

impl From<DecisionArg> for crate::session::Decision {
    fn from(decision: DecisionArg) -> Self {
        match decision {
            DecisionArg::Support => crate::session::Decision::Support,
            DecisionArg::Reject => crate::session::Decision::Reject,
            DecisionArg::Revise => crate::session::Decision::Revise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_command() {
        let cli = Cli::parse_from([
            "grantflow",
            "upload",
            "proposal.pdf",
            "--prompt",
            "Summarize",
            "--organization",
            "cu",
        ]);
        match cli.command {
            Command::Upload(args) => {
                assert_eq!(args.files, vec![PathBuf::from("proposal.pdf")]);
                assert!(matches!(args.organization, OrgArg::Cu));
                assert!(matches!(args.kind, KindArg::Application));
            }
            _ => panic!("Expected Upload command"),
        }
    }

    #[test]
    fn test_watch_defaults_are_bounded() {
        let cli = Cli::parse_from(["grantflow", "watch"]);
        match cli.command {
            Command::Watch(args) => {
                assert!(args.rounds > 0);
                assert!(args.interval > 0);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_decide_command() {
        let cli = Cli::parse_from(["grantflow", "decide", "abc", "revise", "--comment", "weak"]);
        match cli.command {
            Command::Decide(args) => {
                assert!(matches!(args.decision, DecisionArg::Revise));
                assert_eq!(args.comment.as_deref(), Some("weak"));
            }
            _ => panic!("Expected Decide command"),
        }
    }

    #[test]
    fn test_org_conversion() {
        let org: Organization = OrgArg::Fpi.into();
        assert!(matches!(org, Organization::Fpi));
    }
}
