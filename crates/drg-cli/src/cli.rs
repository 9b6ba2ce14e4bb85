//! CLI argument definitions for the DRG workbench.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "drg",
    version,
    about = "DRG compliance workbench - submit and audit patient records against DRG rules",
    long_about = "Submit patient visit records against diagnosis-related group (DRG) rules.\n\n\
                  Each record is checked for required clinical metrics, their valid ranges\n\
                  and the maximum reimbursable cost before it is stored."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps (always on with --log-file).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Allow patient names and identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: platform configuration folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides DRG_DATA_DIR and the settings file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in by username.
    Login {
        username: String,
    },

    /// Sign out.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Inspect and maintain DRG rules.
    #[command(subcommand)]
    Rules(RulesCommand),

    /// Manage user accounts (administrators only).
    #[command(subcommand)]
    Users(UsersCommand),

    /// Submit a patient record for compliance checking.
    Submit(SubmitArgs),

    /// Extract metric values from a clinical note without submitting.
    Extract(ExtractArgs),

    /// List stored records, or show one in full.
    Records(RecordsArgs),

    /// Show compliance statistics (administrators only).
    Report(ReportArgs),

    /// Export all records to a CSV file (administrators only).
    Export {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Replace all records with synthetic demo data (administrators only).
    Demo(DemoArgs),

    /// Delete all records (administrators only).
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RulesCommand {
    /// List rules. Doctors see active rules only.
    List {
        /// Include inactive rules.
        #[arg(long)]
        all: bool,
    },

    /// Create a rule from a TOML draft file.
    Add {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Change a rule's maximum reimbursable cost.
    SetCost {
        rule_id: String,
        max_cost: f64,
    },

    /// Offer a rule for new submissions.
    Activate {
        rule_id: String,
    },

    /// Withdraw a rule from new submissions.
    Deactivate {
        rule_id: String,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all accounts.
    List,

    /// Create a doctor account.
    Add {
        username: String,
        #[arg(long)]
        clinic: String,
    },

    /// Change an account's username or clinic.
    Update {
        user_id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        clinic: Option<String>,
    },
}

/// Source of a free-text clinical note.
#[derive(Args, Clone, Default)]
pub struct NoteArgs {
    /// Clinical note text.
    #[arg(long, conflicts_with = "note_file")]
    pub note: Option<String>,

    /// File holding the clinical note.
    #[arg(long = "note-file", value_name = "PATH")]
    pub note_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Id of the DRG rule to check against.
    #[arg(long)]
    pub rule: String,

    /// Visit date (YYYY-MM-DD, default today).
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long = "patient-name", default_value = "")]
    pub patient_name: String,

    #[arg(long = "patient-id", default_value = "")]
    pub patient_id: String,

    #[arg(long, default_value = "")]
    pub age: String,

    #[arg(long, default_value = "")]
    pub gender: String,

    #[arg(long, default_value = "")]
    pub ethnicity: String,

    #[arg(long, default_value = "")]
    pub contact: String,

    #[arg(long, default_value = "")]
    pub allergies: String,

    #[arg(long, default_value = "")]
    pub history: String,

    /// Metric value as KEY=VALUE; repeat for each metric.
    #[arg(long = "metric", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub metrics: Vec<(String, String)>,

    /// Total treatment cost.
    #[arg(long, default_value = "")]
    pub cost: String,

    /// Pre-fill metrics and cost from a clinical note.
    #[command(flatten)]
    pub note: NoteArgs,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Id of the DRG rule whose metrics to look for.
    #[arg(long)]
    pub rule: String,

    #[command(flatten)]
    pub note: NoteArgs,
}

#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub command: Option<RecordsCommand>,

    /// Only show records with this status.
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Subcommand)]
pub enum RecordsCommand {
    /// Show demographics, history and metrics of one record.
    Show {
        record_id: String,
    },
}

#[derive(Args)]
pub struct ReportArgs {
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Number of records to generate.
    #[arg(long, default_value_t = drg_core::DEFAULT_DEMO_RECORDS)]
    pub count: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Compliant,
    Flagged,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing metric key in {raw:?}"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
